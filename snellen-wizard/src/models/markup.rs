// Markup contract
//
// The controller never looks elements up on its own. It is handed the element ids it needs
// (`Markup`) and a surface that owns the nodes (`FormSurface`).

use super::form::{FieldId, Stage};
use std::collections::HashMap;

/// Element ids the controller is bound to. Renaming any of them breaks the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    pub snellen_stage: String,
    pub duochrome_stage: String,
    pub result_stage: String,
    pub right_eye: String,
    pub left_eye: String,
    pub duochrome: String,
    /// Hidden inputs inside the duochrome stage that carry the Snellen answers forward.
    pub carrier_right_eye: String,
    pub carrier_left_eye: String,
    pub result_right_eye: String,
    pub result_left_eye: String,
    pub result_duochrome: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            snellen_stage: "snellen-section".into(),
            duochrome_stage: "duochrome-section".into(),
            result_stage: "result-section".into(),
            right_eye: "right_eye".into(),
            left_eye: "left_eye".into(),
            duochrome: "duochrome".into(),
            carrier_right_eye: "hidden_right_eye".into(),
            carrier_left_eye: "hidden_left_eye".into(),
            result_right_eye: "result_right_eye".into(),
            result_left_eye: "result_left_eye".into(),
            result_duochrome: "result_duochrome".into(),
        }
    }
}

impl Markup {
    pub fn stage_container(&self, stage: Stage) -> &str {
        match stage {
            Stage::Snellen => &self.snellen_stage,
            Stage::Duochrome => &self.duochrome_stage,
            Stage::Result => &self.result_stage,
        }
    }

    pub fn input(&self, field: FieldId) -> &str {
        match field {
            FieldId::RightEye => &self.right_eye,
            FieldId::LeftEye => &self.left_eye,
            FieldId::Duochrome => &self.duochrome,
        }
    }

    /// Every id of the contract, in declaration order.
    pub fn element_ids(&self) -> [&str; 11] {
        [
            self.snellen_stage.as_str(),
            self.duochrome_stage.as_str(),
            self.result_stage.as_str(),
            self.right_eye.as_str(),
            self.left_eye.as_str(),
            self.duochrome.as_str(),
            self.carrier_right_eye.as_str(),
            self.carrier_left_eye.as_str(),
            self.result_right_eye.as_str(),
            self.result_left_eye.as_str(),
            self.result_duochrome.as_str(),
        ]
    }
}

/// Node store the controller reads inputs from and writes visibility/text to.
pub trait FormSurface {
    fn has_element(&self, id: &str) -> bool;

    /// Current value of an input. `None` if the element does not exist.
    fn value(&self, id: &str) -> Option<&str>;

    fn set_value(&mut self, id: &str, value: &str);

    fn text(&self, id: &str) -> Option<&str>;

    fn set_text(&mut self, id: &str, text: &str);

    fn is_hidden(&self, id: &str) -> bool;

    fn set_hidden(&mut self, id: &str, hidden: bool);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceNode {
    pub value: String,
    pub text: String,
    pub hidden: bool,
}

/// In-memory surface. Writes to unknown ids are ignored.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    nodes: HashMap<String, SurfaceNode>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface holding every node of `markup`, all empty and visible.
    pub fn from_markup(markup: &Markup) -> Self {
        let mut surface = Self::new();
        for id in markup.element_ids() {
            surface.insert(id);
        }
        surface
    }

    pub fn insert(&mut self, id: impl Into<String>) {
        self.nodes.entry(id.into()).or_default();
    }

    pub fn remove(&mut self, id: &str) -> Option<SurfaceNode> {
        self.nodes.remove(id)
    }
}

impl FormSurface for MemorySurface {
    fn has_element(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    fn value(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(|n| n.value.as_str())
    }

    fn set_value(&mut self, id: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.value = value.to_string();
        }
    }

    fn text(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(|n| n.text.as_str())
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.text = text.to_string();
        }
    }

    fn is_hidden(&self, id: &str) -> bool {
        self.nodes.get(id).map(|n| n.hidden).unwrap_or(true)
    }

    fn set_hidden(&mut self, id: &str, hidden: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.hidden = hidden;
        }
    }
}
