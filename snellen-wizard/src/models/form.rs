// Form model
//
// UI-only state of the self-test: which stage is active, which fields exist, the inline
// annotation attached to an invalid field and the snapshot shown on the result stage.
// Nothing here is persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The one validation message shown under an empty field.
pub const MISSING_SELECTION_MESSAGE: &str = "Please select a value.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Snellen,
    Duochrome,
    Result,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Snellen, Stage::Duochrome, Stage::Result];

    /// Next stage in the wizard. `None` for the terminal stage.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Snellen => Some(Stage::Duochrome),
            Stage::Duochrome => Some(Stage::Result),
            Stage::Result => None,
        }
    }

    /// Fields validated when leaving this stage.
    pub fn fields(self) -> &'static [FieldId] {
        match self {
            Stage::Snellen => &[FieldId::RightEye, FieldId::LeftEye],
            Stage::Duochrome => &[FieldId::Duochrome],
            Stage::Result => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::Snellen => "Snellen Chart",
            Stage::Duochrome => "Duochrome Test",
            Stage::Result => "Your Results",
        }
    }

    pub fn as_id(self) -> &'static str {
        match self {
            Stage::Snellen => "snellen",
            Stage::Duochrome => "duochrome",
            Stage::Result => "result",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    RightEye,
    LeftEye,
    Duochrome,
}

impl FieldId {
    pub fn label(self) -> &'static str {
        match self {
            FieldId::RightEye => "Right eye",
            FieldId::LeftEye => "Left eye",
            FieldId::Duochrome => "Duochrome",
        }
    }

    /// Stage whose view contains this field's input.
    pub fn stage(self) -> Stage {
        match self {
            FieldId::RightEye | FieldId::LeftEye => Stage::Snellen,
            FieldId::Duochrome => Stage::Duochrome,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A required field had no selection when a transition was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}: {}", .field, MISSING_SELECTION_MESSAGE)]
pub struct MissingSelection {
    pub field: FieldId,
}

/// Current selection of one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub field: FieldId,
    pub value: String,
}

impl FieldValue {
    pub fn new(field: FieldId, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// Valid iff the underlying string is non-empty.
    pub fn is_valid(&self) -> bool {
        !self.value.is_empty()
    }

    pub fn require(&self) -> Result<&str, MissingSelection> {
        if self.is_valid() {
            Ok(self.value.as_str())
        } else {
            Err(MissingSelection { field: self.field })
        }
    }
}

/// Inline error indicator attached to one field. Created on the first failure and toggled
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub message: String,
    pub visible: bool,
}

impl Annotation {
    pub fn missing_selection() -> Self {
        Self {
            message: MISSING_SELECTION_MESSAGE.to_string(),
            visible: true,
        }
    }
}

/// Values shown on the result stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSnapshot {
    pub right_eye: String,
    pub left_eye: String,
    pub duochrome: String,
}

impl fmt::Display for ResultSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Right eye: {}", self.right_eye)?;
        writeln!(f, "Left eye: {}", self.left_eye)?;
        write!(f, "Duochrome: {}", self.duochrome)
    }
}

/// A form submission. Its default action (navigating away) can be suppressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_only_move_forward() {
        assert_eq!(Stage::Snellen.next(), Some(Stage::Duochrome));
        assert_eq!(Stage::Duochrome.next(), Some(Stage::Result));
        assert_eq!(Stage::Result.next(), None);
        assert!(Stage::Result.is_terminal());
        assert!(!Stage::Snellen.is_terminal());
    }

    #[test]
    fn stage_fields_match_their_views() {
        for stage in Stage::ALL {
            for field in stage.fields() {
                assert_eq!(field.stage(), stage, "{} listed under {}", field, stage);
            }
        }
        assert!(Stage::Result.fields().is_empty());
    }

    #[test]
    fn field_value_is_valid_only_when_non_empty() {
        assert!(FieldValue::new(FieldId::RightEye, "6/6").is_valid());
        assert!(!FieldValue::new(FieldId::RightEye, "").is_valid());

        let err = FieldValue::new(FieldId::LeftEye, "")
            .require()
            .expect_err("empty value must be rejected");
        assert_eq!(err.field, FieldId::LeftEye);
        assert_eq!(err.to_string(), "Left eye: Please select a value.");
    }

    #[test]
    fn snapshot_serializes_with_form_field_names() {
        let snapshot = ResultSnapshot {
            right_eye: "6/6".to_string(),
            left_eye: "6/9".to_string(),
            duochrome: "Red clearer".to_string(),
        };
        let json = serde_json::to_value(&snapshot).expect("serialize snapshot");
        assert_eq!(json["right_eye"], "6/6");
        assert_eq!(json["left_eye"], "6/9");
        assert_eq!(json["duochrome"], "Red clearer");
        assert!(snapshot.to_string().contains("Duochrome: Red clearer"));
    }

    #[test]
    fn submit_event_starts_with_default_enabled() {
        let mut ev = SubmitEvent::new();
        assert!(!ev.default_prevented());
        ev.prevent_default();
        assert!(ev.default_prevented());
    }
}
