//! Stage controller for the vision self-test.
//!
//! The controller owns the active [`Stage`] and the per-field [`Annotation`]s. It is bound to a
//! [`FormSurface`] at construction and only touches the elements named by its [`Markup`].
//! Transitions are guard methods: they validate the stage's fields, annotate the empty ones
//! and only switch views when every field has a selection.

mod error;

pub use error::FlowError;

use crate::models::form::{
    Annotation, FieldId, FieldValue, ResultSnapshot, Stage, SubmitEvent,
    MISSING_SELECTION_MESSAGE,
};
use crate::models::markup::{FormSurface, Markup};
use log::{info, warn};
use std::collections::HashMap;

pub struct FormFlowController<S: FormSurface> {
    markup: Markup,
    surface: S,
    stage: Stage,
    annotations: HashMap<FieldId, Annotation>,
    snapshot: Option<ResultSnapshot>,
}

impl<S: FormSurface> FormFlowController<S> {
    /// Bind to `surface`. Fails if any element of the contract is absent.
    pub fn new(markup: Markup, mut surface: S) -> Result<Self, FlowError> {
        if let Some(missing) = markup
            .element_ids()
            .into_iter()
            .find(|id| !surface.has_element(id))
        {
            return Err(FlowError::MissingElement(missing.to_string()));
        }

        for stage in Stage::ALL {
            surface.set_hidden(markup.stage_container(stage), stage != Stage::Snellen);
        }

        Ok(Self {
            markup,
            surface,
            stage: Stage::Snellen,
            annotations: HashMap::new(),
            snapshot: None,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn annotation(&self, field: FieldId) -> Option<&Annotation> {
        self.annotations.get(&field)
    }

    /// Annotations currently shown, ordered by field.
    pub fn visible_annotations(&self) -> Vec<(FieldId, &Annotation)> {
        let mut out: Vec<(FieldId, &Annotation)> = self
            .annotations
            .iter()
            .filter(|(_, a)| a.visible)
            .map(|(f, a)| (*f, a))
            .collect();
        out.sort_by_key(|(f, _)| *f);
        out
    }

    pub fn snapshot(&self) -> Option<&ResultSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn field_value(&self, field: FieldId) -> FieldValue {
        let value = self
            .surface
            .value(self.markup.input(field))
            .unwrap_or_default();
        FieldValue::new(field, value)
    }

    /// Write a user selection into the field's input.
    pub fn select(&mut self, field: FieldId, value: &str) {
        self.surface.set_value(self.markup.input(field), value);
    }

    /// Validate `fields` and, if all have a selection, leave `from` for the next stage.
    ///
    /// Only the Snellen stage is left this way; the duochrome stage goes through [`finalize`].
    ///
    /// [`finalize`]: FormFlowController::finalize
    pub fn attempt_advance(&mut self, from: Stage, fields: &[FieldId]) -> Result<bool, FlowError> {
        self.ensure_active(from)?;
        match from {
            Stage::Snellen => {}
            Stage::Duochrome => return Err(FlowError::SubmitRequired),
            Stage::Result => return Err(FlowError::Terminal),
        }

        if !self.validate(fields) {
            warn!(
                "[PHASE: flow] [STEP: advance] Blocked leaving {} stage: {} field(s) without a selection",
                from,
                self.visible_annotations().len()
            );
            return Ok(false);
        }

        let right = self.field_value(FieldId::RightEye).value;
        let left = self.field_value(FieldId::LeftEye).value;
        self.surface.set_value(&self.markup.carrier_right_eye, &right);
        self.surface.set_value(&self.markup.carrier_left_eye, &left);

        self.activate(Stage::Duochrome);
        Ok(true)
    }

    /// Submit the duochrome stage. The event's default action is suppressed whatever the
    /// outcome, so the flow never leaves the client.
    pub fn finalize(
        &mut self,
        event: &mut SubmitEvent,
        fields: &[FieldId],
    ) -> Result<bool, FlowError> {
        event.prevent_default();
        self.ensure_active(Stage::Duochrome)?;

        if !self.validate(fields) {
            warn!(
                "[PHASE: flow] [STEP: submit] Blocked submission: {} field(s) without a selection",
                self.visible_annotations().len()
            );
            return Ok(false);
        }

        let carried = |id: &str| self.surface.value(id).unwrap_or_default().to_string();
        let snapshot = ResultSnapshot {
            right_eye: carried(self.markup.carrier_right_eye.as_str()),
            left_eye: carried(self.markup.carrier_left_eye.as_str()),
            duochrome: self.field_value(FieldId::Duochrome).value,
        };

        let m = &self.markup;
        self.surface.set_text(&m.result_right_eye, &snapshot.right_eye);
        self.surface.set_text(&m.result_left_eye, &snapshot.left_eye);
        self.surface.set_text(&m.result_duochrome, &snapshot.duochrome);
        self.snapshot = Some(snapshot);

        self.activate(Stage::Result);
        Ok(true)
    }

    /// Leave the Snellen stage using its own fields.
    pub fn advance(&mut self) -> Result<bool, FlowError> {
        self.attempt_advance(Stage::Snellen, Stage::Snellen.fields())
    }

    /// Submit the duochrome stage using its own fields.
    pub fn submit(&mut self, event: &mut SubmitEvent) -> Result<bool, FlowError> {
        self.finalize(event, Stage::Duochrome.fields())
    }

    fn ensure_active(&self, stage: Stage) -> Result<(), FlowError> {
        if self.stage == stage {
            return Ok(());
        }
        if self.stage.is_terminal() {
            return Err(FlowError::Terminal);
        }
        Err(FlowError::StageMismatch {
            attempted: stage,
            active: self.stage,
        })
    }

    /// Annotate every empty field and hide the annotation of every filled one.
    fn validate(&mut self, fields: &[FieldId]) -> bool {
        let mut all_valid = true;
        for &field in fields {
            match self.field_value(field).require() {
                Ok(_) => {
                    if let Some(a) = self.annotations.get_mut(&field) {
                        a.visible = false;
                    }
                }
                Err(missing) => {
                    all_valid = false;
                    self.annotations
                        .entry(missing.field)
                        .and_modify(|a| {
                            a.message = MISSING_SELECTION_MESSAGE.to_string();
                            a.visible = true;
                        })
                        .or_insert_with(Annotation::missing_selection);
                }
            }
        }
        all_valid
    }

    fn activate(&mut self, next: Stage) {
        let from = self.stage;
        self.surface.set_hidden(self.markup.stage_container(from), true);
        self.surface.set_hidden(self.markup.stage_container(next), false);
        self.stage = next;
        info!("[PHASE: flow] [STEP: transition] {} -> {}", from, next);
    }
}
