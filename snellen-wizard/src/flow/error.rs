use crate::models::form::Stage;
use thiserror::Error;

/// Misuse of the controller. A missing selection is not one of these; it is reported through
/// annotations and a `false` transition result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("markup element '{0}' is missing from the form surface")]
    MissingElement(String),

    #[error("transition attempted from the {attempted} stage while the {active} stage is active")]
    StageMismatch { attempted: Stage, active: Stage },

    #[error("the duochrome stage is left by submitting the form")]
    SubmitRequired,

    #[error("the result stage is terminal")]
    Terminal,
}
