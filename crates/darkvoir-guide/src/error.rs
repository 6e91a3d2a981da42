//! Guide engine errors.
//!
//! Every variant is recoverable: the engine degrades to "skip, log,
//! continue" and never aborts the session on these.

use thiserror::Error;

use darkvoir_dom::DomError;

#[derive(Debug, Error)]
pub enum GuideError {
    /// No target criterion of the step resolved to a visible element.
    #[error("No element found for step {step_index}")]
    ElementNotFound { step_index: usize },

    /// A synthetic action failed against the resolved target. The step
    /// still counts as shown.
    #[error("Action execution failed: {0}")]
    ActionExecution(#[from] DomError),
}

pub type GuideResult<T> = Result<T, GuideError>;
