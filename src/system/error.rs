//! Errors raised while building transition systems.

use crate::eval::EvalError;
use thiserror::Error;

/// A mutation referenced an element the transition system does not contain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SystemError {
    #[error("State {state} is not part of the transition system")]
    StateNotFound { state: String },

    #[error("Action {action} is not part of the transition system")]
    ActionNotFound { action: String },

    #[error("Atomic proposition {proposition} is not part of the transition system")]
    PropositionNotFound { proposition: String },
}

/// Exploration failure.
#[derive(Debug, Error)]
pub enum ExploreError {
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("transition system error: {0}")]
    System(#[from] SystemError),
}
