//! Evaluation errors.

use thiserror::Error;

/// Errors raised while evaluating guards and actions.
///
/// All of these indicate a malformed model. A handler declining to apply
/// an action it recognizes is not an error; it is reported as `Ok(None)`
/// by the effect functions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("No registered action handler recognizes '{action}'")]
    UnrecognizedAction { action: String },

    #[error("No registered condition handler recognizes '{condition}'")]
    UnrecognizedCondition { condition: String },

    #[error("Variable '{name}' is not bound in the environment")]
    UnboundVariable { name: String },

    #[error("Operator '{op}' expects {expected}, found {found}")]
    TypeMismatch {
        op: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Integer overflow")]
    IntegerOverflow,

    #[error("Initialization action '{action}' is not applicable")]
    InapplicableInitialization { action: String },

    #[error("Action '{action}' became inapplicable while computing a successor")]
    InapplicableEffect { action: String },
}
