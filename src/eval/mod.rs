//! Action and condition evaluation.
//!
//! Exploration never interprets guard or action text itself. It hands the
//! text to a set of registered handlers, tried in registration order, and
//! the first one that recognizes the text decides the outcome:
//!
//! - [`evaluate`] turns a condition into a boolean
//! - [`effect`] turns an action into a new environment, or `None` when the
//!   handler recognizes the action but it cannot fire from this environment
//!
//! Text that no handler recognizes is a malformed model and is reported as
//! an [`EvalError`].
//!
//! # Example
//!
//! ```rust
//! use statespace::core::{Environment, Value};
//! use statespace::eval::Definitions;
//!
//! let defs = Definitions::parser_based();
//! let env = Environment::new().with("x", 1);
//!
//! assert!(defs.evaluate(&env, "x < 2").unwrap());
//!
//! let next = defs.effect(&env, "x := x + 1").unwrap().unwrap();
//! assert_eq!(next.get("x"), Some(&Value::Int(2)));
//!
//! assert!(defs.is_one_sided("c!x"));
//! assert!(defs.is_matching("c!x|c?y"));
//! ```

mod dialect;
mod error;
mod handlers;

pub use error::EvalError;
pub use handlers::{ParserActionDef, ParserConditionDef, ParserInterleavingActionDef};

use crate::core::Environment;
use std::fmt;
use std::sync::Arc;

/// Handler for one dialect of action text.
pub trait ActionDef: Send + Sync {
    /// Whether this handler recognizes the action text.
    fn is_match(&self, action: &str) -> bool;

    /// Apply a recognized action.
    ///
    /// Returns a fresh environment; `env` is never modified. `Ok(None)`
    /// means the action is disabled in `env`.
    fn effect(&self, env: &Environment, action: &str) -> Result<Option<Environment>, EvalError>;
}

/// Handler for one dialect of condition text.
pub trait ConditionDef: Send + Sync {
    fn is_match(&self, condition: &str) -> bool;

    fn evaluate(&self, env: &Environment, condition: &str) -> Result<bool, EvalError>;
}

/// Handler for rendezvous actions between processes.
///
/// One-sided actions never fire alone. Two of them, joined as
/// `first|second`, form a synchronized action when
/// [`is_matching`](InterleavingActionDef::is_matching) accepts the
/// combined text; [`ActionDef::effect`] then applies it.
pub trait InterleavingActionDef: ActionDef {
    fn is_one_sided(&self, action: &str) -> bool;

    fn is_matching(&self, combined: &str) -> bool;
}

/// Join two one-sided actions into the text of a synchronized action.
pub fn combine(first: &str, second: &str) -> String {
    format!("{first}|{second}")
}

/// Apply `action` with the first handler that recognizes it.
pub fn effect(
    handlers: &[Arc<dyn ActionDef>],
    env: &Environment,
    action: &str,
) -> Result<Option<Environment>, EvalError> {
    handlers
        .iter()
        .find(|handler| handler.is_match(action))
        .ok_or_else(|| EvalError::UnrecognizedAction {
            action: action.to_string(),
        })?
        .effect(env, action)
}

/// Evaluate `condition` with the first handler that recognizes it.
pub fn evaluate(
    handlers: &[Arc<dyn ConditionDef>],
    env: &Environment,
    condition: &str,
) -> Result<bool, EvalError> {
    handlers
        .iter()
        .find(|handler| handler.is_match(condition))
        .ok_or_else(|| EvalError::UnrecognizedCondition {
            condition: condition.to_string(),
        })?
        .evaluate(env, condition)
}

/// Registered handlers used by the enumerators.
#[derive(Clone, Default)]
pub struct Definitions {
    actions: Vec<Arc<dyn ActionDef>>,
    conditions: Vec<Arc<dyn ConditionDef>>,
    interleaving: Vec<Arc<dyn InterleavingActionDef>>,
}

impl Definitions {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the parser-based handlers for the built-in dialect.
    pub fn parser_based() -> Self {
        Self::new()
            .with_action(ParserActionDef)
            .with_condition(ParserConditionDef)
            .with_interleaving(ParserInterleavingActionDef)
    }

    pub fn with_action<D: ActionDef + 'static>(mut self, def: D) -> Self {
        self.actions.push(Arc::new(def));
        self
    }

    pub fn with_condition<D: ConditionDef + 'static>(mut self, def: D) -> Self {
        self.conditions.push(Arc::new(def));
        self
    }

    pub fn with_interleaving<D: InterleavingActionDef + 'static>(mut self, def: D) -> Self {
        self.interleaving.push(Arc::new(def));
        self
    }

    pub fn effect(
        &self,
        env: &Environment,
        action: &str,
    ) -> Result<Option<Environment>, EvalError> {
        effect(&self.actions, env, action)
    }

    pub fn evaluate(&self, env: &Environment, condition: &str) -> Result<bool, EvalError> {
        evaluate(&self.conditions, env, condition)
    }

    /// Whether any registered interleaving handler treats `action` as one
    /// side of a rendezvous.
    pub fn is_one_sided(&self, action: &str) -> bool {
        self.interleaving.iter().any(|def| def.is_one_sided(action))
    }

    pub fn is_matching(&self, combined: &str) -> bool {
        self.interleaving.iter().any(|def| def.is_matching(combined))
    }

    /// Apply a synchronized action with the first handler that matches it.
    pub fn sync_effect(
        &self,
        env: &Environment,
        combined: &str,
    ) -> Result<Option<Environment>, EvalError> {
        self.interleaving
            .iter()
            .find(|def| def.is_matching(combined))
            .ok_or_else(|| EvalError::UnrecognizedAction {
                action: combined.to_string(),
            })?
            .effect(env, combined)
    }
}

impl fmt::Debug for Definitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definitions")
            .field("actions", &self.actions.len())
            .field("conditions", &self.conditions.len())
            .field("interleaving", &self.interleaving.len())
            .finish()
    }
}
