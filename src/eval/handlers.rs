//! Parser-based handlers for the built-in dialect.

use crate::core::Environment;
use crate::eval::dialect::{self, ChannelOp};
use crate::eval::{ActionDef, ConditionDef, EvalError, InterleavingActionDef};

/// Assignments (`x := expr`), `skip`, and `;`-separated sequences of them.
///
/// The empty action is the identity. These actions are always applicable.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParserActionDef;

impl ActionDef for ParserActionDef {
    fn is_match(&self, action: &str) -> bool {
        dialect::parse_action(action).is_some()
    }

    fn effect(&self, env: &Environment, action: &str) -> Result<Option<Environment>, EvalError> {
        let statements =
            dialect::parse_action(action).ok_or_else(|| EvalError::UnrecognizedAction {
                action: action.to_string(),
            })?;
        dialect::execute(&statements, env).map(Some)
    }
}

/// Boolean expressions. The empty condition holds everywhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParserConditionDef;

impl ConditionDef for ParserConditionDef {
    fn is_match(&self, condition: &str) -> bool {
        condition.trim().is_empty() || dialect::parse_condition(condition).is_some()
    }

    fn evaluate(&self, env: &Environment, condition: &str) -> Result<bool, EvalError> {
        if condition.trim().is_empty() {
            return Ok(true);
        }
        dialect::parse_condition(condition)
            .ok_or_else(|| EvalError::UnrecognizedCondition {
                condition: condition.to_string(),
            })?
            .holds(env)
    }
}

/// Rendezvous over named channels.
///
/// `c!expr` sends and `c?x` receives. `c!e|c?x` and `c?x|c!e` both match
/// and assign the value of `e` to `x`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParserInterleavingActionDef;

impl ParserInterleavingActionDef {
    fn rendezvous(combined: &str) -> Option<(ChannelOp, ChannelOp)> {
        let (first, second) = dialect::parse_sync(combined)?;
        if first.channel() != second.channel() {
            return None;
        }
        match (first, second) {
            (send @ ChannelOp::Send { .. }, receive @ ChannelOp::Receive { .. })
            | (receive @ ChannelOp::Receive { .. }, send @ ChannelOp::Send { .. }) => {
                Some((send, receive))
            }
            _ => None,
        }
    }
}

impl ActionDef for ParserInterleavingActionDef {
    fn is_match(&self, action: &str) -> bool {
        self.is_matching(action)
    }

    fn effect(&self, env: &Environment, action: &str) -> Result<Option<Environment>, EvalError> {
        let not_matching = || EvalError::UnrecognizedAction {
            action: action.to_string(),
        };
        match Self::rendezvous(action).ok_or_else(not_matching)? {
            (ChannelOp::Send { value, .. }, ChannelOp::Receive { target, .. }) => {
                let value = value.eval(env)?;
                Ok(Some(env.with(target, value)))
            }
            _ => Err(not_matching()),
        }
    }
}

impl InterleavingActionDef for ParserInterleavingActionDef {
    fn is_one_sided(&self, action: &str) -> bool {
        dialect::parse_one_sided(action).is_some()
    }

    fn is_matching(&self, combined: &str) -> bool {
        Self::rendezvous(combined).is_some()
    }
}
