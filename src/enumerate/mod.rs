//! Lazy state-space enumeration.
//!
//! A [`StateEnumerator`] describes a state space without materializing
//! it: where exploration starts, which steps are enabled in a state, and
//! where each step leads. The transition system builder only talks to
//! this trait, so the same worklist runs over a single program graph or a
//! whole channel system.
//!
//! Enumerated states are plain values. Two states are the same state iff
//! their locations and full environments are equal, which is what the
//! builder's deduplication relies on.

mod channel_system;
mod program_graph;

pub use channel_system::{ChannelSystemState, ChannelSystemStateEnumerator, CsInput};
pub use program_graph::{PgInput, ProgramGraphStateEnumerator, ProgramState};

use crate::core::Environment;
use crate::eval::{Definitions, EvalError};
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;

/// One enabled outgoing step of a state.
pub trait TransitionInput: Debug {
    /// Action label recorded on the resulting transition.
    fn action(&self) -> &str;
}

/// Source of states and steps for exploration.
///
/// Implementations must be pure: calling any method twice with the same
/// arguments yields the same result. The order of the returned vectors
/// carries no meaning.
pub trait StateEnumerator {
    /// Enumerated state. Equality and hashing must be structural.
    type State: Clone + Eq + Hash + Debug;

    type Input: TransitionInput;

    fn initial_states(&self) -> Result<Vec<Self::State>, EvalError>;

    /// Every step enabled in `state`.
    fn possible_inputs(&self, state: &Self::State) -> Result<Vec<Self::Input>, EvalError>;

    /// The state reached from `state` by taking `input`.
    ///
    /// `input` must come from [`possible_inputs`](Self::possible_inputs)
    /// for the same state.
    fn next_state(&self, state: &Self::State, input: &Self::Input)
        -> Result<Self::State, EvalError>;

    /// Atomic propositions holding in `state`.
    fn labels(&self, state: &Self::State) -> BTreeSet<String>;
}

/// Apply initialization actions in order, starting from `env`.
fn fold_initialization<'s, I>(
    definitions: &Definitions,
    env: Environment,
    actions: I,
) -> Result<Environment, EvalError>
where
    I: IntoIterator<Item = &'s String>,
{
    actions.into_iter().try_fold(env, |env, action| {
        definitions
            .effect(&env, action)?
            .ok_or_else(|| EvalError::InapplicableInitialization {
                action: action.clone(),
            })
    })
}

/// Evaluate both guards of a rendezvous, short-circuiting on the first.
fn both_hold(
    definitions: &Definitions,
    env: &Environment,
    first: &str,
    second: &str,
) -> Result<bool, EvalError> {
    Ok(definitions.evaluate(env, first)? && definitions.evaluate(env, second)?)
}
