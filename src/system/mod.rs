//! Explicit transition systems and their construction.
//!
//! A [`TransitionSystem`] stores every distinct state once, in an arena,
//! and refers to it by [`StateId`] afterwards. Transitions and labels are
//! kept by id, so checking whether a state was already seen is a single
//! hash lookup.
//!
//! The mutation API is strict: an initial state, transition or label may
//! only mention states, actions and propositions that were added first.
//! [`TransitionSystemBuilder`] respects that order when it populates a
//! system from a [`StateEnumerator`](crate::enumerate::StateEnumerator).

mod builder;
mod config;
mod error;

pub use builder::{
    transition_system_from_channel_system, transition_system_from_enumerator,
    transition_system_from_program_graph, Exploration, TransitionSystemBuilder,
};
pub use config::{ExplorationOutcome, ExploreConfig};
pub use error::{ExploreError, SystemError};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Index;

/// Position of a state in the arena, assigned on first insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A `(from, action, to)` triple.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transition<S, A> {
    pub from: S,
    pub action: A,
    pub to: S,
}

impl<S, A> Transition<S, A> {
    pub fn new(from: S, action: A, to: S) -> Self {
        Self { from, action, to }
    }
}

/// States, initial states, actions, transitions, atomic propositions and
/// the labeling of states with propositions.
#[derive(Clone, Debug)]
pub struct TransitionSystem<S, A = String, P = String> {
    states: Vec<S>,
    index: HashMap<S, StateId>,
    initial: BTreeSet<StateId>,
    actions: HashSet<A>,
    transitions: HashSet<Transition<StateId, A>>,
    propositions: HashSet<P>,
    labels: Vec<HashSet<P>>,
}

impl<S, A, P> TransitionSystem<S, A, P>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
    P: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            index: HashMap::new(),
            initial: BTreeSet::new(),
            actions: HashSet::new(),
            transitions: HashSet::new(),
            propositions: HashSet::new(),
            labels: Vec::new(),
        }
    }

    /// Add `state` unless it is already present, returning its id and
    /// whether it was new.
    pub fn insert_state(&mut self, state: S) -> (StateId, bool) {
        if let Some(&id) = self.index.get(&state) {
            return (id, false);
        }
        let id = StateId(self.states.len());
        self.index.insert(state.clone(), id);
        self.states.push(state);
        self.labels.push(HashSet::new());
        (id, true)
    }

    /// Add `state` unless it is already present.
    pub fn add_state(&mut self, state: S) -> StateId {
        self.insert_state(state).0
    }

    pub fn state_id(&self, state: &S) -> Option<StateId> {
        self.index.get(state).copied()
    }

    pub fn state(&self, id: StateId) -> Option<&S> {
        self.states.get(id.0)
    }

    pub fn contains_state(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }

    /// States in insertion order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.states.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &S)> {
        self.states
            .iter()
            .enumerate()
            .map(|(index, state)| (StateId(index), state))
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Mark an existing state as initial.
    pub fn add_initial_state(&mut self, state: &S) -> Result<StateId, SystemError> {
        let id = self.require_state(state)?;
        self.initial.insert(id);
        Ok(id)
    }

    pub fn add_initial_by_id(&mut self, id: StateId) -> Result<(), SystemError> {
        self.require_id(id)?;
        self.initial.insert(id);
        Ok(())
    }

    pub fn is_initial(&self, state: &S) -> bool {
        self.state_id(state)
            .is_some_and(|id| self.initial.contains(&id))
    }

    pub fn initial_states(&self) -> impl Iterator<Item = &S> {
        self.initial.iter().map(|id| &self.states[id.0])
    }

    pub fn initial_ids(&self) -> &BTreeSet<StateId> {
        &self.initial
    }

    /// Returns `false` if the action was already present.
    pub fn add_action(&mut self, action: A) -> bool {
        self.actions.insert(action)
    }

    pub fn actions(&self) -> &HashSet<A> {
        &self.actions
    }

    /// Add a transition between existing states over an existing action.
    /// Returns `false` if the transition was already present.
    pub fn add_transition(&mut self, transition: Transition<S, A>) -> Result<bool, SystemError> {
        let from = self.require_state(&transition.from)?;
        let to = self.require_state(&transition.to)?;
        self.add_transition_by_id(from, transition.action, to)
    }

    pub fn add_transition_by_id(
        &mut self,
        from: StateId,
        action: A,
        to: StateId,
    ) -> Result<bool, SystemError> {
        self.require_id(from)?;
        self.require_id(to)?;
        if !self.actions.contains(&action) {
            return Err(SystemError::ActionNotFound {
                action: format!("{action:?}"),
            });
        }
        Ok(self.transitions.insert(Transition::new(from, action, to)))
    }

    /// Transitions with their endpoints resolved, in no particular order.
    pub fn transitions(&self) -> impl Iterator<Item = Transition<&S, &A>> {
        self.transitions.iter().map(|t| Transition {
            from: &self.states[t.from.0],
            action: &t.action,
            to: &self.states[t.to.0],
        })
    }

    pub fn transition_ids(&self) -> impl Iterator<Item = &Transition<StateId, A>> {
        self.transitions.iter()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn add_atomic_proposition(&mut self, proposition: P) -> bool {
        self.propositions.insert(proposition)
    }

    pub fn atomic_propositions(&self) -> &HashSet<P> {
        &self.propositions
    }

    /// Label an existing state with an existing proposition.
    pub fn add_to_label(&mut self, state: &S, proposition: P) -> Result<(), SystemError> {
        let id = self.require_state(state)?;
        self.add_label_by_id(id, proposition)
    }

    pub fn add_label_by_id(&mut self, id: StateId, proposition: P) -> Result<(), SystemError> {
        self.require_id(id)?;
        if !self.propositions.contains(&proposition) {
            return Err(SystemError::PropositionNotFound {
                proposition: format!("{proposition:?}"),
            });
        }
        self.labels[id.0].insert(proposition);
        Ok(())
    }

    /// Propositions labeling `state`, or `None` for an unknown state.
    pub fn labels_of(&self, state: &S) -> Option<&HashSet<P>> {
        self.state_id(state).map(|id| &self.labels[id.0])
    }

    pub fn labels_by_id(&self, id: StateId) -> Option<&HashSet<P>> {
        self.labels.get(id.0)
    }

    fn require_state(&self, state: &S) -> Result<StateId, SystemError> {
        self.state_id(state).ok_or_else(|| SystemError::StateNotFound {
            state: format!("{state:?}"),
        })
    }

    fn require_id(&self, id: StateId) -> Result<(), SystemError> {
        if id.0 < self.states.len() {
            Ok(())
        } else {
            Err(SystemError::StateNotFound {
                state: format!("{id:?}"),
            })
        }
    }
}

impl<S, A, P> Default for TransitionSystem<S, A, P>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
    P: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A, P> Index<StateId> for TransitionSystem<S, A, P> {
    type Output = S;

    fn index(&self, id: StateId) -> &S {
        &self.states[id.0]
    }
}
