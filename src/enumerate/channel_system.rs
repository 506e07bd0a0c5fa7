//! Enumeration of channel systems.
//!
//! A state holds one location per process and a single environment shared
//! by all of them. Ordinary actions interleave: one process moves, the
//! others stay put. One-sided actions (sends and receives) never fire
//! alone; they fire as a pair with a matching partner in another process,
//! moving both processes in a single step.

use crate::core::{Environment, Location};
use crate::enumerate::{both_hold, fold_initialization, StateEnumerator, TransitionInput};
use crate::eval::{combine, Definitions, EvalError};
use crate::graph::{ChannelSystem, PgTransition};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// One location per process plus the shared environment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelSystemState<L> {
    pub locations: Vec<L>,
    pub env: Environment,
}

impl<L: fmt::Debug> fmt::Display for ChannelSystemState<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[location=")?;
        for (i, location) in self.locations.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{location:?}")?;
        }
        write!(f, ", eval={}]", self.env)
    }
}

/// An enabled step with its successor already computed.
///
/// The successor is fixed when the step is found to be enabled, so the
/// enablement check and the transition can never disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsInput<L> {
    next: ChannelSystemState<L>,
    action: String,
}

impl<L> CsInput<L> {
    pub fn next(&self) -> &ChannelSystemState<L> {
        &self.next
    }
}

impl<L: fmt::Debug> TransitionInput for CsInput<L> {
    fn action(&self) -> &str {
        &self.action
    }
}

/// Enumerates the states of a channel system.
pub struct ChannelSystemStateEnumerator<'a, L: Location> {
    system: &'a ChannelSystem<L>,
    definitions: &'a Definitions,
    outgoing: Vec<HashMap<L, Vec<usize>>>,
}

impl<'a, L: Location> ChannelSystemStateEnumerator<'a, L> {
    pub fn new(system: &'a ChannelSystem<L>, definitions: &'a Definitions) -> Self {
        Self {
            system,
            definitions,
            outgoing: system.program_graphs().iter().map(|pg| pg.outgoing()).collect(),
        }
    }

    /// Transitions of `process` leaving `location`.
    fn outgoing<'s>(
        &'s self,
        process: usize,
        location: &L,
    ) -> impl Iterator<Item = &'a PgTransition<L>> + 's {
        let transitions = self.system.program_graphs()[process].transitions();
        self.outgoing[process]
            .get(location)
            .into_iter()
            .flatten()
            .map(move |&index| &transitions[index])
    }

    /// Every combination of initial locations, one per process.
    fn initial_location_tuples(&self) -> Vec<Vec<L>> {
        let mut tuples: Vec<Vec<L>> = vec![Vec::new()];
        for graph in self.system.program_graphs() {
            tuples = tuples
                .iter()
                .flat_map(|prefix| {
                    graph.initial_locations().iter().map(move |location| {
                        let mut tuple = prefix.clone();
                        tuple.push(location.clone());
                        tuple
                    })
                })
                .collect();
        }
        tuples
    }

    fn step(
        state: &ChannelSystemState<L>,
        moves: &[(usize, &PgTransition<L>)],
        env: Environment,
        action: String,
    ) -> CsInput<L> {
        let mut locations = state.locations.clone();
        for (process, transition) in moves {
            locations[*process] = transition.to.clone();
        }
        CsInput {
            next: ChannelSystemState { locations, env },
            action,
        }
    }

    /// Ordinary step of process `i` alone.
    fn interleave(
        &self,
        state: &ChannelSystemState<L>,
        i: usize,
        transition: &PgTransition<L>,
        inputs: &mut Vec<CsInput<L>>,
    ) -> Result<(), EvalError> {
        if !self.definitions.evaluate(&state.env, transition.guard())? {
            return Ok(());
        }
        if let Some(env) = self.definitions.effect(&state.env, &transition.action)? {
            inputs.push(Self::step(state, &[(i, transition)], env, transition.action.clone()));
        }
        Ok(())
    }

    /// Pair the one-sided `transition` of process `i` with every matching
    /// one-sided transition of a process `j > i`.
    fn rendezvous(
        &self,
        state: &ChannelSystemState<L>,
        i: usize,
        transition: &PgTransition<L>,
        inputs: &mut Vec<CsInput<L>>,
    ) -> Result<(), EvalError> {
        for j in i + 1..state.locations.len() {
            for partner in self.outgoing(j, &state.locations[j]) {
                if !self.definitions.is_one_sided(&partner.action) {
                    continue;
                }

                let action = combine(&transition.action, &partner.action);
                if !self.definitions.is_matching(&action) {
                    continue;
                }
                if !both_hold(
                    self.definitions,
                    &state.env,
                    transition.guard(),
                    partner.guard(),
                )? {
                    continue;
                }

                if let Some(env) = self.definitions.sync_effect(&state.env, &action)? {
                    inputs.push(Self::step(
                        state,
                        &[(i, transition), (j, partner)],
                        env,
                        action,
                    ));
                }
            }
        }
        Ok(())
    }
}

impl<'a, L: Location> StateEnumerator for ChannelSystemStateEnumerator<'a, L> {
    type State = ChannelSystemState<L>;
    type Input = CsInput<L>;

    /// Initialization sequences of all processes, in process order, are
    /// folded into one shared environment; it is paired with every tuple of
    /// initial locations.
    fn initial_states(&self) -> Result<Vec<Self::State>, EvalError> {
        let actions = self
            .system
            .program_graphs()
            .iter()
            .flat_map(|graph| graph.initializations())
            .flatten();
        let env = fold_initialization(self.definitions, Environment::new(), actions)?;

        Ok(self
            .initial_location_tuples()
            .into_iter()
            .map(|locations| ChannelSystemState {
                locations,
                env: env.clone(),
            })
            .collect())
    }

    fn possible_inputs(&self, state: &Self::State) -> Result<Vec<Self::Input>, EvalError> {
        let mut inputs = Vec::new();
        for (i, location) in state.locations.iter().enumerate() {
            for transition in self.outgoing(i, location) {
                if self.definitions.is_one_sided(&transition.action) {
                    self.rendezvous(state, i, transition, &mut inputs)?;
                } else {
                    self.interleave(state, i, transition, &mut inputs)?;
                }
            }
        }
        Ok(inputs)
    }

    fn next_state(&self, _state: &Self::State, input: &Self::Input) -> Result<Self::State, EvalError> {
        Ok(input.next.clone())
    }

    fn labels(&self, state: &Self::State) -> BTreeSet<String> {
        state.env.propositions()
    }
}
