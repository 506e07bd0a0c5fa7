//! Enumeration of a single program graph.

use crate::core::{Environment, Location};
use crate::enumerate::{fold_initialization, StateEnumerator, TransitionInput};
use crate::eval::{Definitions, EvalError};
use crate::graph::{PgTransition, ProgramGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// A location of the graph paired with a variable environment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramState<L> {
    pub location: L,
    pub env: Environment,
}

impl<L: fmt::Debug> fmt::Display for ProgramState<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[location={:?}, eval={}]", self.location, self.env)
    }
}

/// An enabled program graph transition, identified by its index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PgInput {
    transition: usize,
    action: String,
}

impl PgInput {
    /// Index into [`ProgramGraph::transitions`].
    pub fn transition(&self) -> usize {
        self.transition
    }
}

impl TransitionInput for PgInput {
    fn action(&self) -> &str {
        &self.action
    }
}

/// Enumerates the states of one program graph.
pub struct ProgramGraphStateEnumerator<'a, L: Location> {
    graph: &'a ProgramGraph<L>,
    definitions: &'a Definitions,
    outgoing: HashMap<L, Vec<usize>>,
}

impl<'a, L: Location> ProgramGraphStateEnumerator<'a, L> {
    pub fn new(graph: &'a ProgramGraph<L>, definitions: &'a Definitions) -> Self {
        Self {
            graph,
            definitions,
            outgoing: graph.outgoing(),
        }
    }

    fn transition(&self, input: &PgInput) -> &'a PgTransition<L> {
        &self.graph.transitions()[input.transition]
    }

    /// Whether `transition` can fire from `env`: its guard holds and its
    /// action is applicable.
    fn is_enabled(&self, transition: &PgTransition<L>, env: &Environment) -> Result<bool, EvalError> {
        if !self.definitions.evaluate(env, transition.guard())? {
            return Ok(false);
        }
        Ok(self.definitions.effect(env, &transition.action)?.is_some())
    }
}

impl<'a, L: Location> StateEnumerator for ProgramGraphStateEnumerator<'a, L> {
    type State = ProgramState<L>;
    type Input = PgInput;

    /// One state per (initial location, initialization sequence) pair, each
    /// sequence folded from the empty environment. A graph without
    /// initializations starts from the empty environment.
    fn initial_states(&self) -> Result<Vec<Self::State>, EvalError> {
        let initializations = self.graph.initializations();
        let environments = if initializations.is_empty() {
            vec![Environment::new()]
        } else {
            initializations
                .iter()
                .map(|actions| fold_initialization(self.definitions, Environment::new(), actions))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(self
            .graph
            .initial_locations()
            .iter()
            .flat_map(|location| {
                environments.iter().map(move |env| ProgramState {
                    location: location.clone(),
                    env: env.clone(),
                })
            })
            .collect())
    }

    fn possible_inputs(&self, state: &Self::State) -> Result<Vec<Self::Input>, EvalError> {
        let Some(indices) = self.outgoing.get(&state.location) else {
            return Ok(Vec::new());
        };

        let mut inputs = Vec::new();
        for &index in indices {
            let transition = &self.graph.transitions()[index];
            if self.is_enabled(transition, &state.env)? {
                inputs.push(PgInput {
                    transition: index,
                    action: transition.action.clone(),
                });
            }
        }
        Ok(inputs)
    }

    fn next_state(&self, state: &Self::State, input: &Self::Input) -> Result<Self::State, EvalError> {
        let transition = self.transition(input);
        let env = self
            .definitions
            .effect(&state.env, &transition.action)?
            .ok_or_else(|| EvalError::InapplicableEffect {
                action: transition.action.clone(),
            })?;

        Ok(ProgramState {
            location: transition.to.clone(),
            env,
        })
    }

    fn labels(&self, state: &Self::State) -> BTreeSet<String> {
        state.env.propositions()
    }
}
