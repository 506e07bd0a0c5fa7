//! Worklist construction of transition systems.

use crate::core::Location;
use crate::enumerate::{
    ChannelSystemState, ChannelSystemStateEnumerator, ProgramGraphStateEnumerator, ProgramState,
    StateEnumerator, TransitionInput,
};
use crate::eval::Definitions;
use crate::graph::{ChannelSystem, ProgramGraph};
use crate::system::config::{ExplorationOutcome, ExploreConfig};
use crate::system::error::ExploreError;
use crate::system::{StateId, TransitionSystem};
use tracing::{debug, info, trace};

/// Result of an exploration.
#[derive(Clone, Debug)]
pub struct Exploration<S> {
    pub system: TransitionSystem<S>,
    pub outcome: ExplorationOutcome,
    /// Number of frontier expansions performed.
    pub depth: usize,
}

/// Breadth-first builder of transition systems.
///
/// Starting from the initial states, each frontier is expanded in full:
/// every enabled input of every frontier state yields a transition, and
/// successors not seen before form the next frontier. Without limits this
/// runs to a fixed point.
#[derive(Clone, Debug, Default)]
pub struct TransitionSystemBuilder {
    config: ExploreConfig,
}

impl TransitionSystemBuilder {
    pub fn new(config: ExploreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExploreConfig {
        &self.config
    }

    /// Explore the state space of `enumerator`.
    ///
    /// When a limit stops the traversal the returned system is still
    /// consistent: every transition connects registered states, and every
    /// registered state is labeled. States on the last frontier simply have
    /// no outgoing transitions recorded.
    pub fn explore<E: StateEnumerator>(
        &self,
        enumerator: &E,
    ) -> Result<Exploration<E::State>, ExploreError> {
        let mut system = TransitionSystem::new();
        let mut frontier = Vec::new();

        for state in enumerator.initial_states()? {
            let (id, fresh) = system.insert_state(state);
            system.add_initial_by_id(id)?;
            if fresh {
                frontier.push(id);
            }
        }

        info!(
            initial_states = frontier.len(),
            max_depth = ?self.config.max_depth,
            max_states = ?self.config.max_states,
            "starting exploration"
        );

        let mut depth = 0;
        let mut outcome = ExplorationOutcome::Complete;

        'levels: while !frontier.is_empty() {
            if self.config.depth_reached(depth) {
                outcome = ExplorationOutcome::DepthLimit;
                break;
            }
            debug!(depth, frontier = frontier.len(), "expanding frontier");

            let mut next = Vec::new();
            for &from in &frontier {
                let state = system[from].clone();
                for input in enumerator.possible_inputs(&state)? {
                    let successor = enumerator.next_state(&state, &input)?;
                    let to = match system.state_id(&successor) {
                        Some(to) => to,
                        None => {
                            if self.config.states_reached(system.state_count()) {
                                outcome = ExplorationOutcome::StateLimit;
                                break 'levels;
                            }
                            trace!(depth, state = ?successor, "discovered state");
                            let to = system.add_state(successor);
                            next.push(to);
                            to
                        }
                    };

                    let action = input.action().to_string();
                    system.add_action(action.clone());
                    system.add_transition_by_id(from, action, to)?;
                }
            }

            depth += 1;
            frontier = next;
        }

        label(&mut system, enumerator)?;

        info!(
            states = system.state_count(),
            transitions = system.transition_count(),
            actions = system.actions().len(),
            depth,
            %outcome,
            "exploration finished"
        );

        Ok(Exploration {
            system,
            outcome,
            depth,
        })
    }
}

/// Register the labels of every state.
fn label<E: StateEnumerator>(
    system: &mut TransitionSystem<E::State>,
    enumerator: &E,
) -> Result<(), ExploreError> {
    let labels: Vec<(StateId, _)> = system
        .iter()
        .map(|(id, state)| (id, enumerator.labels(state)))
        .collect();

    for (id, propositions) in labels {
        for proposition in propositions {
            system.add_atomic_proposition(proposition.clone());
            system.add_label_by_id(id, proposition)?;
        }
    }
    Ok(())
}

/// Explore `enumerator` to a fixed point.
pub fn transition_system_from_enumerator<E: StateEnumerator>(
    enumerator: &E,
) -> Result<TransitionSystem<E::State>, ExploreError> {
    Ok(TransitionSystemBuilder::default().explore(enumerator)?.system)
}

/// The full transition system of a program graph.
pub fn transition_system_from_program_graph<L: Location>(
    graph: &ProgramGraph<L>,
    definitions: &Definitions,
) -> Result<TransitionSystem<ProgramState<L>>, ExploreError> {
    transition_system_from_enumerator(&ProgramGraphStateEnumerator::new(graph, definitions))
}

/// The full transition system of a channel system.
pub fn transition_system_from_channel_system<L: Location>(
    system: &ChannelSystem<L>,
    definitions: &Definitions,
) -> Result<TransitionSystem<ChannelSystemState<L>>, ExploreError> {
    transition_system_from_enumerator(&ChannelSystemStateEnumerator::new(system, definitions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::EvalError;
    use std::collections::BTreeSet;

    /// Counter modulo `modulus`, stepping by 1 or 2.
    struct Ring {
        modulus: u32,
        starts: Vec<u32>,
    }

    #[derive(Debug)]
    struct Step(u32);

    impl TransitionInput for Step {
        fn action(&self) -> &str {
            if self.0 == 1 {
                "inc"
            } else {
                "jump"
            }
        }
    }

    impl StateEnumerator for Ring {
        type State = u32;
        type Input = Step;

        fn initial_states(&self) -> Result<Vec<u32>, EvalError> {
            Ok(self.starts.clone())
        }

        fn possible_inputs(&self, _state: &u32) -> Result<Vec<Step>, EvalError> {
            Ok(vec![Step(1), Step(2)])
        }

        fn next_state(&self, state: &u32, input: &Step) -> Result<u32, EvalError> {
            Ok((state + input.0) % self.modulus)
        }

        fn labels(&self, state: &u32) -> BTreeSet<String> {
            if state % 2 == 0 {
                BTreeSet::from(["even".to_string()])
            } else {
                BTreeSet::new()
            }
        }
    }

    /// Fails once it leaves the start state.
    struct Broken;

    impl StateEnumerator for Broken {
        type State = u8;
        type Input = Step;

        fn initial_states(&self) -> Result<Vec<u8>, EvalError> {
            Ok(vec![0])
        }

        fn possible_inputs(&self, state: &u8) -> Result<Vec<Step>, EvalError> {
            if *state == 0 {
                Ok(vec![Step(1)])
            } else {
                Err(EvalError::UnboundVariable {
                    name: "x".to_string(),
                })
            }
        }

        fn next_state(&self, _state: &u8, _input: &Step) -> Result<u8, EvalError> {
            Ok(1)
        }

        fn labels(&self, _state: &u8) -> BTreeSet<String> {
            BTreeSet::new()
        }
    }

    #[test]
    fn explores_to_fixed_point() {
        let ring = Ring {
            modulus: 4,
            starts: vec![0],
        };
        let exploration = TransitionSystemBuilder::default().explore(&ring).unwrap();
        let ts = &exploration.system;

        assert_eq!(exploration.outcome, ExplorationOutcome::Complete);
        assert_eq!(ts.state_count(), 4);
        assert_eq!(ts.transition_count(), 8);
        assert_eq!(ts.actions().len(), 2);
        assert_eq!(ts.initial_states().collect::<Vec<_>>(), vec![&0]);
    }

    #[test]
    fn duplicate_initial_states_collapse() {
        let ring = Ring {
            modulus: 3,
            starts: vec![1, 1, 2],
        };
        let ts = transition_system_from_enumerator(&ring).unwrap();

        assert_eq!(ts.initial_ids().len(), 2);
        assert_eq!(ts.state_count(), 3);
    }

    #[test]
    fn every_state_is_labeled() {
        let ring = Ring {
            modulus: 5,
            starts: vec![0],
        };
        let ts = transition_system_from_enumerator(&ring).unwrap();

        for state in ts.states() {
            let labels = ts.labels_of(state).unwrap();
            assert_eq!(labels.contains("even"), state % 2 == 0);
        }
        assert_eq!(ts.atomic_propositions().len(), 1);
    }

    #[test]
    fn depth_limit_stops_expansion() {
        let ring = Ring {
            modulus: 100,
            starts: vec![0],
        };
        let exploration = TransitionSystemBuilder::new(ExploreConfig::unbounded().with_max_depth(1))
            .explore(&ring)
            .unwrap();

        assert_eq!(exploration.outcome, ExplorationOutcome::DepthLimit);
        assert_eq!(exploration.depth, 1);
        assert_eq!(exploration.system.state_count(), 3);
        assert_eq!(exploration.system.transition_count(), 2);
    }

    #[test]
    fn state_limit_stops_registration() {
        let ring = Ring {
            modulus: 100,
            starts: vec![0],
        };
        let exploration = TransitionSystemBuilder::new(ExploreConfig::unbounded().with_max_states(4))
            .explore(&ring)
            .unwrap();

        assert_eq!(exploration.outcome, ExplorationOutcome::StateLimit);
        assert_eq!(exploration.system.state_count(), 4);
        for transition in exploration.system.transitions() {
            assert!(exploration.system.contains_state(transition.to));
        }
    }

    #[test]
    fn evaluation_errors_abort_exploration() {
        let result = TransitionSystemBuilder::default().explore(&Broken);
        assert!(matches!(
            result,
            Err(ExploreError::Eval(EvalError::UnboundVariable { .. }))
        ));
    }
}
