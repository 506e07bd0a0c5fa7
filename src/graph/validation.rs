//! Structural validation of program graphs.
//!
//! Exploration assumes every transition endpoint and every initial
//! location belongs to the graph. Graphs assembled by hand can check that
//! up front; all violations are reported at once rather than stopping at
//! the first.

use crate::core::Location;
use crate::graph::ProgramGraph;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A broken reference inside a program graph.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphViolation {
    #[error("Initial location {location} is not a location of the graph")]
    UnknownInitialLocation { location: String },

    #[error("Transition {index} starts at unknown location {location}")]
    UnknownFromLocation { index: usize, location: String },

    #[error("Transition {index} ends at unknown location {location}")]
    UnknownToLocation { index: usize, location: String },
}

impl<L: Location> ProgramGraph<L> {
    /// Check every location reference, accumulating ALL violations.
    /// Returns `Validation::Success(())` if the graph is well formed.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<GraphViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<GraphViolation>>> = Vec::new();

        for location in self.initial_locations() {
            checks.push(self.require(location, || GraphViolation::UnknownInitialLocation {
                location: format!("{location:?}"),
            }));
        }

        for (index, transition) in self.transitions().iter().enumerate() {
            checks.push(self.require(&transition.from, || {
                GraphViolation::UnknownFromLocation {
                    index,
                    location: format!("{:?}", transition.from),
                }
            }));
            checks.push(self.require(&transition.to, || GraphViolation::UnknownToLocation {
                index,
                location: format!("{:?}", transition.to),
            }));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    fn require<F>(&self, location: &L, violation: F) -> Validation<(), NonEmptyVec<GraphViolation>>
    where
        F: FnOnce() -> GraphViolation,
    {
        if self.locations().contains(location) {
            Validation::success(())
        } else {
            Validation::fail(violation())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PgTransition;

    #[test]
    fn validation_accumulates_all_violations() {
        let mut graph = ProgramGraph::new();
        graph.add_location("a");
        graph.set_initial("start", true);
        graph.add_transition(PgTransition::new("a", "", "skip", "b"));
        graph.add_transition(PgTransition::new("c", "", "skip", "a"));

        match graph.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);

                let has_initial = errors
                    .iter()
                    .any(|e| matches!(e, GraphViolation::UnknownInitialLocation { .. }));
                let has_to = errors
                    .iter()
                    .any(|e| matches!(e, GraphViolation::UnknownToLocation { index: 0, .. }));
                let has_from = errors
                    .iter()
                    .any(|e| matches!(e, GraphViolation::UnknownFromLocation { index: 1, .. }));

                assert!(has_initial);
                assert!(has_to);
                assert!(has_from);
            }
            Validation::Success(_) => panic!("Expected violations, got success"),
        }
    }

    #[test]
    fn well_formed_graph_passes() {
        let mut graph = ProgramGraph::new();
        graph.add_location(1);
        graph.add_location(2);
        graph.set_initial(1, true);
        graph.add_transition(PgTransition::new(1, "", "skip", 2));

        assert!(graph.validate().is_success());
    }

    #[test]
    fn empty_graph_is_valid() {
        let graph: ProgramGraph<u32> = ProgramGraph::new();
        assert!(graph.validate().is_success());
    }

    #[test]
    fn violation_messages_name_the_location() {
        let mut graph = ProgramGraph::new();
        graph.set_initial("ghost", true);

        let result = graph.validate();
        assert!(result.is_failure());
        if let Validation::Failure(errors) = result {
            let message = errors.iter().next().unwrap().to_string();
            assert!(message.contains("\"ghost\""));
        }
    }
}
