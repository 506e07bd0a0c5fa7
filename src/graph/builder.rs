//! Builder for constructing program graphs.

use crate::core::Location;
use crate::graph::error::BuildError;
use crate::graph::transition::{PgTransition, PgTransitionBuilder};
use crate::graph::ProgramGraph;
use stillwater::validation::Validation;

/// Builder for constructing program graphs with a fluent API.
///
/// Endpoints of added transitions and initial locations are registered as
/// locations automatically. A builder started with
/// [`from_graph`](Self::from_graph) inherits whatever the existing graph
/// contains, so [`build`](Self::build) checks it with
/// [`ProgramGraph::validate`].
pub struct ProgramGraphBuilder<L: Location> {
    graph: ProgramGraph<L>,
}

impl<L: Location> ProgramGraphBuilder<L> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            graph: ProgramGraph::new(),
        }
    }

    /// Continue building from an existing, possibly hand-assembled graph.
    pub fn from_graph(graph: ProgramGraph<L>) -> Self {
        Self { graph }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.graph.set_name(name);
        self
    }

    /// Add a location with no transitions yet.
    pub fn location(mut self, location: L) -> Self {
        self.graph.add_location(location);
        self
    }

    /// Mark a location as initial (at least one is required).
    pub fn initial(mut self, location: L) -> Self {
        self.graph.add_location(location.clone());
        self.graph.set_initial(location, true);
        self
    }

    /// Add one initialization sequence.
    pub fn initialization<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.graph.add_initialization(actions);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(self, builder: PgTransitionBuilder<L>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        Ok(self.add_transition(transition))
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: PgTransition<L>) -> Self {
        self.graph.add_location(transition.from.clone());
        self.graph.add_location(transition.to.clone());
        self.graph.add_transition(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(self, transitions: Vec<PgTransition<L>>) -> Self {
        transitions
            .into_iter()
            .fold(self, |builder, transition| builder.add_transition(transition))
    }

    /// Build the program graph.
    /// Returns an error if required fields are missing or the graph
    /// references locations it does not contain.
    pub fn build(self) -> Result<ProgramGraph<L>, BuildError> {
        if self.graph.initial_locations().is_empty() {
            return Err(BuildError::MissingInitialLocation);
        }
        match self.graph.validate() {
            Validation::Success(()) => Ok(self.graph),
            Validation::Failure(violations) => Err(BuildError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }
}

impl<L: Location> Default for ProgramGraphBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}
