//! Source models: program graphs and channel systems.
//!
//! A program graph is one sequential process: locations connected by
//! guarded transitions, a set of initial locations, and initialization
//! sequences that build the initial variable environments. A channel
//! system runs several program graphs side by side over one shared
//! environment.
//!
//! Both are read-only once exploration starts.

mod builder;
mod error;
mod transition;
mod validation;

pub use builder::ProgramGraphBuilder;
pub use error::BuildError;
pub use transition::{PgTransition, PgTransitionBuilder, TRUE_GUARD};
pub use validation::GraphViolation;

use crate::core::Location;
use std::collections::{HashMap, HashSet};

/// A single sequential process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramGraph<L: Location> {
    name: String,
    locations: HashSet<L>,
    initial_locations: HashSet<L>,
    transitions: Vec<PgTransition<L>>,
    initializations: Vec<Vec<String>>,
}

impl<L: Location> ProgramGraph<L> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            locations: HashSet::new(),
            initial_locations: HashSet::new(),
            transitions: Vec::new(),
            initializations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Add a location. Returns `false` if it was already present.
    pub fn add_location(&mut self, location: L) -> bool {
        self.locations.insert(location)
    }

    /// Mark or unmark `location` as initial.
    pub fn set_initial(&mut self, location: L, initial: bool) {
        if initial {
            self.initial_locations.insert(location);
        } else {
            self.initial_locations.remove(&location);
        }
    }

    pub fn add_transition(&mut self, transition: PgTransition<L>) {
        self.transitions.push(transition);
    }

    /// Add a sequence of actions that, applied in order to the empty
    /// environment, yields one initial environment.
    pub fn add_initialization<I, S>(&mut self, actions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initializations
            .push(actions.into_iter().map(Into::into).collect());
    }

    pub fn locations(&self) -> &HashSet<L> {
        &self.locations
    }

    pub fn initial_locations(&self) -> &HashSet<L> {
        &self.initial_locations
    }

    pub fn transitions(&self) -> &[PgTransition<L>] {
        &self.transitions
    }

    pub fn initializations(&self) -> &[Vec<String>] {
        &self.initializations
    }

    /// Indices into [`transitions`](Self::transitions), grouped by source
    /// location.
    pub fn outgoing(&self) -> HashMap<L, Vec<usize>> {
        let mut outgoing: HashMap<L, Vec<usize>> = HashMap::new();
        for (index, transition) in self.transitions.iter().enumerate() {
            outgoing
                .entry(transition.from.clone())
                .or_default()
                .push(index);
        }
        outgoing
    }
}

impl<L: Location> Default for ProgramGraph<L> {
    fn default() -> Self {
        Self::new()
    }
}

/// Program graphs composed for interleaved execution, indexed by process
/// number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelSystem<L: Location> {
    program_graphs: Vec<ProgramGraph<L>>,
}

impl<L: Location> ChannelSystem<L> {
    pub fn new(program_graphs: Vec<ProgramGraph<L>>) -> Self {
        Self { program_graphs }
    }

    pub fn program_graphs(&self) -> &[ProgramGraph<L>] {
        &self.program_graphs
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.program_graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.program_graphs.is_empty()
    }
}

impl<L: Location> FromIterator<ProgramGraph<L>> for ChannelSystem<L> {
    fn from_iter<I: IntoIterator<Item = ProgramGraph<L>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
