//! Exploration bounds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Limits applied to a single exploration.
///
/// Both limits are off by default, in which case exploration runs until no
/// new state is found and does not terminate on an infinite state space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreConfig {
    /// Maximum number of frontier expansions.
    pub max_depth: Option<usize>,
    /// Maximum number of distinct states.
    pub max_states: Option<usize>,
}

impl ExploreConfig {
    /// No limits.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_max_states(mut self, states: usize) -> Self {
        self.max_states = Some(states);
        self
    }

    pub fn is_bounded(&self) -> bool {
        self.max_depth.is_some() || self.max_states.is_some()
    }

    pub(crate) fn depth_reached(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth >= max)
    }

    pub(crate) fn states_reached(&self, states: usize) -> bool {
        self.max_states.is_some_and(|max| states >= max)
    }
}

/// How an exploration ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplorationOutcome {
    /// Fixed point reached: every reachable state is in the system.
    Complete,
    /// Stopped by [`ExploreConfig::max_depth`].
    DepthLimit,
    /// Stopped by [`ExploreConfig::max_states`].
    StateLimit,
}

impl ExplorationOutcome {
    pub fn is_complete(self) -> bool {
        self == ExplorationOutcome::Complete
    }
}

impl fmt::Display for ExplorationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExplorationOutcome::Complete => "complete",
            ExplorationOutcome::DepthLimit => "depth limit reached",
            ExplorationOutcome::StateLimit => "state limit reached",
        })
    }
}
