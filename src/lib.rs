//! Statespace: explicit-state enumeration of concurrent programs
//!
//! Statespace turns program graphs, and channel systems of several
//! synchronizing program graphs, into explicit transition systems ready for
//! model checking. Exploration is written once, against the
//! [`StateEnumerator`](enumerate::StateEnumerator) abstraction, and reused
//! for both source models.
//!
//! # Core Concepts
//!
//! - **Program graph**: locations joined by guarded transitions whose
//!   guards and actions are texts over a variable environment
//! - **Channel system**: program graphs running side by side over one shared
//!   environment, synchronizing through paired send/receive actions
//! - **Definitions**: the registered handlers that evaluate guard and action
//!   texts; exploration never interprets syntax itself
//! - **Transition system**: the explicit result, with states labeled by the
//!   `name = value` bindings of their environments
//!
//! # Example
//!
//! ```rust
//! use statespace::eval::Definitions;
//! use statespace::graph::{PgTransition, ProgramGraphBuilder};
//! use statespace::transition_system_from_program_graph;
//!
//! let graph = ProgramGraphBuilder::new()
//!     .initial("loop")
//!     .initialization(["x := 0"])
//!     .add_transition(PgTransition::new("loop", "x < 3", "x := x + 1", "loop"))
//!     .build()
//!     .unwrap();
//!
//! let ts = transition_system_from_program_graph(&graph, &Definitions::parser_based()).unwrap();
//!
//! assert_eq!(ts.state_count(), 4);
//! assert_eq!(ts.transition_count(), 3);
//! assert!(ts.atomic_propositions().contains("x = 3"));
//! ```

pub mod core;
pub mod enumerate;
pub mod eval;
pub mod graph;
pub mod system;

// Re-export commonly used types
pub use core::{Environment, Location, Value};
pub use enumerate::{ChannelSystemState, ProgramState, StateEnumerator};
pub use eval::{Definitions, EvalError};
pub use graph::{ChannelSystem, PgTransition, ProgramGraph, ProgramGraphBuilder};
pub use system::{
    transition_system_from_channel_system, transition_system_from_program_graph, Exploration,
    ExplorationOutcome, ExploreConfig, ExploreError, TransitionSystem, TransitionSystemBuilder,
};
