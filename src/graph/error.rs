//! Build errors for program graph and transition builders.

use crate::graph::validation::GraphViolation;
use thiserror::Error;

/// Errors that can occur when building program graphs and transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No initial location specified. Call .initial(location) before .build()")]
    MissingInitialLocation,

    #[error("Transition source location not specified. Call .from(location)")]
    MissingFromLocation,

    #[error("Transition target location not specified. Call .to(location)")]
    MissingToLocation,

    #[error("Transition action not specified. Call .action(text) or .skip()")]
    MissingAction,

    #[error("Program graph has {} broken location reference(s)", .0.len())]
    Invalid(Vec<GraphViolation>),
}
