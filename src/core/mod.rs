//! Core value types shared by every model and enumerator.
//!
//! This module contains the data that flows through exploration:
//! - Opaque control locations via the `Location` trait
//! - Dynamically typed variable values
//! - Immutable variable environments
//!
//! Nothing here performs evaluation; it is all plain data with
//! structural equality.

mod location;
mod value;

pub use location::Location;
pub use value::{Environment, Value};
