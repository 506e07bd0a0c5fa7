//! Location trait for program graph control points.
//!
//! The core never looks inside a location. It only compares, hashes and
//! clones them, so any value type with structural equality qualifies.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for program graph locations.
///
/// Locations are opaque to exploration. Two locations denote the same
/// control point iff they compare equal, and equal locations must hash
/// equally: state deduplication relies on it.
///
/// # Required Traits
///
/// - `Clone`: locations are copied into every enumerated state
/// - `Eq` + `Hash`: structural identity for deduplication
/// - `Debug`: diagnostics and violation messages
///
/// A blanket implementation covers every type with those bounds, so
/// strings, integers, tuples and plain enums all work out of the box.
///
/// # Example
///
/// ```rust
/// use statespace::core::Location;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Phase {
///     Idle,
///     Critical,
/// }
///
/// fn assert_location<L: Location>(_: &L) {}
///
/// assert_location(&Phase::Idle);
/// assert_location(&"l0");
/// assert_location(&(1u8, 2u8));
/// ```
pub trait Location: Clone + Eq + Hash + Debug + Send + Sync {}

impl<T> Location for T where T: Clone + Eq + Hash + Debug + Send + Sync {}
