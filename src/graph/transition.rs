//! Guarded program graph transitions and their builder.

use crate::core::Location;
use crate::graph::error::BuildError;
use serde::{Deserialize, Serialize};

/// Guard text used when a transition has none.
pub const TRUE_GUARD: &str = "true";

/// A guarded, labeled edge of a program graph.
///
/// `condition` and `action` are texts interpreted by the registered
/// handlers. An empty condition stands for [`TRUE_GUARD`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PgTransition<L> {
    pub from: L,
    pub condition: String,
    pub action: String,
    pub to: L,
}

impl<L> PgTransition<L> {
    pub fn new(
        from: L,
        condition: impl Into<String>,
        action: impl Into<String>,
        to: L,
    ) -> Self {
        let condition = condition.into();
        Self {
            from,
            condition: if condition.trim().is_empty() {
                TRUE_GUARD.to_string()
            } else {
                condition
            },
            action: action.into(),
            to,
        }
    }

    /// Condition text, defaulted to [`TRUE_GUARD`] when empty.
    pub fn guard(&self) -> &str {
        if self.condition.trim().is_empty() {
            TRUE_GUARD
        } else {
            &self.condition
        }
    }
}

/// Builder for constructing transitions with a fluent API.
pub struct PgTransitionBuilder<L> {
    from: Option<L>,
    to: Option<L>,
    condition: Option<String>,
    action: Option<String>,
}

impl<L: Location> PgTransitionBuilder<L> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            condition: None,
            action: None,
        }
    }

    /// Set the source location (required).
    pub fn from(mut self, location: L) -> Self {
        self.from = Some(location);
        self
    }

    /// Set the target location (required).
    pub fn to(mut self, location: L) -> Self {
        self.to = Some(location);
        self
    }

    /// Add a guard (optional, defaults to `true`).
    pub fn when(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Set the action text (required).
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Use the no-op action.
    pub fn skip(self) -> Self {
        self.action("skip")
    }

    /// Build the transition.
    pub fn build(self) -> Result<PgTransition<L>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromLocation)?;
        let to = self.to.ok_or(BuildError::MissingToLocation)?;
        let action = self.action.ok_or(BuildError::MissingAction)?;

        Ok(PgTransition::new(
            from,
            self.condition.unwrap_or_default(),
            action,
            to,
        ))
    }
}

impl<L: Location> Default for PgTransitionBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestLocation {
        Idle,
        Busy,
    }

    #[test]
    fn empty_guard_defaults_to_true() {
        let transition = PgTransition::new(TestLocation::Idle, "", "x := 1", TestLocation::Busy);
        assert_eq!(transition.condition, TRUE_GUARD);
        assert_eq!(transition.guard(), TRUE_GUARD);

        let raw = PgTransition {
            from: TestLocation::Idle,
            condition: String::new(),
            action: "skip".to_string(),
            to: TestLocation::Idle,
        };
        assert_eq!(raw.guard(), TRUE_GUARD);
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = PgTransitionBuilder::<TestLocation>::new()
            .from(TestLocation::Idle)
            .build();

        assert_eq!(result, Err(BuildError::MissingToLocation));

        let result = PgTransitionBuilder::<TestLocation>::new()
            .to(TestLocation::Idle)
            .skip()
            .build();

        assert_eq!(result, Err(BuildError::MissingFromLocation));
    }

    #[test]
    fn builder_validates_missing_action() {
        let result = PgTransitionBuilder::<TestLocation>::new()
            .from(TestLocation::Idle)
            .to(TestLocation::Busy)
            .build();

        assert_eq!(result, Err(BuildError::MissingAction));
    }

    #[test]
    fn fluent_api_builds_transition() {
        let transition = PgTransitionBuilder::new()
            .from(TestLocation::Idle)
            .to(TestLocation::Busy)
            .when("x < 3")
            .action("x := x + 1")
            .build()
            .unwrap();

        assert_eq!(
            transition,
            PgTransition::new(TestLocation::Idle, "x < 3", "x := x + 1", TestLocation::Busy)
        );
    }

    #[test]
    fn transition_serializes_correctly() {
        let transition = PgTransition::new(TestLocation::Idle, "", "c!1", TestLocation::Busy);
        let json = serde_json::to_string(&transition).unwrap();
        let back: PgTransition<TestLocation> = serde_json::from_str(&json).unwrap();
        assert_eq!(transition, back);
    }
}
