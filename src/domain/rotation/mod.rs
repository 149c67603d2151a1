//! Rotation module - assignment generation for the next cycle.
//!
//! The generator is a pure function over the roster, the previous cycle's
//! assignments, and the configured per-person chore limits. Randomness is
//! injected by the caller so tests can seed it.

mod generator;
mod settings;

pub use generator::generate;
pub use settings::{ChoreLimits, RotationSettings};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChoreId, PersonId};

/// A (person, chore) pairing scoped to exactly one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub person: PersonId,
    pub chore: ChoreId,
}

impl Assignment {
    /// Creates an assignment pairing.
    pub fn new(person: PersonId, chore: ChoreId) -> Self {
        Self { person, chore }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_serializes_with_named_fields() {
        let a = Assignment::new(PersonId::new(1), ChoreId::new(4));
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, r#"{"person":1,"chore":4}"#);
    }
}
