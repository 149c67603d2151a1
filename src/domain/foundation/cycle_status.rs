//! CycleStatus enum for tracking lifecycle of rotation cycles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a rotation cycle.
///
/// A cycle is created Active, and becomes Archived exactly once, when the
/// next cycle replaces it. Archiving is irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    #[default]
    Active,
    Archived,
}

impl CycleStatus {
    /// Returns true if the cycle can be modified.
    pub fn is_mutable(&self) -> bool {
        matches!(self, CycleStatus::Active)
    }

    /// Validates a transition from this status to another.
    ///
    /// The only valid transition is Active -> Archived.
    pub fn can_transition_to(&self, target: &CycleStatus) -> bool {
        matches!((self, target), (CycleStatus::Active, CycleStatus::Archived))
    }
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CycleStatus::Active => "Active",
            CycleStatus::Archived => "Archived",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_active() {
        assert_eq!(CycleStatus::default(), CycleStatus::Active);
    }

    #[test]
    fn only_active_is_mutable() {
        assert!(CycleStatus::Active.is_mutable());
        assert!(!CycleStatus::Archived.is_mutable());
    }

    #[test]
    fn active_can_transition_to_archived() {
        assert!(CycleStatus::Active.can_transition_to(&CycleStatus::Archived));
    }

    #[test]
    fn archived_cannot_transition_to_anything() {
        assert!(!CycleStatus::Archived.can_transition_to(&CycleStatus::Active));
        assert!(!CycleStatus::Archived.can_transition_to(&CycleStatus::Archived));
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&CycleStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&CycleStatus::Archived).unwrap(),
            "\"archived\""
        );
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let status: CycleStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, CycleStatus::Archived);
    }
}
