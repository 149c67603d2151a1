//! Strongly-typed identifier value objects.
//!
//! People and chores are identified by their position in the fixed roster,
//! not by their display text, so a chore description containing a hyphen (or
//! anything else) can never corrupt a key. Cycles and violations get random
//! UUIDs since they are created at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Index of a person in the roster's ordered people list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(usize);

impl PersonId {
    /// Creates a PersonId from a roster index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the roster index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "person#{}", self.0)
    }
}

/// Index of a chore in the roster's ordered chore list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoreId(usize);

impl ChoreId {
    /// Creates a ChoreId from a roster index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the roster index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ChoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chore#{}", self.0)
    }
}

/// Unique identifier for a rotation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(Uuid);

impl CycleId {
    /// Creates a new random CycleId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a CycleId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CycleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CycleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a recorded violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationId(Uuid);

impl ViolationId {
    /// Creates a new random ViolationId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ViolationId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ViolationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViolationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ViolationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_id_preserves_index() {
        let id = PersonId::new(3);
        assert_eq!(id.index(), 3);
    }

    #[test]
    fn person_id_serializes_as_bare_number() {
        let json = serde_json::to_string(&PersonId::new(5)).unwrap();
        assert_eq!(json, "5");
    }

    #[test]
    fn chore_id_serializes_as_bare_number() {
        let json = serde_json::to_string(&ChoreId::new(12)).unwrap();
        assert_eq!(json, "12");
    }

    #[test]
    fn chore_id_roundtrips_through_json() {
        let id = ChoreId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        let back: ChoreId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn cycle_id_generates_unique_values() {
        let id1 = CycleId::new();
        let id2 = CycleId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn cycle_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: CycleId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn violation_id_generates_unique_values() {
        let id1 = ViolationId::new();
        let id2 = ViolationId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn violation_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = ViolationId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }
}
