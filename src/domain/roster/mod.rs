//! Roster - the fixed ordered list of people and chores.
//!
//! The roster is configuration data, not computed state: people and chores
//! are never created or destroyed at runtime. All other domain types refer
//! to roster members by index ([`PersonId`] / [`ChoreId`]), so the roster's
//! ordering is part of its identity and must stay stable across snapshots.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChoreId, PersonId, ValidationError};

/// The built-in sample household: 8 people, 16 chores.
static DEFAULT_HOUSEHOLD: Lazy<Roster> = Lazy::new(|| {
    let people = [
        "Oliver", "Spencer", "Ben", "Isaac", "Jason", "Jonah", "Nahum", "Adam",
    ];
    let chores = [
        "Second-floor bathroom, mop floor & toilet",
        "Ground-floor washing sink",
        "Sweep kitchen",
        "Sweep living room",
        "Ground-floor bathroom & toilet",
        "Recycling and trash disposal (out by Thursday night)",
        "Vacuum kitchen",
        "Vacuum living room",
        "Mop down kitchen",
        "Kitchen & dining-room tables: cloth replacement & wipe-down",
        "Replace foil in cooking stove",
        "Wipe down kitchen stove, knobs, and surfaces",
        "Wipe down kitchen countertops",
        "General tidy-up of common spaces",
        "Vacuum stairs",
        "Hefker sweep ground floor living room - clean up items and trash",
    ];
    Roster::new(
        people.iter().map(|s| s.to_string()).collect(),
        chores.iter().map(|s| s.to_string()).collect(),
    )
    .unwrap()
});

/// Shape of a roster configuration file.
#[derive(Debug, Deserialize)]
struct RosterFile {
    people: Vec<String>,
    chores: Vec<String>,
}

/// Fixed ordered roster of person names and chore descriptions.
///
/// # Invariants
///
/// - No name or description is empty or whitespace-only
/// - Names and descriptions are unique within their list
///
/// Empty lists are representable (the generator rejects them with
/// `INVALID_ROSTER` at generation time) so that a roster can be built up
/// incrementally by configuration tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    people: Vec<String>,
    chores: Vec<String>,
}

impl Roster {
    /// Creates a roster from ordered people and chore lists.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if any entry is empty or whitespace-only
    /// - `InvalidFormat` if an entry appears twice in its list
    pub fn new(people: Vec<String>, chores: Vec<String>) -> Result<Self, ValidationError> {
        Self::validate_entries("people", &people)?;
        Self::validate_entries("chores", &chores)?;
        Ok(Self { people, chores })
    }

    /// Parses a roster from a YAML document with `people:` and `chores:` lists.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ValidationError> {
        let file: RosterFile = serde_yaml::from_str(yaml)
            .map_err(|e| ValidationError::invalid_format("roster", e.to_string()))?;
        Self::new(file.people, file.chores)
    }

    /// Returns the built-in sample household roster.
    pub fn default_household() -> Self {
        DEFAULT_HOUSEHOLD.clone()
    }

    /// Re-checks the roster invariants.
    ///
    /// Used when a roster arrives through deserialization rather than
    /// [`Roster::new`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        Self::validate_entries("people", &self.people)?;
        Self::validate_entries("chores", &self.chores)
    }

    /// Returns the number of people.
    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    /// Returns the number of chores.
    pub fn chore_count(&self) -> usize {
        self.chores.len()
    }

    /// Returns true if the roster has at least one person and one chore.
    pub fn is_generatable(&self) -> bool {
        !self.people.is_empty() && !self.chores.is_empty()
    }

    /// Returns the display name for a person, if the id is in range.
    pub fn person_name(&self, id: PersonId) -> Option<&str> {
        self.people.get(id.index()).map(String::as_str)
    }

    /// Returns the description for a chore, if the id is in range.
    pub fn chore_text(&self, id: ChoreId) -> Option<&str> {
        self.chores.get(id.index()).map(String::as_str)
    }

    /// Returns true if the person id is in range for this roster.
    pub fn contains_person(&self, id: PersonId) -> bool {
        id.index() < self.people.len()
    }

    /// Returns true if the chore id is in range for this roster.
    pub fn contains_chore(&self, id: ChoreId) -> bool {
        id.index() < self.chores.len()
    }

    /// Iterates people in roster order.
    pub fn person_ids(&self) -> impl Iterator<Item = PersonId> + '_ {
        (0..self.people.len()).map(PersonId::new)
    }

    /// Iterates chores in roster order.
    pub fn chore_ids(&self) -> impl Iterator<Item = ChoreId> + '_ {
        (0..self.chores.len()).map(ChoreId::new)
    }

    /// Looks up a person by exact name.
    pub fn find_person(&self, name: &str) -> Option<PersonId> {
        self.people.iter().position(|p| p == name).map(PersonId::new)
    }

    /// Looks up a chore by exact description.
    pub fn find_chore(&self, text: &str) -> Option<ChoreId> {
        self.chores.iter().position(|c| c == text).map(ChoreId::new)
    }

    fn validate_entries(field: &str, entries: &[String]) -> Result<(), ValidationError> {
        for (i, entry) in entries.iter().enumerate() {
            if entry.trim().is_empty() {
                return Err(ValidationError::empty_field(format!("{}[{}]", field, i)));
            }
            if entries[..i].contains(entry) {
                return Err(ValidationError::invalid_format(
                    field,
                    format!("duplicate entry '{}'", entry),
                ));
            }
        }
        Ok(())
    }
}
