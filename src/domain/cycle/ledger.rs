//! Completion ledger - per-cycle completion state for each assignment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChoreId, PersonId};
use crate::domain::rotation::Assignment;

/// Completion state for one (person, chore) assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEntry {
    pub person: PersonId,
    pub chore: ChoreId,
    pub completed: bool,
}

/// Per-cycle completion state, one entry per assignment.
///
/// Entries are created `false` when the cycle's assignments are generated
/// and flip only through [`CompletionLedger::toggle`]. A fresh cycle always
/// starts from a fresh ledger; entries are never reset in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CompletionLedger {
    entries: Vec<CompletionEntry>,
}

impl CompletionLedger {
    /// Creates a ledger with an incomplete entry for every assignment.
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        Self {
            entries: assignments
                .iter()
                .map(|a| CompletionEntry {
                    person: a.person,
                    chore: a.chore,
                    completed: false,
                })
                .collect(),
        }
    }

    /// Returns the completion state for a pairing, if it exists.
    pub fn get(&self, person: PersonId, chore: ChoreId) -> Option<bool> {
        self.entries
            .iter()
            .find(|e| e.person == person && e.chore == chore)
            .map(|e| e.completed)
    }

    /// Flips the completion state for a pairing, returning the new state.
    ///
    /// Returns `None` when no such entry exists.
    pub fn toggle(&mut self, person: PersonId, chore: ChoreId) -> Option<bool> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.person == person && e.chore == chore)?;
        entry.completed = !entry.completed;
        Some(entry.completed)
    }

    /// Iterates all entries.
    pub fn iter(&self) -> impl Iterator<Item = &CompletionEntry> {
        self.entries.iter()
    }

    /// Returns the total number of entries.
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of completed entries.
    pub fn completed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.completed).count()
    }

    /// Returns (assigned, completed) counts for one person.
    pub fn person_counts(&self, person: PersonId) -> (usize, usize) {
        let assigned = self.entries.iter().filter(|e| e.person == person).count();
        let completed = self
            .entries
            .iter()
            .filter(|e| e.person == person && e.completed)
            .count();
        (assigned, completed)
    }
}
