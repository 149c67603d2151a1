//! State snapshot - the serializable whole of the rotation state.
//!
//! This is both the live aggregate owned by the application service and the
//! import/export document. Imports are validated structurally (serde rejects
//! missing fields) and semantically ([`StateSnapshot::validate`]) before
//! they replace any live state; statistics are never part of the document
//! and are always re-derived.

use serde::{Deserialize, Serialize};

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{CycleStatus, DomainError, Timestamp};
use crate::domain::roster::Roster;
use crate::domain::rotation::RotationSettings;
use crate::domain::violation::ViolationLog;

/// Current snapshot document version.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Snapshot bookkeeping: version, freshness, and the cycle counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Document format version.
    pub version: u32,
    /// When the state last changed.
    pub last_updated: Timestamp,
    /// Total cycles ever started; the next cycle's number.
    pub cycle_counter: u32,
}

/// The complete rotation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub metadata: SnapshotMetadata,
    pub roster: Roster,
    pub settings: RotationSettings,
    pub current_cycle: Option<Cycle>,
    pub cycle_history: Vec<Cycle>,
    pub violations: ViolationLog,
}

impl StateSnapshot {
    /// Creates a fresh state with no cycles and no violations.
    pub fn new(roster: Roster, settings: RotationSettings) -> Self {
        Self {
            metadata: SnapshotMetadata {
                version: SNAPSHOT_FORMAT_VERSION,
                last_updated: Timestamp::now(),
                cycle_counter: 0,
            },
            roster,
            settings,
            current_cycle: None,
            cycle_history: Vec::new(),
            violations: ViolationLog::new(),
        }
    }

    /// Checks the semantic invariants of an imported snapshot.
    ///
    /// # Errors
    ///
    /// Every failure carries the `MALFORMED_SNAPSHOT` code; the snapshot is
    /// rejected as a whole.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.metadata.version != SNAPSHOT_FORMAT_VERSION {
            return Err(DomainError::malformed_snapshot(format!(
                "Unsupported snapshot version {} (expected {})",
                self.metadata.version, SNAPSHOT_FORMAT_VERSION
            )));
        }

        self.roster
            .validate()
            .map_err(|e| DomainError::malformed_snapshot(format!("Invalid roster: {}", e)))?;
        self.settings
            .validate()
            .map_err(|e| DomainError::malformed_snapshot(format!("Invalid settings: {}", e)))?;

        if let Some(cycle) = &self.current_cycle {
            if cycle.status() != CycleStatus::Active {
                return Err(DomainError::malformed_snapshot(format!(
                    "Current cycle {} is not active",
                    cycle.id()
                )));
            }
            cycle.validate_against(&self.roster)?;
        }

        for cycle in &self.cycle_history {
            if cycle.status() != CycleStatus::Archived {
                return Err(DomainError::malformed_snapshot(format!(
                    "Historical cycle {} is not archived",
                    cycle.id()
                )));
            }
            cycle.validate_against(&self.roster)?;
        }

        let cycle_count =
            self.cycle_history.len() as u32 + u32::from(self.current_cycle.is_some());
        if self.metadata.cycle_counter < cycle_count {
            return Err(DomainError::malformed_snapshot(format!(
                "Cycle counter {} is below the {} cycles present",
                self.metadata.cycle_counter, cycle_count
            )));
        }

        for violation in self
            .violations
            .active()
            .iter()
            .chain(self.violations.history())
        {
            if !self.roster.contains_person(violation.person())
                || !self.roster.contains_chore(violation.chore())
            {
                return Err(DomainError::malformed_snapshot(format!(
                    "Violation {} references {} / {} outside the roster",
                    violation.id(),
                    violation.person(),
                    violation.chore()
                )));
            }
        }
        for violation in self.violations.active() {
            if violation.is_resolved() {
                return Err(DomainError::malformed_snapshot(format!(
                    "Active violation {} carries a resolution timestamp",
                    violation.id()
                )));
            }
        }
        for violation in self.violations.history() {
            if !violation.is_resolved() {
                return Err(DomainError::malformed_snapshot(format!(
                    "Historical violation {} has no resolution timestamp",
                    violation.id()
                )));
            }
        }

        Ok(())
    }
}
