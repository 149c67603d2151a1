//! Cycle aggregate entity.
//!
//! A cycle owns its assignments and their completion ledger; both live and
//! die with the cycle record (which itself is retained forever in history).
//! Violations reference a cycle by id only and are owned elsewhere.

use serde::{Deserialize, Serialize};

use crate::domain::cycle::{CompletionLedger, CycleWindow};
use crate::domain::foundation::{
    ChoreId, CycleId, CycleStatus, DomainError, ErrorCode, PersonId, Timestamp,
};
use crate::domain::roster::Roster;
use crate::domain::rotation::Assignment;

/// One rotation cycle: a dated window plus its assignments and completions.
///
/// # Invariants
///
/// - Each chore appears in at most one assignment
/// - The ledger holds exactly one entry per assignment
/// - Archived cycles are immutable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    /// Unique identifier for this cycle.
    id: CycleId,

    /// Human-facing sequence number (1-based, from the metadata counter).
    number: u32,

    /// Current status (Active or Archived).
    status: CycleStatus,

    /// When the cycle's work window opens.
    starts_at: Timestamp,

    /// Completion deadline.
    deadline: Timestamp,

    /// When the cycle record was created.
    created_at: Timestamp,

    /// The assignments for this cycle.
    assignments: Vec<Assignment>,

    /// Completion state, one entry per assignment.
    ledger: CompletionLedger,
}

impl Cycle {
    /// Creates a new active cycle with a fresh all-incomplete ledger.
    pub fn new(
        number: u32,
        window: CycleWindow,
        assignments: Vec<Assignment>,
        created_at: Timestamp,
    ) -> Self {
        let ledger = CompletionLedger::from_assignments(&assignments);
        Self {
            id: CycleId::new(),
            number,
            status: CycleStatus::Active,
            starts_at: window.starts_at,
            deadline: window.deadline,
            created_at,
            assignments,
            ledger,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the cycle ID.
    pub fn id(&self) -> CycleId {
        self.id
    }

    /// Returns the human-facing cycle number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns the current status.
    pub fn status(&self) -> CycleStatus {
        self.status
    }

    /// Returns when the cycle's window opens.
    pub fn starts_at(&self) -> Timestamp {
        self.starts_at
    }

    /// Returns the completion deadline.
    pub fn deadline(&self) -> Timestamp {
        self.deadline
    }

    /// Returns when the cycle record was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the assignments.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Returns the completion ledger.
    pub fn ledger(&self) -> &CompletionLedger {
        &self.ledger
    }

    /// Returns true if the pairing is an assignment of this cycle.
    pub fn has_assignment(&self, person: PersonId, chore: ChoreId) -> bool {
        self.assignments
            .iter()
            .any(|a| a.person == person && a.chore == chore)
    }

    /// Returns the chores assigned to one person, in assignment order.
    pub fn chores_for(&self, person: PersonId) -> Vec<ChoreId> {
        self.assignments
            .iter()
            .filter(|a| a.person == person)
            .map(|a| a.chore)
            .collect()
    }

    /// Returns true if the deadline has passed.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        now.is_after(&self.deadline)
    }

    /// Returns the assignments not yet marked complete.
    ///
    /// Combined with [`Cycle::is_overdue`] this is the deadline-passed
    /// violation check.
    pub fn incomplete_assignments(&self) -> Vec<Assignment> {
        self.ledger
            .iter()
            .filter(|e| !e.completed)
            .map(|e| Assignment::new(e.person, e.chore))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Flips the completion state of one assignment, returning the new state.
    ///
    /// # Errors
    ///
    /// - `CYCLE_ARCHIVED` if the cycle is no longer active
    /// - `ASSIGNMENT_NOT_FOUND` if the pairing is not assigned this cycle
    pub fn toggle_completion(
        &mut self,
        person: PersonId,
        chore: ChoreId,
    ) -> Result<bool, DomainError> {
        self.ensure_mutable()?;
        self.ledger.toggle(person, chore).ok_or_else(|| {
            DomainError::new(
                ErrorCode::AssignmentNotFound,
                format!("{} is not assigned {} this cycle", person, chore),
            )
        })
    }

    /// Archives the cycle. Irreversible.
    ///
    /// # Errors
    ///
    /// - `INVALID_STATE_TRANSITION` if already archived
    pub fn archive(&mut self) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&CycleStatus::Archived) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Cycle is already archived",
            ));
        }
        self.status = CycleStatus::Archived;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks this cycle's structural invariants against a roster.
    ///
    /// Used on snapshot import, where cycles arrive through deserialization
    /// rather than [`Cycle::new`].
    pub fn validate_against(&self, roster: &Roster) -> Result<(), DomainError> {
        let mut seen_chores = vec![false; roster.chore_count()];
        for a in &self.assignments {
            if !roster.contains_person(a.person) || !roster.contains_chore(a.chore) {
                return Err(DomainError::malformed_snapshot(format!(
                    "Cycle {} assignment references {} / {} outside the roster",
                    self.id, a.person, a.chore
                )));
            }
            if seen_chores[a.chore.index()] {
                return Err(DomainError::malformed_snapshot(format!(
                    "Cycle {} assigns {} twice",
                    self.id, a.chore
                )));
            }
            seen_chores[a.chore.index()] = true;
        }
        if self.ledger.total() != self.assignments.len() {
            return Err(DomainError::malformed_snapshot(format!(
                "Cycle {} ledger has {} entries for {} assignments",
                self.id,
                self.ledger.total(),
                self.assignments.len()
            )));
        }
        for a in &self.assignments {
            if self.ledger.get(a.person, a.chore).is_none() {
                return Err(DomainError::malformed_snapshot(format!(
                    "Cycle {} has no ledger entry for ({}, {})",
                    self.id, a.person, a.chore
                )));
            }
        }
        Ok(())
    }

    fn ensure_mutable(&self) -> Result<(), DomainError> {
        if self.status.is_mutable() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::CycleArchived,
                "Cannot modify an archived cycle",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cycle::schedule::next_cycle_window;
    use chrono::{NaiveDate, Weekday};

    fn window() -> CycleWindow {
        let now = Timestamp::start_of_day(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        next_cycle_window(now, Weekday::Tue, 3)
    }

    fn test_cycle() -> Cycle {
        Cycle::new(
            1,
            window(),
            vec![
                Assignment::new(PersonId::new(0), ChoreId::new(0)),
                Assignment::new(PersonId::new(1), ChoreId::new(1)),
            ],
            Timestamp::now(),
        )
    }

    #[test]
    fn new_cycle_is_active_with_incomplete_ledger() {
        let cycle = test_cycle();
        assert_eq!(cycle.status(), CycleStatus::Active);
        assert_eq!(cycle.ledger().total(), 2);
        assert_eq!(cycle.ledger().completed_count(), 0);
    }

    #[test]
    fn toggle_completion_returns_new_state() {
        let mut cycle = test_cycle();
        let state = cycle
            .toggle_completion(PersonId::new(0), ChoreId::new(0))
            .unwrap();
        assert!(state);
    }

    #[test]
    fn toggle_completion_twice_is_idempotent() {
        let mut cycle = test_cycle();
        cycle
            .toggle_completion(PersonId::new(0), ChoreId::new(0))
            .unwrap();
        let state = cycle
            .toggle_completion(PersonId::new(0), ChoreId::new(0))
            .unwrap();
        assert!(!state);
    }

    #[test]
    fn toggle_completion_rejects_unassigned_pairing() {
        let mut cycle = test_cycle();
        let err = cycle
            .toggle_completion(PersonId::new(0), ChoreId::new(1))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AssignmentNotFound);
    }

    #[test]
    fn toggle_completion_fails_when_archived() {
        let mut cycle = test_cycle();
        cycle.archive().unwrap();
        let err = cycle
            .toggle_completion(PersonId::new(0), ChoreId::new(0))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CycleArchived);
    }

    #[test]
    fn archive_twice_fails() {
        let mut cycle = test_cycle();
        cycle.archive().unwrap();
        let err = cycle.archive().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn incomplete_assignments_shrink_as_work_completes() {
        let mut cycle = test_cycle();
        assert_eq!(cycle.incomplete_assignments().len(), 2);
        cycle
            .toggle_completion(PersonId::new(1), ChoreId::new(1))
            .unwrap();
        let incomplete = cycle.incomplete_assignments();
        assert_eq!(incomplete, vec![Assignment::new(PersonId::new(0), ChoreId::new(0))]);
    }

    #[test]
    fn is_overdue_compares_against_deadline() {
        let cycle = test_cycle();
        assert!(!cycle.is_overdue(cycle.starts_at()));
        assert!(cycle.is_overdue(cycle.deadline().add_days(1)));
    }

    #[test]
    fn validate_against_catches_out_of_range_ids() {
        let roster = Roster::new(
            vec!["A".to_string()],
            vec!["c1".to_string()],
        )
        .unwrap();
        let cycle = test_cycle(); // references person#1 / chore#1
        assert!(cycle.validate_against(&roster).is_err());
    }

    #[test]
    fn validate_against_accepts_well_formed_cycle() {
        let roster = Roster::new(
            vec!["A".to_string(), "B".to_string()],
            vec!["c1".to_string(), "c2".to_string()],
        )
        .unwrap();
        assert!(test_cycle().validate_against(&roster).is_ok());
    }
}
