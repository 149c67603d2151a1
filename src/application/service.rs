//! RotationService - the single controller owning the rotation state.
//!
//! All state lives in one [`StateSnapshot`] owned here; every operation runs
//! synchronously to completion, so the operations behave atomically with
//! respect to each other. Fallible work happens before any mutation: a
//! failed operation leaves the prior state valid and queryable.

use rand::Rng;
use tracing::{info, warn};

use crate::domain::cycle::{next_cycle_window, Cycle};
use crate::domain::foundation::{
    ChoreId, CycleId, DomainError, ErrorCode, PersonId, Timestamp, ViolationId,
};
use crate::domain::roster::Roster;
use crate::domain::rotation::{self, Assignment, RotationSettings};
use crate::domain::snapshot::StateSnapshot;
use crate::domain::statistics::{self, StatisticsReport};
use crate::domain::violation::Violation;

/// Command/query surface over the rotation state.
#[derive(Debug)]
pub struct RotationService {
    state: StateSnapshot,
}

impl RotationService {
    /// Creates a service over a fresh state: no cycles, no violations.
    pub fn new(roster: Roster, settings: RotationSettings) -> Self {
        Self {
            state: StateSnapshot::new(roster, settings),
        }
    }

    /// Creates a service from a previously exported snapshot.
    ///
    /// # Errors
    ///
    /// - `MALFORMED_SNAPSHOT` if the snapshot fails validation
    pub fn from_snapshot(snapshot: StateSnapshot) -> Result<Self, DomainError> {
        snapshot.validate()?;
        Ok(Self { state: snapshot })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the full state.
    pub fn state(&self) -> &StateSnapshot {
        &self.state
    }

    /// Returns the roster.
    pub fn roster(&self) -> &Roster {
        &self.state.roster
    }

    /// Returns the active cycle, if one has been started.
    pub fn current_cycle(&self) -> Option<&Cycle> {
        self.state.current_cycle.as_ref()
    }

    /// Computes the statistics report. Derived on every call.
    pub fn statistics(&self) -> StatisticsReport {
        statistics::compute(
            &self.state.roster,
            self.state.current_cycle.as_ref(),
            &self.state.cycle_history,
            &self.state.violations,
        )
    }

    /// Clones the state for export.
    pub fn export_snapshot(&self) -> StateSnapshot {
        self.state.clone()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Starts the next cycle: archives the active cycle, generates fresh
    /// assignments, applies carry-over violations, and initializes a fresh
    /// completion ledger.
    ///
    /// # Errors
    ///
    /// - `INVALID_ROSTER` if the roster has no people or no chores
    /// - `VALIDATION_FAILED` if the stored settings are unusable
    ///
    /// On error nothing is archived and nothing changes.
    pub fn start_new_cycle(&mut self) -> Result<Cycle, DomainError> {
        self.start_new_cycle_at(Timestamp::now(), &mut rand::thread_rng())
    }

    /// [`RotationService::start_new_cycle`] with an explicit clock and RNG.
    pub fn start_new_cycle_at(
        &mut self,
        now: Timestamp,
        rng: &mut impl Rng,
    ) -> Result<Cycle, DomainError> {
        let limits = self.state.settings.limits()?;
        let weekday = self.state.settings.weekday()?;

        let previous: Vec<Assignment> = self
            .state
            .current_cycle
            .as_ref()
            .map(|c| c.assignments().to_vec())
            .unwrap_or_default();

        // All fallible work happens before any state change.
        let mut assignments =
            rotation::generate(&self.state.roster, &previous, limits, rng)?;

        let outcomes =
            self.state
                .violations
                .apply_carry_overs(&mut assignments, &previous, limits, now);
        for outcome in &outcomes {
            info!(
                violation = %outcome.violation,
                person = %outcome.person,
                chore = %outcome.chore,
                "carry-over pairing forced into new cycle"
            );
            if outcome.left_short {
                warn!(
                    displaced = ?outcome.displaced,
                    "displaced person left below minimum; violator had no chore to hand back"
                );
            }
        }

        if let Some(mut outgoing) = self.state.current_cycle.take() {
            outgoing.archive()?;
            self.state.cycle_history.push(outgoing);
        }

        let number = self.state.metadata.cycle_counter + 1;
        let window = next_cycle_window(now, weekday, self.state.settings.cycle_length_days);
        let cycle = Cycle::new(number, window, assignments, now);
        info!(
            cycle = %cycle.id(),
            number,
            starts_at = %cycle.starts_at().as_datetime(),
            deadline = %cycle.deadline().as_datetime(),
            "started new cycle"
        );

        self.state.metadata.cycle_counter = number;
        self.state.metadata.last_updated = now;
        self.state.current_cycle = Some(cycle.clone());
        Ok(cycle)
    }

    /// Records a violation against the current cycle.
    ///
    /// # Errors
    ///
    /// - `INVALID_SELECTION` if there is no active cycle or the pairing is
    ///   not one of its assignments; no state changes
    pub fn record_violation(
        &mut self,
        person: PersonId,
        chore: ChoreId,
        at: Timestamp,
        carry_over: bool,
    ) -> Result<Violation, DomainError> {
        let cycle = self.state.current_cycle.as_ref().ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidSelection,
                "No active cycle to record a violation against",
            )
        })?;
        if !cycle.has_assignment(person, chore) {
            return Err(DomainError::new(
                ErrorCode::InvalidSelection,
                format!("{} is not assigned {} in the current cycle", person, chore),
            ));
        }

        let cycle_id = cycle.id();
        let violation = self
            .state
            .violations
            .record(person, chore, cycle_id, at, carry_over)
            .clone();
        info!(
            violation = %violation.id(),
            person = %person,
            chore = %chore,
            carry_over,
            "violation recorded"
        );
        self.state.metadata.last_updated = at;
        Ok(violation)
    }

    /// Resolves an active violation manually.
    ///
    /// # Errors
    ///
    /// - `VIOLATION_NOT_FOUND` if the id is not in the active set
    pub fn resolve_violation(&mut self, id: ViolationId) -> Result<(), DomainError> {
        self.resolve_violation_at(id, Timestamp::now())
    }

    /// [`RotationService::resolve_violation`] with an explicit clock.
    pub fn resolve_violation_at(
        &mut self,
        id: ViolationId,
        at: Timestamp,
    ) -> Result<(), DomainError> {
        self.state.violations.resolve(id, at)?;
        info!(violation = %id, "violation resolved");
        self.state.metadata.last_updated = at;
        Ok(())
    }

    /// Flips the completion state of one assignment, returning the new
    /// state.
    ///
    /// # Errors
    ///
    /// - `CYCLE_NOT_FOUND` for an unknown cycle id
    /// - `CYCLE_ARCHIVED` when the cycle is in history (immutable)
    /// - `ASSIGNMENT_NOT_FOUND` for a pairing the cycle does not contain
    pub fn toggle_completion(
        &mut self,
        cycle_id: CycleId,
        person: PersonId,
        chore: ChoreId,
    ) -> Result<bool, DomainError> {
        self.toggle_completion_at(cycle_id, person, chore, Timestamp::now())
    }

    /// [`RotationService::toggle_completion`] with an explicit clock.
    pub fn toggle_completion_at(
        &mut self,
        cycle_id: CycleId,
        person: PersonId,
        chore: ChoreId,
        at: Timestamp,
    ) -> Result<bool, DomainError> {
        if let Some(cycle) = self
            .state
            .current_cycle
            .as_mut()
            .filter(|c| c.id() == cycle_id)
        {
            let state = cycle.toggle_completion(person, chore)?;
            self.state.metadata.last_updated = at;
            return Ok(state);
        }
        if self.state.cycle_history.iter().any(|c| c.id() == cycle_id) {
            return Err(DomainError::new(
                ErrorCode::CycleArchived,
                "Cannot modify an archived cycle",
            ));
        }
        Err(DomainError::new(
            ErrorCode::CycleNotFound,
            format!("No cycle with id {}", cycle_id),
        ))
    }

    /// Replaces the live state with an imported snapshot.
    ///
    /// # Errors
    ///
    /// - `MALFORMED_SNAPSHOT` if validation fails; the live state is kept
    ///   untouched (no partial merge)
    pub fn import_snapshot(&mut self, snapshot: StateSnapshot) -> Result<(), DomainError> {
        snapshot.validate()?;
        info!(
            cycles = snapshot.cycle_history.len() + usize::from(snapshot.current_cycle.is_some()),
            "snapshot imported"
        );
        self.state = snapshot;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster() -> Roster {
        Roster::new(
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec![
                "c1".to_string(),
                "c2".to_string(),
                "c3".to_string(),
                "c4".to_string(),
                "c5".to_string(),
                "c6".to_string(),
            ],
        )
        .unwrap()
    }

    fn service() -> RotationService {
        RotationService::new(roster(), RotationSettings::default())
    }

    fn rotate(service: &mut RotationService, seed: u64) -> Cycle {
        service
            .start_new_cycle_at(Timestamp::now(), &mut StdRng::seed_from_u64(seed))
            .unwrap()
    }

    #[test]
    fn first_cycle_assigns_everything() {
        let mut service = service();
        let cycle = rotate(&mut service, 1);

        assert_eq!(cycle.assignments().len(), 6);
        assert_eq!(cycle.number(), 1);
        assert_eq!(service.state().metadata.cycle_counter, 1);
        assert!(service.state().cycle_history.is_empty());
    }

    #[test]
    fn second_cycle_archives_the_first() {
        let mut service = service();
        let first = rotate(&mut service, 1);
        let second = rotate(&mut service, 2);

        assert_ne!(first.id(), second.id());
        assert_eq!(second.number(), 2);
        assert_eq!(service.state().cycle_history.len(), 1);
        assert_eq!(service.state().cycle_history[0].id(), first.id());
        assert!(!service.state().cycle_history[0].status().is_mutable());
    }

    #[test]
    fn empty_roster_fails_without_archiving() {
        let empty = Roster::new(Vec::new(), Vec::new()).unwrap();
        let mut service = RotationService::new(empty, RotationSettings::default());

        let err = service
            .start_new_cycle_at(Timestamp::now(), &mut StdRng::seed_from_u64(0))
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidRoster);
        assert!(service.current_cycle().is_none());
        assert_eq!(service.state().metadata.cycle_counter, 0);
    }

    #[test]
    fn record_violation_requires_current_assignment() {
        let mut service = service();
        let cycle = rotate(&mut service, 1);

        // Find a pairing that is NOT assigned.
        let assigned = cycle.assignments().to_vec();
        let roster = roster();
        let chores: Vec<ChoreId> = roster.chore_ids().collect();
        let unassigned = roster
            .person_ids()
            .flat_map(|p| chores.iter().map(move |&c| (p, c)))
            .find(|&(p, c)| !assigned.iter().any(|a| a.person == p && a.chore == c))
            .unwrap();

        let err = service
            .record_violation(unassigned.0, unassigned.1, Timestamp::now(), false)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSelection);
        assert!(service.state().violations.active().is_empty());
    }

    #[test]
    fn record_violation_without_cycle_is_invalid_selection() {
        let mut service = service();
        let err = service
            .record_violation(PersonId::new(0), ChoreId::new(0), Timestamp::now(), false)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSelection);
    }

    #[test]
    fn carry_over_violation_forces_pairing_into_next_cycle() {
        let mut service = service();
        let cycle = rotate(&mut service, 1);

        let target = cycle.assignments()[0];
        service
            .record_violation(target.person, target.chore, Timestamp::now(), true)
            .unwrap();

        let next = rotate(&mut service, 2);

        let holders: Vec<_> = next
            .assignments()
            .iter()
            .filter(|a| a.chore == target.chore)
            .collect();
        assert_eq!(holders.len(), 1);
        assert_eq!(holders[0].person, target.person);

        assert!(service.state().violations.active().is_empty());
        let handled = &service.state().violations.history()[0];
        assert!(handled.carry_over_handled());
        assert!(handled.is_resolved());
    }

    #[test]
    fn toggle_completion_roundtrips() {
        let mut service = service();
        let cycle = rotate(&mut service, 1);
        let a = cycle.assignments()[0];

        assert!(service.toggle_completion(cycle.id(), a.person, a.chore).unwrap());
        assert!(!service.toggle_completion(cycle.id(), a.person, a.chore).unwrap());
    }

    #[test]
    fn toggle_completion_at_stamps_the_given_clock() {
        let mut service = service();
        let cycle = rotate(&mut service, 1);
        let a = cycle.assignments()[0];

        let at = Timestamp::start_of_day(
            chrono::NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
        );
        service
            .toggle_completion_at(cycle.id(), a.person, a.chore, at)
            .unwrap();

        assert_eq!(service.state().metadata.last_updated, at);
    }

    #[test]
    fn toggle_completion_on_archived_cycle_is_rejected() {
        let mut service = service();
        let first = rotate(&mut service, 1);
        rotate(&mut service, 2);

        let a = first.assignments()[0];
        let err = service
            .toggle_completion(first.id(), a.person, a.chore)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CycleArchived);
    }

    #[test]
    fn toggle_completion_unknown_cycle_is_not_found() {
        let mut service = service();
        rotate(&mut service, 1);
        let err = service
            .toggle_completion(CycleId::new(), PersonId::new(0), ChoreId::new(0))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CycleNotFound);
    }

    #[test]
    fn statistics_reflect_ledger_and_violations() {
        let mut service = service();
        let cycle = rotate(&mut service, 1);
        let a = cycle.assignments()[0];
        service.toggle_completion(cycle.id(), a.person, a.chore).unwrap();

        let report = service.statistics();
        let stats = &report.per_person[a.person.index()];
        assert_eq!(stats.assigned, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.completion_rate, 0.5);
    }

    #[test]
    fn export_then_import_restores_state() {
        let mut service = service();
        rotate(&mut service, 1);
        let snapshot = service.export_snapshot();

        let mut other = RotationService::new(roster(), RotationSettings::default());
        other.import_snapshot(snapshot.clone()).unwrap();
        assert_eq!(other.export_snapshot(), snapshot);
    }

    #[test]
    fn import_rejects_malformed_snapshot_and_keeps_state() {
        let mut service = service();
        let before = rotate(&mut service, 1);

        let mut bad = service.export_snapshot();
        bad.metadata.version = 42;
        let err = service.import_snapshot(bad).unwrap_err();

        assert_eq!(err.code, ErrorCode::MalformedSnapshot);
        assert_eq!(service.current_cycle().map(|c| c.id()), Some(before.id()));
    }
}
