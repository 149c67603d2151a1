//! Violation log - rule violations, their resolution, and carry-overs.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ChoreId, CycleId, DomainError, ErrorCode, PersonId, Timestamp, ViolationId,
};
use crate::domain::rotation::{Assignment, ChoreLimits};

/// A recorded rule violation: a person failed to complete an assigned chore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Unique identifier.
    id: ViolationId,

    /// Who violated.
    person: PersonId,

    /// The chore that went uncompleted.
    chore: ChoreId,

    /// The cycle the violation was recorded against (non-owning reference).
    cycle_id: CycleId,

    /// When the violation was recorded.
    recorded_at: Timestamp,

    /// Whether the pairing must be forced into the next cycle.
    carry_over: bool,

    /// Resolution timestamp; `None` while the violation is active.
    resolved_at: Option<Timestamp>,

    /// True when resolution came from carry-over application rather than a
    /// manual resolve.
    carry_over_handled: bool,
}

impl Violation {
    pub fn id(&self) -> ViolationId {
        self.id
    }

    pub fn person(&self) -> PersonId {
        self.person
    }

    pub fn chore(&self) -> ChoreId {
        self.chore
    }

    pub fn cycle_id(&self) -> CycleId {
        self.cycle_id
    }

    pub fn recorded_at(&self) -> Timestamp {
        self.recorded_at
    }

    pub fn carry_over(&self) -> bool {
        self.carry_over
    }

    pub fn resolved_at(&self) -> Option<Timestamp> {
        self.resolved_at
    }

    pub fn carry_over_handled(&self) -> bool {
        self.carry_over_handled
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }
}

/// What happened when one carry-over violation was applied to a new cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarryOverOutcome {
    pub violation: ViolationId,
    pub person: PersonId,
    pub chore: ChoreId,
    /// Who lost the chore to the violator, if anyone held it.
    pub displaced: Option<PersonId>,
    /// Chore handed back to the displaced person by the rebalance step.
    pub rebalanced: Option<ChoreId>,
    /// True when the displaced person ended below the minimum and nothing
    /// could be handed back.
    pub left_short: bool,
}

/// Append-only log of violations with active and history buckets.
///
/// Active violations have no resolution timestamp. Resolution (manual or via
/// carry-over handling) moves a violation to history; history entries are
/// never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ViolationLog {
    active: Vec<Violation>,
    history: Vec<Violation>,
}

impl ViolationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active violations.
    pub fn active(&self) -> &[Violation] {
        &self.active
    }

    /// Returns the resolved violations.
    pub fn history(&self) -> &[Violation] {
        &self.history
    }

    /// Counts all violations (active + history) attributed to a person.
    pub fn count_for(&self, person: PersonId) -> usize {
        self.active
            .iter()
            .chain(self.history.iter())
            .filter(|v| v.person == person)
            .count()
    }

    /// Appends a new active violation and returns it.
    ///
    /// The caller is responsible for checking the pairing against the
    /// current cycle's assignments first; the log itself has no view of the
    /// cycle.
    pub fn record(
        &mut self,
        person: PersonId,
        chore: ChoreId,
        cycle_id: CycleId,
        recorded_at: Timestamp,
        carry_over: bool,
    ) -> &Violation {
        self.active.push(Violation {
            id: ViolationId::new(),
            person,
            chore,
            cycle_id,
            recorded_at,
            carry_over,
            resolved_at: None,
            carry_over_handled: false,
        });
        // push keeps the vec non-empty
        self.active.last().unwrap_or_else(|| unreachable!())
    }

    /// Resolves an active violation manually, moving it to history.
    ///
    /// # Errors
    ///
    /// - `VIOLATION_NOT_FOUND` if the id is not in the active set; the log
    ///   is left unchanged.
    pub fn resolve(&mut self, id: ViolationId, at: Timestamp) -> Result<(), DomainError> {
        let pos = self
            .active
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ViolationNotFound,
                    format!("No active violation with id {}", id),
                )
            })?;
        let mut violation = self.active.remove(pos);
        violation.resolved_at = Some(at);
        self.history.push(violation);
        Ok(())
    }

    /// Forces every active carry-over pairing into `assignments`, then
    /// resolves those violations with the carry-over marker.
    ///
    /// For each carried pairing (P, C): whoever the generator gave C loses
    /// it to P. When that leaves the displaced person below
    /// `limits.min_per_person` and P holds more than one chore, one of P's
    /// other chores is handed back, preferring a chore the displaced person
    /// did not hold in `previous`. When P has nothing to give back the
    /// displaced person stays short; the outcome flags this.
    pub fn apply_carry_overs(
        &mut self,
        assignments: &mut Vec<Assignment>,
        previous: &[Assignment],
        limits: ChoreLimits,
        now: Timestamp,
    ) -> Vec<CarryOverOutcome> {
        let mut outcomes = Vec::new();
        let mut remaining = Vec::new();

        for mut violation in std::mem::take(&mut self.active) {
            if !violation.carry_over {
                remaining.push(violation);
                continue;
            }

            let outcome = force_pairing(
                assignments,
                previous,
                limits,
                violation.id,
                violation.person,
                violation.chore,
            );
            outcomes.push(outcome);

            violation.resolved_at = Some(now);
            violation.carry_over_handled = true;
            self.history.push(violation);
        }

        self.active = remaining;
        outcomes
    }
}

fn force_pairing(
    assignments: &mut Vec<Assignment>,
    previous: &[Assignment],
    limits: ChoreLimits,
    violation: ViolationId,
    person: PersonId,
    chore: ChoreId,
) -> CarryOverOutcome {
    let holder = assignments.iter().position(|a| a.chore == chore);

    let displaced = match holder {
        Some(pos) if assignments[pos].person == person => {
            // The shuffle already landed the chore on the violator.
            return CarryOverOutcome {
                violation,
                person,
                chore,
                displaced: None,
                rebalanced: None,
                left_short: false,
            };
        }
        Some(pos) => {
            let displaced = assignments[pos].person;
            assignments.remove(pos);
            Some(displaced)
        }
        None => None,
    };

    assignments.push(Assignment::new(person, chore));

    let mut rebalanced = None;
    let mut left_short = false;
    if let Some(displaced_person) = displaced {
        let displaced_count = assignments
            .iter()
            .filter(|a| a.person == displaced_person)
            .count();
        if displaced_count < limits.min_per_person {
            rebalanced = hand_back(assignments, previous, person, displaced_person, chore);
            left_short = rebalanced.is_none();
        }
    }

    CarryOverOutcome {
        violation,
        person,
        chore,
        displaced,
        rebalanced,
        left_short,
    }
}

/// Moves one of the violator's other chores to the displaced person,
/// preferring a chore the displaced person did not hold last cycle.
fn hand_back(
    assignments: &mut [Assignment],
    previous: &[Assignment],
    violator: PersonId,
    displaced: PersonId,
    carried: ChoreId,
) -> Option<ChoreId> {
    let displaced_prev: Vec<ChoreId> = previous
        .iter()
        .filter(|a| a.person == displaced)
        .map(|a| a.chore)
        .collect();

    let candidates: Vec<usize> = assignments
        .iter()
        .enumerate()
        .filter(|(_, a)| a.person == violator && a.chore != carried)
        .map(|(i, _)| i)
        .collect();

    let pick = candidates
        .iter()
        .copied()
        .find(|&i| !displaced_prev.contains(&assignments[i].chore))
        .or_else(|| candidates.first().copied())?;

    assignments[pick].person = displaced;
    Some(assignments[pick].chore)
}
