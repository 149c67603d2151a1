//! Statistics module - derived per-person compliance figures.
//!
//! Everything here is recomputed from the completion ledgers and the
//! violation log on every query. Nothing is cached, so there is no stale
//! statistic to invalidate, and imported snapshots cannot carry numbers that
//! disagree with their own ledgers.

use serde::Serialize;

use crate::domain::cycle::Cycle;
use crate::domain::foundation::PersonId;
use crate::domain::roster::Roster;
use crate::domain::violation::ViolationLog;

/// Compliance figures for one person across all cycles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonStatistics {
    pub person: PersonId,
    pub assigned: usize,
    pub completed: usize,
    /// `completed / assigned`; exactly 1.0 for a person never assigned
    /// anything (vacuously compliant).
    pub completion_rate: f64,
    pub violation_count: usize,
}

/// Full statistics report: per-person figures plus a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    /// One entry per roster person, in roster order.
    pub per_person: Vec<PersonStatistics>,
    /// People sorted by completion rate descending, ties broken by
    /// violation count ascending, then roster order.
    pub ranking: Vec<PersonId>,
}

/// Computes the statistics report from current + archived cycles and the
/// violation log.
pub fn compute(
    roster: &Roster,
    current: Option<&Cycle>,
    history: &[Cycle],
    violations: &ViolationLog,
) -> StatisticsReport {
    let per_person: Vec<PersonStatistics> = roster
        .person_ids()
        .map(|person| {
            let mut assigned = 0;
            let mut completed = 0;
            for cycle in current.into_iter().chain(history.iter()) {
                let (a, c) = cycle.ledger().person_counts(person);
                assigned += a;
                completed += c;
            }
            let completion_rate = if assigned == 0 {
                1.0
            } else {
                completed as f64 / assigned as f64
            };
            PersonStatistics {
                person,
                assigned,
                completed,
                completion_rate,
                violation_count: violations.count_for(person),
            }
        })
        .collect();

    let mut ranking: Vec<PersonId> = per_person.iter().map(|s| s.person).collect();
    ranking.sort_by(|a, b| {
        let sa = &per_person[a.index()];
        let sb = &per_person[b.index()];
        sb.completion_rate
            .total_cmp(&sa.completion_rate)
            .then(sa.violation_count.cmp(&sb.violation_count))
            .then(a.index().cmp(&b.index()))
    });

    StatisticsReport { per_person, ranking }
}
