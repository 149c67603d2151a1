//! Assignment generator - two-pass greedy allocation with a repair pass.
//!
//! Produces the next cycle's assignments from the roster, the previous
//! cycle's assignments, and the per-person limits. The shuffle order of
//! people and chores is the only source of randomness; it decides which of
//! several equally-valid allocations is chosen, never whether the output is
//! valid.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::foundation::{ChoreId, DomainError, ErrorCode, PersonId};
use crate::domain::roster::Roster;
use crate::domain::rotation::{Assignment, ChoreLimits};

/// Generates a full assignment list for the next cycle.
///
/// # Guarantees
///
/// - Every roster chore appears in exactly one returned assignment.
/// - No person exceeds `limits.max_per_person`, unless every person is
///   already at the maximum and chores remain (the infeasible surplus case).
/// - Every person reaches `limits.min_per_person` whenever the chore count
///   permits it.
/// - No person repeats a chore they held in `previous` whenever some
///   chore swap between two people can avoid it; in particular, never when
///   `chores >= 2 * people` and the previous pairings were distinct. A
///   repeat survives only when every alternative also repeats.
///
/// # Errors
///
/// - `INVALID_ROSTER` if the roster has zero people or zero chores. This is
///   the only failure; structurally valid input (including an empty
///   `previous` for the first-ever cycle) always yields an assignment list.
pub fn generate(
    roster: &Roster,
    previous: &[Assignment],
    limits: ChoreLimits,
    rng: &mut impl Rng,
) -> Result<Vec<Assignment>, DomainError> {
    if !roster.is_generatable() {
        return Err(DomainError::new(
            ErrorCode::InvalidRoster,
            "Roster needs at least one person and one chore",
        ));
    }

    let person_count = roster.person_count();
    let chore_count = roster.chore_count();

    // Which chores each person held last cycle. Stale ids from a roster
    // edit between cycles are ignored rather than carried.
    let mut prev_chores: Vec<Vec<ChoreId>> = vec![Vec::new(); person_count];
    for a in previous {
        if a.person.index() < person_count && a.chore.index() < chore_count {
            prev_chores[a.person.index()].push(a.chore);
        }
    }

    let mut people: Vec<PersonId> = roster.person_ids().collect();
    let mut chores: Vec<ChoreId> = roster.chore_ids().collect();
    people.shuffle(rng);
    chores.shuffle(rng);

    let mut assignments: Vec<Assignment> = Vec::with_capacity(chore_count);
    let mut taken = vec![false; chore_count];
    let mut counts = vec![0usize; person_count];

    // Passes 1..=min: hand each person one chore per round, preferring a
    // chore they did not hold last cycle.
    'rounds: for round in 1..=limits.min_per_person {
        for &person in &people {
            if counts[person.index()] >= round {
                continue;
            }
            let fresh = chores.iter().copied().find(|c| {
                !taken[c.index()] && !prev_chores[person.index()].contains(c)
            });
            let pick = fresh.or_else(|| chores.iter().copied().find(|c| !taken[c.index()]));
            match pick {
                Some(chore) => {
                    taken[chore.index()] = true;
                    counts[person.index()] += 1;
                    assignments.push(Assignment::new(person, chore));
                }
                // Chores exhausted; later rounds cannot do better.
                None => break 'rounds,
            }
        }
    }

    // Repair pass: leftover chores (chore count not a clean multiple of the
    // per-person target) go to whoever holds the fewest, ties broken by
    // roster order. The max bound is only exceeded when everyone is at it.
    for chore in roster.chore_ids() {
        if taken[chore.index()] {
            continue;
        }
        let person = fewest_loaded(&counts, limits.max_per_person)
            .unwrap_or_else(|| fewest_loaded(&counts, usize::MAX).unwrap_or(PersonId::new(0)));
        taken[chore.index()] = true;
        counts[person.index()] += 1;
        assignments.push(Assignment::new(person, chore));
    }

    swap_repair(&mut assignments, &prev_chores);
    Ok(assignments)
}

/// Clears repeated pairings the greedy rounds could not avoid by swapping
/// chores between two assignments.
///
/// A swap partner must leave both resulting pairings fresh, so a swap never
/// introduces a new repeat and per-person counts are untouched. A repeat
/// with no partner stays: the non-repeating pool was genuinely exhausted.
fn swap_repair(assignments: &mut [Assignment], prev_chores: &[Vec<ChoreId>]) {
    for i in 0..assignments.len() {
        let a = assignments[i];
        if !prev_chores[a.person.index()].contains(&a.chore) {
            continue;
        }
        let partner = (0..assignments.len()).find(|&j| {
            let b = assignments[j];
            b.person != a.person
                && !prev_chores[a.person.index()].contains(&b.chore)
                && !prev_chores[b.person.index()].contains(&a.chore)
        });
        if let Some(j) = partner {
            let swapped = assignments[j].chore;
            assignments[j].chore = assignments[i].chore;
            assignments[i].chore = swapped;
        }
    }
}

/// Returns the person with the fewest chores among those under `cap`,
/// ties broken by roster order.
fn fewest_loaded(counts: &[usize], cap: usize) -> Option<PersonId> {
    counts
        .iter()
        .enumerate()
        .filter(|(_, &n)| n < cap)
        .min_by_key(|(_, &n)| n)
        .map(|(i, _)| PersonId::new(i))
}
