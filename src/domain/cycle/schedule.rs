//! Cycle scheduling - start and deadline date computation.

use chrono::{Datelike, Duration, Weekday};

use crate::domain::foundation::Timestamp;

/// The date window of one cycle: start and completion deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleWindow {
    pub starts_at: Timestamp,
    pub deadline: Timestamp,
}

/// Computes the next cycle window after `now`.
///
/// The start is the next occurrence of `weekday` strictly after `now`: when
/// today already is that weekday, the start rolls a full week forward rather
/// than landing on today, which would produce a zero-length cycle. The
/// deadline is `cycle_length_days` after the start.
pub fn next_cycle_window(now: Timestamp, weekday: Weekday, cycle_length_days: u32) -> CycleWindow {
    let today = now.date();
    let mut days_ahead = (i64::from(weekday.num_days_from_monday())
        - i64::from(today.weekday().num_days_from_monday()))
    .rem_euclid(7);
    if days_ahead == 0 {
        days_ahead = 7;
    }

    let starts_at = Timestamp::start_of_day(today + Duration::days(days_ahead));
    CycleWindow {
        starts_at,
        deadline: starts_at.add_days(i64::from(cycle_length_days)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32) -> Timestamp {
        Timestamp::start_of_day(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn from_monday_the_next_tuesday_is_tomorrow() {
        // 2024-03-11 was a Monday
        let window = next_cycle_window(ts(2024, 3, 11), Weekday::Tue, 3);
        assert_eq!(window.starts_at, ts(2024, 3, 12));
        assert_eq!(window.deadline, ts(2024, 3, 15));
    }

    #[test]
    fn on_the_rotation_weekday_the_start_rolls_a_full_week() {
        // 2024-03-12 was a Tuesday
        let window = next_cycle_window(ts(2024, 3, 12), Weekday::Tue, 3);
        assert_eq!(window.starts_at, ts(2024, 3, 19));
    }

    #[test]
    fn start_is_always_strictly_after_now() {
        let now = ts(2024, 3, 14); // a Thursday
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            let window = next_cycle_window(now, weekday, 3);
            assert!(window.starts_at.is_after(&now), "{:?}", weekday);
            assert_eq!(window.starts_at.weekday(), weekday);
        }
    }

    #[test]
    fn deadline_tracks_cycle_length() {
        let window = next_cycle_window(ts(2024, 3, 11), Weekday::Tue, 7);
        assert_eq!(window.deadline, ts(2024, 3, 19));
    }

    #[test]
    fn default_window_spans_tuesday_through_friday() {
        let window = next_cycle_window(ts(2024, 3, 13), Weekday::Tue, 3);
        assert_eq!(window.starts_at.weekday(), Weekday::Tue);
        assert_eq!(window.deadline.weekday(), Weekday::Fri);
    }
}
