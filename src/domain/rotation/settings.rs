//! Rotation settings - cycle length, chore limits, and rotation weekday.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

fn default_cycle_length_days() -> u32 {
    3
}

fn default_min_chores() -> usize {
    2
}

fn default_max_chores() -> usize {
    2
}

fn default_rotation_weekday() -> String {
    "tuesday".to_string()
}

/// Per-person assignment count bounds for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoreLimits {
    pub min_per_person: usize,
    pub max_per_person: usize,
}

impl ChoreLimits {
    /// Creates limits, rejecting a zero minimum or an inverted range.
    pub fn new(min_per_person: usize, max_per_person: usize) -> Result<Self, ValidationError> {
        if min_per_person == 0 {
            return Err(ValidationError::out_of_range("min_per_person", 1, i64::MAX, 0));
        }
        if max_per_person < min_per_person {
            return Err(ValidationError::invalid_format(
                "max_per_person",
                format!(
                    "max ({}) is below min ({})",
                    max_per_person, min_per_person
                ),
            ));
        }
        Ok(Self {
            min_per_person,
            max_per_person,
        })
    }
}

impl Default for ChoreLimits {
    fn default() -> Self {
        Self {
            min_per_person: default_min_chores(),
            max_per_person: default_max_chores(),
        }
    }
}

/// Settings governing cycle scheduling and assignment generation.
///
/// Persisted inside snapshots; unknown-at-import values are rejected by
/// [`RotationSettings::validate`]. The weekday is stored as text and parsed
/// on demand ("tuesday", "tue", "Tuesday" are all accepted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationSettings {
    /// Days from cycle start to deadline.
    #[serde(default = "default_cycle_length_days")]
    pub cycle_length_days: u32,

    /// Minimum chores per person per cycle.
    #[serde(default = "default_min_chores")]
    pub min_chores_per_person: usize,

    /// Maximum chores per person per cycle.
    #[serde(default = "default_max_chores")]
    pub max_chores_per_person: usize,

    /// Weekday each new cycle starts on.
    #[serde(default = "default_rotation_weekday")]
    pub rotation_weekday: String,
}

impl RotationSettings {
    /// Returns the chore limits implied by these settings.
    ///
    /// # Errors
    ///
    /// Propagates the range checks from [`ChoreLimits::new`].
    pub fn limits(&self) -> Result<ChoreLimits, ValidationError> {
        ChoreLimits::new(self.min_chores_per_person, self.max_chores_per_person)
    }

    /// Parses the configured rotation weekday.
    pub fn weekday(&self) -> Result<Weekday, ValidationError> {
        self.rotation_weekday.parse::<Weekday>().map_err(|_| {
            ValidationError::invalid_format(
                "rotation_weekday",
                format!("'{}' is not a weekday", self.rotation_weekday),
            )
        })
    }

    /// Validates all settings fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cycle_length_days == 0 {
            return Err(ValidationError::out_of_range(
                "cycle_length_days",
                1,
                i64::MAX,
                0,
            ));
        }
        self.limits()?;
        self.weekday()?;
        Ok(())
    }
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            cycle_length_days: default_cycle_length_days(),
            min_chores_per_person: default_min_chores(),
            max_chores_per_person: default_max_chores(),
            rotation_weekday: default_rotation_weekday(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_tuesday_through_friday_two_chores() {
        let settings = RotationSettings::default();
        assert_eq!(settings.cycle_length_days, 3);
        assert_eq!(settings.weekday().unwrap(), Weekday::Tue);
        let limits = settings.limits().unwrap();
        assert_eq!(limits.min_per_person, 2);
        assert_eq!(limits.max_per_person, 2);
    }

    #[test]
    fn limits_reject_zero_minimum() {
        assert!(ChoreLimits::new(0, 2).is_err());
    }

    #[test]
    fn limits_reject_inverted_range() {
        assert!(ChoreLimits::new(3, 2).is_err());
    }

    #[test]
    fn weekday_parses_short_and_long_forms() {
        let mut settings = RotationSettings::default();
        settings.rotation_weekday = "fri".to_string();
        assert_eq!(settings.weekday().unwrap(), Weekday::Fri);
        settings.rotation_weekday = "Monday".to_string();
        assert_eq!(settings.weekday().unwrap(), Weekday::Mon);
    }

    #[test]
    fn validate_rejects_unknown_weekday() {
        let mut settings = RotationSettings::default();
        settings.rotation_weekday = "someday".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_cycle_length() {
        let mut settings = RotationSettings::default();
        settings.cycle_length_days = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let settings: RotationSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, RotationSettings::default());
    }
}
