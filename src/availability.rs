// ABOUTME: Availability resolution for the hourly booking grid
// ABOUTME: Merges the default open-hour template with per-slot provider overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Horario Contributors

//! The effective set of bookable hours for a provider on a day is derived,
//! never stored: start from the default template, add every hour with an
//! explicit `Available` override, remove every hour with an explicit
//! `Unavailable` override. Each (provider, hour) pair carries at most one
//! override, so application order never matters. The set is recomputed on
//! every query over an immutable base; nothing here is shared across calls.

use std::collections::BTreeSet;
use std::env;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::{ScheduleOverride, SlotStatus};

/// First hour of the default open window
pub const DEFAULT_FIRST_OPEN_HOUR: u32 = 12;

/// Last hour of the default open window, inclusive
pub const DEFAULT_LAST_OPEN_HOUR: u32 = 19;

/// Environment variable overriding the first default open hour
pub const ENV_FIRST_OPEN_HOUR: &str = "HORARIO_FIRST_OPEN_HOUR";

/// Environment variable overriding the last default open hour
pub const ENV_LAST_OPEN_HOUR: &str = "HORARIO_LAST_OPEN_HOUR";

/// The default open-hour window applied to every provider and every day
///
/// Providers reshape it per slot with [`ScheduleOverride`] records; the
/// template itself never changes between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTemplate {
    first_hour: u32,
    last_hour: u32,
}

impl Default for ScheduleTemplate {
    fn default() -> Self {
        Self {
            first_hour: DEFAULT_FIRST_OPEN_HOUR,
            last_hour: DEFAULT_LAST_OPEN_HOUR,
        }
    }
}

impl ScheduleTemplate {
    /// Create a template spanning `first_hour..=last_hour`
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the window is empty or leaves the 0..=23
    /// hour grid.
    pub fn new(first_hour: u32, last_hour: u32) -> AppResult<Self> {
        if last_hour > 23 {
            return Err(AppError::config_invalid(format!(
                "last open hour {last_hour} is outside the 0..=23 grid"
            )));
        }
        if first_hour > last_hour {
            return Err(AppError::config_invalid(format!(
                "open-hour window {first_hour}..={last_hour} is empty"
            )));
        }
        Ok(Self {
            first_hour,
            last_hour,
        })
    }

    /// Build a template from the environment, falling back to the defaults
    ///
    /// Reads [`ENV_FIRST_OPEN_HOUR`] and [`ENV_LAST_OPEN_HOUR`]; unset
    /// variables keep their default value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a variable is set but not a valid hour,
    /// or when the resulting window is invalid.
    pub fn from_env() -> AppResult<Self> {
        let first_hour = read_hour_var(ENV_FIRST_OPEN_HOUR)?.unwrap_or(DEFAULT_FIRST_OPEN_HOUR);
        let last_hour = read_hour_var(ENV_LAST_OPEN_HOUR)?.unwrap_or(DEFAULT_LAST_OPEN_HOUR);
        Self::new(first_hour, last_hour)
    }

    /// Whether an hour falls inside the default window
    #[must_use]
    pub const fn contains(&self, hour: u32) -> bool {
        hour >= self.first_hour && hour <= self.last_hour
    }

    /// The template hours as an ascending set
    #[must_use]
    pub fn hours(&self) -> BTreeSet<u32> {
        (self.first_hour..=self.last_hour).collect()
    }

    /// Effective open hours for one day: template plus override deltas
    ///
    /// `Available` overrides add their hour, `Unavailable` overrides remove
    /// it, template hour or not. The result iterates in ascending hour order;
    /// callers impose any further ordering themselves.
    pub fn resolve_open_hours<'a>(
        &self,
        overrides: impl IntoIterator<Item = &'a ScheduleOverride>,
    ) -> BTreeSet<u32> {
        let mut open = self.hours();
        for schedule_override in overrides {
            let hour = schedule_override.date.hour();
            match schedule_override.status {
                SlotStatus::Available => {
                    open.insert(hour);
                }
                SlotStatus::Unavailable => {
                    open.remove(&hour);
                }
            }
        }
        open
    }

    /// Whether a single hour is open, given its at-most-one override
    ///
    /// An explicit override always decides; with no override the template
    /// does. This is the single-lookup fast path the booking service uses.
    #[must_use]
    pub fn is_slot_open(&self, hour: u32, slot_override: Option<&ScheduleOverride>) -> bool {
        match slot_override {
            Some(schedule_override) => schedule_override.status == SlotStatus::Available,
            None => self.contains(hour),
        }
    }
}

fn read_hour_var(name: &str) -> AppResult<Option<u32>> {
    match env::var(name) {
        Ok(raw) => {
            let hour = raw.parse::<u32>().map_err(|err| {
                AppError::config_invalid(format!("{name} must be an hour, got {raw:?}"))
                    .with_source(err)
            })?;
            Ok(Some(hour))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(
            AppError::config_invalid(format!("{name} is not valid unicode")).with_source(err),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn override_at(hour: u32, status: SlotStatus) -> ScheduleOverride {
        let date = Utc
            .with_ymd_and_hms(2026, 3, 16, hour, 0, 0)
            .single()
            .unwrap();
        ScheduleOverride {
            id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            date,
            status,
            created_at: date,
            updated_at: date,
        }
    }

    #[test]
    fn default_template_is_twelve_through_nineteen() {
        let template = ScheduleTemplate::default();
        let hours: Vec<u32> = template.hours().into_iter().collect();
        assert_eq!(hours, vec![12, 13, 14, 15, 16, 17, 18, 19]);
    }

    #[test]
    fn no_overrides_resolves_to_the_template() {
        let template = ScheduleTemplate::default();
        assert_eq!(template.resolve_open_hours([]), template.hours());
    }

    #[test]
    fn available_override_opens_an_off_template_hour() {
        let template = ScheduleTemplate::default();
        let overrides = [override_at(9, SlotStatus::Available)];
        let open = template.resolve_open_hours(&overrides);
        assert!(open.contains(&9));
        assert_eq!(open.len(), 9);
    }

    #[test]
    fn unavailable_override_closes_a_template_hour() {
        let template = ScheduleTemplate::default();
        let overrides = [override_at(14, SlotStatus::Unavailable)];
        let open = template.resolve_open_hours(&overrides);
        assert!(!open.contains(&14));
        assert_eq!(open.len(), 7);
    }

    #[test]
    fn unavailable_override_outside_template_is_a_no_op() {
        let template = ScheduleTemplate::default();
        let overrides = [override_at(8, SlotStatus::Unavailable)];
        assert_eq!(template.resolve_open_hours(&overrides), template.hours());
    }

    #[test]
    fn is_slot_open_prefers_the_override() {
        let template = ScheduleTemplate::default();
        let closed = override_at(14, SlotStatus::Unavailable);
        let opened = override_at(9, SlotStatus::Available);
        assert!(!template.is_slot_open(14, Some(&closed)));
        assert!(template.is_slot_open(9, Some(&opened)));
        assert!(template.is_slot_open(14, None));
        assert!(!template.is_slot_open(9, None));
    }

    #[test]
    fn window_validation_rejects_bad_bounds() {
        assert!(ScheduleTemplate::new(12, 24).is_err());
        assert!(ScheduleTemplate::new(20, 12).is_err());
        assert!(ScheduleTemplate::new(0, 23).is_ok());
    }
}
