// ABOUTME: Day-by-day capacity view of one provider-month
// ABOUTME: Compares appointment counts against effective open-hour capacity per day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Horario Contributors

use std::sync::Arc;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::availability::ScheduleTemplate;
use crate::clock::{self, Clock};
use crate::errors::{AppError, AppResult};
use crate::store::{AppointmentStore, ScheduleOverrideStore};

/// Capacity signal for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    /// Day of month, 1-based
    pub day: u32,
    /// Whether at least one open hour is still unbooked
    pub available: bool,
}

/// Renders a provider's month as a day-by-day availability strip
///
/// This is a capacity check, not a per-hour match: a day reads available
/// while its appointment count stays below its open-hour count, even when
/// the booked hours and the open hours do not line up one-to-one. The day
/// view is the per-hour source of truth; this strip deliberately stays
/// coarse because calendar UIs paint it for a whole month at a time.
pub struct ProviderMonthAvailabilityService {
    appointments: Arc<dyn AppointmentStore>,
    overrides: Arc<dyn ScheduleOverrideStore>,
    template: ScheduleTemplate,
    clock: Arc<dyn Clock>,
}

impl ProviderMonthAvailabilityService {
    /// Create the service with its injected collaborators
    pub fn new(
        appointments: Arc<dyn AppointmentStore>,
        overrides: Arc<dyn ScheduleOverrideStore>,
        template: ScheduleTemplate,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            appointments,
            overrides,
            template,
            clock,
        }
    }

    /// Availability flag for every day of one provider-month, ascending
    ///
    /// A day is available when its end-of-day instant (23:59:59) is still in
    /// the future and fewer appointments exist than effective open hours.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a month outside 1..=12; store failures
    /// propagate as-is.
    pub async fn execute(
        &self,
        provider_id: Uuid,
        year: i32,
        month: u32,
    ) -> AppResult<Vec<DayAvailability>> {
        let days = clock::days_in_month(year, month)
            .ok_or_else(|| AppError::invalid_input(format!("{month} is not a calendar month")))?;

        let appointments = self
            .appointments
            .find_all_in_month(provider_id, year, month)
            .await?;
        let overrides = self
            .overrides
            .find_all_in_month(provider_id, year, month)
            .await?;

        let now = self.clock.now();

        let mut availability = Vec::with_capacity(days as usize);
        for day in 1..=days {
            let day_end = clock::end_of_day(year, month, day).ok_or_else(|| {
                AppError::invalid_input(format!("{year}-{month}-{day} is not a calendar date"))
            })?;

            let open_hours = self.template.resolve_open_hours(
                overrides
                    .iter()
                    .filter(|schedule_override| schedule_override.date.day() == day),
            );
            let booked = appointments
                .iter()
                .filter(|appointment| appointment.date.day() == day)
                .count();

            availability.push(DayAvailability {
                day,
                available: day_end > now && booked < open_hours.len(),
            });
        }

        Ok(availability)
    }
}
