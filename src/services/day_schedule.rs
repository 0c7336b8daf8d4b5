// ABOUTME: Hour-by-hour slot view of one provider-day
// ABOUTME: Resolves effective open hours and attaches the at-most-one appointment per slot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Horario Contributors

use std::sync::Arc;

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::availability::ScheduleTemplate;
use crate::clock::{self, Clock};
use crate::errors::{AppError, AppResult};
use crate::models::Appointment;
use crate::store::{AppointmentStore, ScheduleOverrideStore};

/// One bookable hour in a provider's day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayScheduleSlot {
    /// Hour of day, 0..=23
    pub hour: u32,
    /// Whether a booking for this hour would succeed right now
    pub available: bool,
    /// The appointment occupying the hour, if any
    pub appointment: Option<Appointment>,
}

/// Renders a provider's day as an ordered sequence of open slots
///
/// Hours outside the effective open set are omitted entirely rather than
/// marked unavailable; a closed hour is not part of the provider's day.
pub struct ProviderDayScheduleService {
    appointments: Arc<dyn AppointmentStore>,
    overrides: Arc<dyn ScheduleOverrideStore>,
    template: ScheduleTemplate,
    clock: Arc<dyn Clock>,
}

impl ProviderDayScheduleService {
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

    /// Hour-by-hour schedule for one provider-day, ascending by hour
    ///
    /// A slot is available when no appointment occupies it and its start
    /// instant is still in the future. With no overrides and no appointments
    /// this is the pure default template filtered by future-time.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a nonexistent calendar date; store failures
    /// propagate as-is.
    pub async fn execute(
        &self,
        provider_id: Uuid,
        year: i32,
        month: u32,
        day: u32,
    ) -> AppResult<Vec<DayScheduleSlot>> {
        let appointments = self
            .appointments
            .find_all_in_day(provider_id, year, month, day)
            .await?;
        let overrides = self
            .overrides
            .find_all_in_day(provider_id, year, month, day)
            .await?;

        let open_hours = self.template.resolve_open_hours(&overrides);
        let now = self.clock.now();

        let mut slots = Vec::with_capacity(open_hours.len());
        for hour in open_hours {
            let slot_at = clock::slot_instant(year, month, day, hour).ok_or_else(|| {
                AppError::invalid_input(format!("{year}-{month}-{day} is not a calendar date"))
            })?;
            let appointment = appointments
                .iter()
                .find(|appointment| appointment.date.hour() == hour)
                .cloned();
            let available = appointment.is_none() && slot_at > now;
            slots.push(DayScheduleSlot {
                hour,
                available,
                appointment,
            });
        }

        Ok(slots)
    }
}
