// ABOUTME: Creates or updates a provider's explicit availability override for one hour
// ABOUTME: Guards against past slots and against closing a slot that is already booked
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Horario Contributors

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::clock::{self, Clock};
use crate::errors::{AppError, AppResult};
use crate::models::{ScheduleOverride, SlotStatus};
use crate::store::{AppointmentStore, NewScheduleOverride, ScheduleOverrideStore};

/// Sets the explicit availability state of one provider hour slot
///
/// The first write for a slot creates its override record; every later write
/// mutates that record's status in place. Overrides are never deleted, so a
/// slot's explicit state always has a single authoritative record.
pub struct SetProviderScheduleService {
    appointments: Arc<dyn AppointmentStore>,
    overrides: Arc<dyn ScheduleOverrideStore>,
    clock: Arc<dyn Clock>,
}

impl SetProviderScheduleService {
    /// Create the service with its injected collaborators
    pub fn new(
        appointments: Arc<dyn AppointmentStore>,
        overrides: Arc<dyn ScheduleOverrideStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            appointments,
            overrides,
            clock,
        }
    }

    /// Set the hour slot containing `date` to `status` for the provider
    ///
    /// No notification is queued and no cache is invalidated on this path;
    /// schedule views recompute overrides on every read.
    ///
    /// # Errors
    ///
    /// - `PastDate` when the truncated slot is not strictly in the future
    /// - `SlotHasAppointment` when the slot is booked and `status` is
    ///   `Unavailable`; a booked slot cannot be closed, and the existing
    ///   override (if any) is left untouched
    pub async fn execute(
        &self,
        provider_id: Uuid,
        date: DateTime<Utc>,
        status: SlotStatus,
    ) -> AppResult<ScheduleOverride> {
        let slot_date = clock::start_of_hour(date);

        if slot_date <= self.clock.now() {
            return Err(AppError::past_date("a past schedule slot cannot be edited"));
        }

        let booked = self
            .appointments
            .find_by_date(provider_id, slot_date)
            .await?;
        if booked.is_some() && status == SlotStatus::Unavailable {
            return Err(AppError::slot_has_appointment(
                "this time slot already has an appointment",
            ));
        }

        if let Some(mut existing) = self.overrides.find_by_date(provider_id, slot_date).await? {
            existing.status = status;
            let saved = self.overrides.save(existing).await?;
            info!(override_id = %saved.id, %provider_id, date = %slot_date, %status, "schedule override updated");
            return Ok(saved);
        }

        let created = self
            .overrides
            .create(NewScheduleOverride {
                provider_id,
                date: slot_date,
                status,
            })
            .await?;
        info!(override_id = %created.id, %provider_id, date = %slot_date, %status, "schedule override created");
        Ok(created)
    }
}
