// ABOUTME: Provider-side confirmation of a pending appointment
// ABOUTME: Ownership-checked, idempotent status transition to accepted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Horario Contributors

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{Appointment, AppointmentStatus};
use crate::store::AppointmentStore;

/// Transitions an appointment to `Accepted` on behalf of its provider
pub struct AcceptAppointmentService {
    appointments: Arc<dyn AppointmentStore>,
}

impl AcceptAppointmentService {
    /// Create the service with its injected collaborator
    pub fn new(appointments: Arc<dyn AppointmentStore>) -> Self {
        Self { appointments }
    }

    /// Accept the appointment as the calling provider
    ///
    /// Idempotent: an already-accepted appointment is returned unchanged with
    /// no write.
    ///
    /// # Errors
    ///
    /// - `ResourceNotFound` when no appointment has that id
    /// - `NotOwner` when the appointment belongs to another provider
    pub async fn execute(
        &self,
        appointment_id: Uuid,
        provider_id: Uuid,
    ) -> AppResult<Appointment> {
        let Some(mut appointment) = self.appointments.find_by_id(appointment_id).await? else {
            return Err(AppError::resource_not_found("appointment"));
        };

        if appointment.provider_id != provider_id {
            return Err(AppError::not_owner(
                "only the owning provider can accept an appointment",
            ));
        }

        if appointment.status == AppointmentStatus::Accepted {
            return Ok(appointment);
        }

        appointment.status = AppointmentStatus::Accepted;
        let accepted = self.appointments.save(appointment).await?;

        info!(appointment_id = %accepted.id, %provider_id, "appointment accepted");
        Ok(accepted)
    }
}
