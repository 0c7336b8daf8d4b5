// ABOUTME: Booking validation and commit for new appointments
// ABOUTME: Sequential invariant checks, then a pending record plus notification and cache invalidation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Horario Contributors

use std::sync::Arc;

use chrono::{DateTime, Timelike, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::availability::ScheduleTemplate;
use crate::cache::{self, CacheProvider};
use crate::clock::{self, Clock};
use crate::errors::{AppError, AppResult};
use crate::models::{Appointment, AppointmentStatus};
use crate::store::{
    AppointmentStore, NewAppointment, NewNotification, NotificationStore, ScheduleOverrideStore,
    UserStore,
};

/// Books a new appointment for a client with a provider
///
/// Validation is sequential and pre-commit: the first failing check aborts
/// with no partial writes. The notification and the cache invalidation that
/// follow a successful booking are side channels; their failures are logged
/// and swallowed.
pub struct CreateAppointmentService {
    appointments: Arc<dyn AppointmentStore>,
    overrides: Arc<dyn ScheduleOverrideStore>,
    users: Arc<dyn UserStore>,
    notifications: Arc<dyn NotificationStore>,
    cache: Arc<dyn CacheProvider>,
    template: ScheduleTemplate,
    clock: Arc<dyn Clock>,
}

impl CreateAppointmentService {
    /// Create the service with its injected collaborators
    pub fn new(
        appointments: Arc<dyn AppointmentStore>,
        overrides: Arc<dyn ScheduleOverrideStore>,
        users: Arc<dyn UserStore>,
        notifications: Arc<dyn NotificationStore>,
        cache: Arc<dyn CacheProvider>,
        template: ScheduleTemplate,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            appointments,
            overrides,
            users,
            notifications,
            cache,
            template,
            clock,
        }
    }

    /// Book the hour slot containing `date` for `user_id` with `provider_id`
    ///
    /// The timestamp is truncated to the top of its hour before any check;
    /// the persisted appointment starts out `Pending`.
    ///
    /// # Errors
    ///
    /// - `PastDate` when the truncated slot is not strictly in the future
    /// - `SelfBooking` when client and provider are the same user
    /// - `InvalidProvider` when the provider is missing or not a provider
    /// - `InvalidClient` when the user is missing or not a client
    /// - `SlotUnavailable` when template and overrides leave the hour closed
    /// - `SlotTaken` when the slot already carries an appointment, whether
    ///   seen by the pre-check or surfaced by the store's uniqueness
    ///   constraint under a concurrent booking
    pub async fn execute(
        &self,
        user_id: Uuid,
        provider_id: Uuid,
        date: DateTime<Utc>,
    ) -> AppResult<Appointment> {
        let appointment_date = clock::start_of_hour(date);

        if appointment_date <= self.clock.now() {
            return Err(AppError::past_date(
                "an appointment cannot be created on a past date",
            ));
        }

        if user_id == provider_id {
            return Err(AppError::self_booking(
                "an appointment cannot be created with yourself",
            ));
        }

        let provider = self.users.find_by_id(provider_id).await?;
        let user = self.users.find_by_id(user_id).await?;

        if !provider.is_some_and(|provider| provider.is_provider()) {
            return Err(AppError::invalid_provider(
                "selected provider cannot take appointments",
            ));
        }

        if !user.is_some_and(|user| user.is_client()) {
            return Err(AppError::invalid_client("only clients can book appointments"));
        }

        let slot_override = self
            .overrides
            .find_by_date(provider_id, appointment_date)
            .await?;
        if !self
            .template
            .is_slot_open(appointment_date.hour(), slot_override.as_ref())
        {
            return Err(AppError::slot_unavailable(
                "this appointment time is not available",
            ));
        }

        if self
            .appointments
            .find_by_date(provider_id, appointment_date)
            .await?
            .is_some()
        {
            return Err(AppError::slot_taken("this appointment is already booked"));
        }

        let appointment = self
            .appointments
            .create(NewAppointment {
                user_id,
                provider_id,
                date: appointment_date,
                status: AppointmentStatus::Pending,
            })
            .await?;

        let formatted_date = appointment_date.format("%d/%m/%Y at %H:%M");
        if let Err(err) = self
            .notifications
            .create(NewNotification {
                recipient_id: provider_id,
                content: format!("New appointment booked for {formatted_date}"),
            })
            .await
        {
            warn!(%provider_id, error = %err, "failed to queue booking notification");
        }

        let cache_key = cache::day_schedule_key(provider_id, appointment_date);
        if let Err(err) = self.cache.invalidate(&cache_key).await {
            warn!(%provider_id, key = %cache_key, error = %err, "failed to invalidate day schedule cache");
        }

        info!(
            appointment_id = %appointment.id,
            %user_id,
            %provider_id,
            date = %appointment_date,
            "appointment created"
        );
        Ok(appointment)
    }
}
