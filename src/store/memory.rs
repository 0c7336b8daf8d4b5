// ABOUTME: In-memory reference implementation of the store traits
// ABOUTME: HashMap-backed, RwLock-guarded, enforcing per-slot uniqueness like a database index would
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Horario Contributors

//! A complete backend for the store traits with no external process. It backs
//! the test suite and small embedded deployments; production setups replace
//! it with a database adapter implementing the same traits.
//!
//! Uniqueness is checked under the collection's write lock, so two concurrent
//! `create` calls for the same slot resolve with exactly one success, the
//! same way a database uniqueness index resolves them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{
    AppointmentStore, NewAppointment, NewNotification, NewScheduleOverride, NotificationStore,
    ScheduleOverrideStore, UserStore,
};
use crate::errors::{AppError, AppResult};
use crate::models::{Appointment, Notification, ScheduleOverride, User};

/// In-memory backend implementing every store trait
///
/// Cloning is cheap and shares the underlying collections, mirroring how a
/// connection pool handle is passed around.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    appointments: Arc<RwLock<HashMap<Uuid, Appointment>>>,
    overrides: Arc<RwLock<HashMap<Uuid, ScheduleOverride>>>,
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    notifications: Arc<RwLock<Vec<Notification>>>,
    appointment_writes: Arc<AtomicU64>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user account
    ///
    /// Accounts are owned by an external identity system; this is the seam
    /// through which embedders and tests provide them.
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// All queued notifications, oldest first
    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }

    /// Number of appointment writes (creates plus saves) since construction
    ///
    /// Write-amplification instrumentation; the test suite uses it to pin
    /// down idempotency guarantees.
    #[must_use]
    pub fn appointment_writes(&self) -> u64 {
        self.appointment_writes.load(Ordering::Relaxed)
    }
}

fn same_day(date: DateTime<Utc>, year: i32, month: u32, day: u32) -> bool {
    date.year() == year && date.month() == month && date.day() == day
}

fn same_month(date: DateTime<Utc>, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>> {
        Ok(self.appointments.read().await.get(&id).cloned())
    }

    async fn find_by_date(
        &self,
        provider_id: Uuid,
        date: DateTime<Utc>,
    ) -> AppResult<Option<Appointment>> {
        let appointments = self.appointments.read().await;
        Ok(appointments
            .values()
            .find(|appointment| {
                appointment.provider_id == provider_id && appointment.date == date
            })
            .cloned())
    }

    async fn find_all_in_day(
        &self,
        provider_id: Uuid,
        year: i32,
        month: u32,
        day: u32,
    ) -> AppResult<Vec<Appointment>> {
        let appointments = self.appointments.read().await;
        let mut found: Vec<Appointment> = appointments
            .values()
            .filter(|appointment| {
                appointment.provider_id == provider_id
                    && same_day(appointment.date, year, month, day)
            })
            .cloned()
            .collect();
        found.sort_by_key(|appointment| appointment.date);
        Ok(found)
    }

    async fn find_all_in_month(
        &self,
        provider_id: Uuid,
        year: i32,
        month: u32,
    ) -> AppResult<Vec<Appointment>> {
        let appointments = self.appointments.read().await;
        let mut found: Vec<Appointment> = appointments
            .values()
            .filter(|appointment| {
                appointment.provider_id == provider_id
                    && same_month(appointment.date, year, month)
            })
            .cloned()
            .collect();
        found.sort_by_key(|appointment| appointment.date);
        Ok(found)
    }

    async fn create(&self, appointment: NewAppointment) -> AppResult<Appointment> {
        let mut appointments = self.appointments.write().await;

        // Uniqueness check and insert happen under one write lock, the
        // in-memory equivalent of a (provider_id, date) uniqueness index.
        let slot_taken = appointments.values().any(|existing| {
            existing.provider_id == appointment.provider_id && existing.date == appointment.date
        });
        if slot_taken {
            return Err(AppError::slot_taken(format!(
                "provider {} already has an appointment at {}",
                appointment.provider_id, appointment.date
            )));
        }

        let now = Utc::now();
        let record = Appointment {
            id: Uuid::new_v4(),
            user_id: appointment.user_id,
            provider_id: appointment.provider_id,
            date: appointment.date,
            status: appointment.status,
            created_at: now,
            updated_at: now,
        };
        appointments.insert(record.id, record.clone());
        self.appointment_writes.fetch_add(1, Ordering::Relaxed);
        debug!(appointment_id = %record.id, provider_id = %record.provider_id, "appointment stored");
        Ok(record)
    }

    async fn save(&self, mut appointment: Appointment) -> AppResult<Appointment> {
        let mut appointments = self.appointments.write().await;
        if !appointments.contains_key(&appointment.id) {
            return Err(AppError::resource_not_found("appointment"));
        }
        appointment.updated_at = Utc::now();
        appointments.insert(appointment.id, appointment.clone());
        self.appointment_writes.fetch_add(1, Ordering::Relaxed);
        Ok(appointment)
    }
}

#[async_trait]
impl ScheduleOverrideStore for MemoryStore {
    async fn find_by_date(
        &self,
        provider_id: Uuid,
        date: DateTime<Utc>,
    ) -> AppResult<Option<ScheduleOverride>> {
        let overrides = self.overrides.read().await;
        Ok(overrides
            .values()
            .find(|schedule_override| {
                schedule_override.provider_id == provider_id && schedule_override.date == date
            })
            .cloned())
    }

    async fn find_all_in_day(
        &self,
        provider_id: Uuid,
        year: i32,
        month: u32,
        day: u32,
    ) -> AppResult<Vec<ScheduleOverride>> {
        let overrides = self.overrides.read().await;
        let mut found: Vec<ScheduleOverride> = overrides
            .values()
            .filter(|schedule_override| {
                schedule_override.provider_id == provider_id
                    && same_day(schedule_override.date, year, month, day)
            })
            .cloned()
            .collect();
        found.sort_by_key(|schedule_override| schedule_override.date);
        Ok(found)
    }

    async fn find_all_in_month(
        &self,
        provider_id: Uuid,
        year: i32,
        month: u32,
    ) -> AppResult<Vec<ScheduleOverride>> {
        let overrides = self.overrides.read().await;
        let mut found: Vec<ScheduleOverride> = overrides
            .values()
            .filter(|schedule_override| {
                schedule_override.provider_id == provider_id
                    && same_month(schedule_override.date, year, month)
            })
            .cloned()
            .collect();
        found.sort_by_key(|schedule_override| schedule_override.date);
        Ok(found)
    }

    async fn create(&self, schedule_override: NewScheduleOverride) -> AppResult<ScheduleOverride> {
        let mut overrides = self.overrides.write().await;

        let slot_overridden = overrides.values().any(|existing| {
            existing.provider_id == schedule_override.provider_id
                && existing.date == schedule_override.date
        });
        if slot_overridden {
            return Err(AppError::already_exists(format!(
                "provider {} already has an override at {}",
                schedule_override.provider_id, schedule_override.date
            )));
        }

        let now = Utc::now();
        let record = ScheduleOverride {
            id: Uuid::new_v4(),
            provider_id: schedule_override.provider_id,
            date: schedule_override.date,
            status: schedule_override.status,
            created_at: now,
            updated_at: now,
        };
        overrides.insert(record.id, record.clone());
        debug!(override_id = %record.id, provider_id = %record.provider_id, "schedule override stored");
        Ok(record)
    }

    async fn save(&self, mut schedule_override: ScheduleOverride) -> AppResult<ScheduleOverride> {
        let mut overrides = self.overrides.write().await;
        if !overrides.contains_key(&schedule_override.id) {
            return Err(AppError::resource_not_found("schedule override"));
        }
        schedule_override.updated_at = Utc::now();
        overrides.insert(schedule_override.id, schedule_override.clone());
        Ok(schedule_override)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn create(&self, notification: NewNotification) -> AppResult<Notification> {
        let record = Notification {
            id: Uuid::new_v4(),
            recipient_id: notification.recipient_id,
            content: notification.content,
            read: false,
            created_at: Utc::now(),
        };
        self.notifications.write().await.push(record.clone());
        Ok(record)
    }
}
