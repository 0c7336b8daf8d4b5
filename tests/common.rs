// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides seeded stores, a frozen clock, and service construction helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2026 Horario Contributors
#![allow(dead_code)]

//! Shared test setup for the `horario` suite
//!
//! Every test runs against the in-memory backend with a frozen clock, so the
//! past/future booking rules are deterministic.

use std::sync::{Arc, Once};

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use horario::availability::ScheduleTemplate;
use horario::cache::MemoryCache;
use horario::clock::{Clock, FixedClock};
use horario::models::{Appointment, AppointmentStatus, ScheduleOverride, SlotStatus, User, UserRole};
use horario::services::{
    AcceptAppointmentService, CreateAppointmentService, ProviderDayScheduleService,
    ProviderMonthAvailabilityService, SetProviderScheduleService,
};
use horario::store::{
    AppointmentStore, MemoryStore, NewAppointment, NewScheduleOverride, ScheduleOverrideStore,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Build a UTC instant, panicking on an impossible test timestamp
pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .expect("valid test timestamp")
}

/// Everything a service test needs: shared store, cache, and frozen clock
pub struct TestHarness {
    pub store: Arc<MemoryStore>,
    pub cache: Arc<MemoryCache>,
    pub clock: Arc<FixedClock>,
    pub template: ScheduleTemplate,
}

impl TestHarness {
    /// Create a harness with the clock frozen at `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        init_test_logging();
        Self {
            store: Arc::new(MemoryStore::new()),
            cache: Arc::new(MemoryCache::new()),
            clock: Arc::new(FixedClock::new(now)),
            template: ScheduleTemplate::default(),
        }
    }

    /// Seed a user account with the given role
    pub async fn seed_user(&self, role: UserRole) -> User {
        let id = Uuid::new_v4();
        let user = User {
            id,
            email: format!("{role}-{id}@example.com"),
            display_name: None,
            role,
            created_at: self.clock.now(),
        };
        self.store.insert_user(user.clone()).await;
        user
    }

    /// Seed a client account
    pub async fn seed_client(&self) -> User {
        self.seed_user(UserRole::Client).await
    }

    /// Seed a provider account
    pub async fn seed_provider(&self) -> User {
        self.seed_user(UserRole::Provider).await
    }

    /// Insert an appointment directly through the store, bypassing validation
    pub async fn seed_appointment(
        &self,
        user_id: Uuid,
        provider_id: Uuid,
        date: DateTime<Utc>,
    ) -> Appointment {
        AppointmentStore::create(
            self.store.as_ref(),
            NewAppointment {
                user_id,
                provider_id,
                date,
                status: AppointmentStatus::Pending,
            },
        )
        .await
        .expect("seed appointment")
    }

    /// Insert a schedule override directly through the store
    pub async fn seed_override(
        &self,
        provider_id: Uuid,
        date: DateTime<Utc>,
        status: SlotStatus,
    ) -> ScheduleOverride {
        ScheduleOverrideStore::create(
            self.store.as_ref(),
            NewScheduleOverride {
                provider_id,
                date,
                status,
            },
        )
        .await
        .expect("seed override")
    }

    /// The appointment occupying a slot, if any
    pub async fn appointment_at(
        &self,
        provider_id: Uuid,
        date: DateTime<Utc>,
    ) -> Option<Appointment> {
        AppointmentStore::find_by_date(self.store.as_ref(), provider_id, date)
            .await
            .expect("find appointment")
    }

    /// The override controlling a slot, if any
    pub async fn override_at(
        &self,
        provider_id: Uuid,
        date: DateTime<Utc>,
    ) -> Option<ScheduleOverride> {
        ScheduleOverrideStore::find_by_date(self.store.as_ref(), provider_id, date)
            .await
            .expect("find override")
    }

    pub fn create_appointment_service(&self) -> CreateAppointmentService {
        CreateAppointmentService::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.cache.clone(),
            self.template,
            self.clock.clone(),
        )
    }

    pub fn accept_appointment_service(&self) -> AcceptAppointmentService {
        AcceptAppointmentService::new(self.store.clone())
    }

    pub fn day_schedule_service(&self) -> ProviderDayScheduleService {
        ProviderDayScheduleService::new(
            self.store.clone(),
            self.store.clone(),
            self.template,
            self.clock.clone(),
        )
    }

    pub fn month_availability_service(&self) -> ProviderMonthAvailabilityService {
        ProviderMonthAvailabilityService::new(
            self.store.clone(),
            self.store.clone(),
            self.template,
            self.clock.clone(),
        )
    }

    pub fn set_provider_schedule_service(&self) -> SetProviderScheduleService {
        SetProviderScheduleService::new(self.store.clone(), self.store.clone(), self.clock.clone())
    }
}
