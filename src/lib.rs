// ABOUTME: Main library entry point for the Horario booking engine
// ABOUTME: Availability resolution, booking invariants, and schedule lifecycle for hourly appointments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Horario Contributors

#![deny(unsafe_code)]

//! # Horario Booking Engine
//!
//! A transport-agnostic scheduling core that books appointments between
//! clients and providers on an hourly grid. It reconciles a default
//! availability template with per-slot provider overrides and existing
//! bookings, and enforces the booking invariants: no double-booking, no
//! past-dated changes, no wrong-role operations.
//!
//! ## Features
//!
//! - **Derived availability**: the bookable hours of a provider-day are
//!   computed per request from template plus overrides, never stored
//! - **Injected collaborators**: persistence, notifications, cache, and even
//!   the clock are trait parameters; an in-memory backend ships in-crate
//! - **Tagged failures**: every rejection carries a distinct error code a
//!   transport can map without string matching
//!
//! ## Architecture
//!
//! - **Models**: appointment, schedule override, user, and notification
//!   records shared across the engine
//! - **Availability**: the template-plus-overrides merge at the center of every
//!   schedule decision
//! - **Services**: one entry point per exposed operation: day schedule,
//!   month availability, booking, acceptance, schedule mutation
//! - **Store**: async repository traits plus the in-memory reference backend
//! - **Clock**: injectable current instant and the grid's calendar arithmetic
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use horario::availability::ScheduleTemplate;
//! use horario::clock::SystemClock;
//! use horario::errors::AppResult;
//! use horario::services::ProviderDayScheduleService;
//! use horario::store::MemoryStore;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let store = Arc::new(MemoryStore::new());
//!     let day_schedule = ProviderDayScheduleService::new(
//!         store.clone(),
//!         store.clone(),
//!         ScheduleTemplate::from_env()?,
//!         Arc::new(SystemClock),
//!     );
//!
//!     let slots = day_schedule.execute(Uuid::new_v4(), 2026, 8, 6).await?;
//!     println!(
//!         "{} of {} slots still bookable",
//!         slots.iter().filter(|slot| slot.available).count(),
//!         slots.len()
//!     );
//!     Ok(())
//! }
//! ```

/// Availability resolution: default template plus per-slot overrides
pub mod availability;

/// Cache invalidation contract for rendered schedule views
pub mod cache;

/// Clock abstraction and calendar arithmetic for the hourly grid
pub mod clock;

/// Unified error handling
pub mod errors;

/// Core data models
pub mod models;

/// Scheduling and booking services
pub mod services;

/// Store interfaces and the in-memory reference backend
pub mod store;
