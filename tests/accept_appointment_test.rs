// ABOUTME: Integration tests for the booking Accept path
// ABOUTME: Covers ownership enforcement, lookup misses, and idempotent acceptance
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2026 Horario Contributors

mod common;

use anyhow::Result;
use uuid::Uuid;

use common::{utc, TestHarness};
use horario::errors::ErrorCode;
use horario::models::AppointmentStatus;

fn harness() -> TestHarness {
    TestHarness::new(utc(2026, 3, 16, 8, 0, 0))
}

#[tokio::test]
async fn test_accept_confirms_a_pending_appointment() -> Result<()> {
    let harness = harness();
    let provider_id = Uuid::new_v4();
    let slot = utc(2026, 3, 17, 14, 0, 0);
    let appointment = harness
        .seed_appointment(Uuid::new_v4(), provider_id, slot)
        .await;
    let service = harness.accept_appointment_service();

    let accepted = service.execute(appointment.id, provider_id).await?;
    assert_eq!(accepted.id, appointment.id);
    assert_eq!(accepted.status, AppointmentStatus::Accepted);

    // The transition is persisted, not just returned.
    let stored = harness.appointment_at(provider_id, slot).await;
    assert_eq!(
        stored.map(|a| a.status),
        Some(AppointmentStatus::Accepted)
    );
    Ok(())
}

#[tokio::test]
async fn test_accept_fails_for_an_unknown_appointment() -> Result<()> {
    let harness = harness();
    let service = harness.accept_appointment_service();

    let err = service
        .execute(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_accept_fails_for_a_non_owning_provider() -> Result<()> {
    let harness = harness();
    let owner_id = Uuid::new_v4();
    let appointment = harness
        .seed_appointment(Uuid::new_v4(), owner_id, utc(2026, 3, 17, 14, 0, 0))
        .await;
    let service = harness.accept_appointment_service();

    let err = service
        .execute(appointment.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotOwner);

    // The appointment is untouched.
    let stored = harness
        .appointment_at(owner_id, utc(2026, 3, 17, 14, 0, 0))
        .await;
    assert_eq!(stored.map(|a| a.status), Some(AppointmentStatus::Pending));
    Ok(())
}

#[tokio::test]
async fn test_accept_is_idempotent_with_a_single_write() -> Result<()> {
    let harness = harness();
    let provider_id = Uuid::new_v4();
    let appointment = harness
        .seed_appointment(Uuid::new_v4(), provider_id, utc(2026, 3, 17, 14, 0, 0))
        .await;
    let service = harness.accept_appointment_service();

    // One write for the seed itself.
    assert_eq!(harness.store.appointment_writes(), 1);

    let first = service.execute(appointment.id, provider_id).await?;
    assert_eq!(first.status, AppointmentStatus::Accepted);
    assert_eq!(harness.store.appointment_writes(), 2);

    // Second call returns the same accepted record without another write.
    let second = service.execute(appointment.id, provider_id).await?;
    assert_eq!(second.status, AppointmentStatus::Accepted);
    assert_eq!(second.id, first.id);
    assert_eq!(harness.store.appointment_writes(), 2);
    Ok(())
}
