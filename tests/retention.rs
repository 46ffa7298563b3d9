// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Store-level tests for frame retention and the ownership relation.
//!
//! Sweeps take `now` as an argument, so these tests drive the clock with
//! fixed instants instead of sleeping.

use std::time::Duration;

use camwatch::{Config, Store};
use chrono::{DateTime, TimeZone, Utc};

async fn make_store() -> Store {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        ..Config::default()
    };
    Store::connect(&config).await.unwrap()
}

fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 9, h, m, s).unwrap()
}

const RETENTION: Duration = Duration::from_secs(5);

#[tokio::test]
async fn sweep_deletes_old_generation_and_keeps_recent() {
    let store = make_store().await;

    // Frame at t=0 and a second one at t=3
    store
        .insert_frame("aa:bb", "dev-1", "old", at(12, 0, 0))
        .await
        .unwrap();
    store
        .insert_frame("aa:bb", "dev-1", "new", at(12, 0, 3))
        .await
        .unwrap();

    // Sweep at t=6: the t=0 frame is past the 5s threshold, the t=3 one
    // (age 3s) survives
    let removed = store
        .sweep_device("dev-1", at(12, 0, 6), RETENTION)
        .await
        .unwrap();
    assert_eq!(removed, 1);

    let latest = store.latest_frame("dev-1").await.unwrap().unwrap();
    assert_eq!(latest.payload, "new");
    assert_eq!(store.frame_count("dev-1").await.unwrap(), 1);
}

#[tokio::test]
async fn sweep_at_exact_threshold_age_keeps_frame() {
    let store = make_store().await;

    store
        .insert_frame("aa:bb", "dev-1", "edge", at(12, 0, 0))
        .await
        .unwrap();

    // Age exactly equal to the threshold is not "older than" it
    let removed = store
        .sweep_device("dev-1", at(12, 0, 5), RETENTION)
        .await
        .unwrap();
    assert_eq!(removed, 0);
    assert_eq!(store.frame_count("dev-1").await.unwrap(), 1);
}

#[tokio::test]
async fn sweep_device_only_touches_that_device() {
    let store = make_store().await;

    store
        .insert_frame("aa:bb", "dev-1", "f1", at(12, 0, 0))
        .await
        .unwrap();
    store
        .insert_frame("cc:dd", "dev-2", "f2", at(12, 0, 0))
        .await
        .unwrap();

    let removed = store
        .sweep_device("dev-1", at(12, 0, 30), RETENTION)
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(store.frame_count("dev-1").await.unwrap(), 0);
    assert_eq!(store.frame_count("dev-2").await.unwrap(), 1);
}

#[tokio::test]
async fn sweep_expired_covers_all_devices() {
    let store = make_store().await;

    store
        .insert_frame("aa:bb", "dev-1", "f1", at(12, 0, 0))
        .await
        .unwrap();
    store
        .insert_frame("cc:dd", "dev-2", "f2", at(12, 0, 1))
        .await
        .unwrap();
    store
        .insert_frame("cc:dd", "dev-2", "f3", at(12, 0, 28))
        .await
        .unwrap();

    let removed = store.sweep_expired(at(12, 0, 30), RETENTION).await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(store.frame_count("dev-1").await.unwrap(), 0);
    assert_eq!(store.frame_count("dev-2").await.unwrap(), 1);
}

#[tokio::test]
async fn sweep_on_device_with_no_rows_is_a_noop() {
    let store = make_store().await;

    let removed = store
        .sweep_device("ghost", at(12, 0, 0), RETENTION)
        .await
        .unwrap();
    assert_eq!(removed, 0);
}

#[tokio::test]
async fn latest_frame_orders_by_date_then_time() {
    let store = make_store().await;

    // Across a midnight boundary the later date wins even though the
    // time-of-day string is smaller
    store
        .insert_frame(
            "aa:bb",
            "dev-1",
            "before-midnight",
            Utc.with_ymd_and_hms(2025, 3, 9, 23, 59, 58).unwrap(),
        )
        .await
        .unwrap();
    store
        .insert_frame(
            "aa:bb",
            "dev-1",
            "after-midnight",
            Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 2).unwrap(),
        )
        .await
        .unwrap();

    let latest = store.latest_frame("dev-1").await.unwrap().unwrap();
    assert_eq!(latest.payload, "after-midnight");
    assert_eq!(latest.fecha, "2025-03-10");
}

#[tokio::test]
async fn sweep_cutoff_works_across_midnight() {
    let store = make_store().await;

    store
        .insert_frame(
            "aa:bb",
            "dev-1",
            "old",
            Utc.with_ymd_and_hms(2025, 3, 9, 23, 59, 50).unwrap(),
        )
        .await
        .unwrap();

    let removed = store
        .sweep_device(
            "dev-1",
            Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 5).unwrap(),
            RETENTION,
        )
        .await
        .unwrap();
    assert_eq!(removed, 1);
}

#[tokio::test]
async fn latest_frame_none_for_unknown_device() {
    let store = make_store().await;
    assert!(store.latest_frame("ghost").await.unwrap().is_none());
}

// --- ownership relation ---

#[tokio::test]
async fn ownership_requires_explicit_assignment() {
    let store = make_store().await;

    let user_id = store.register_user("ana@example.com", "pw").await.unwrap();
    store.register_device("dev-1", "aa:bb").await.unwrap();

    assert!(!store.user_owns_device(user_id, "dev-1").await.unwrap());

    store.assign_device(user_id, "dev-1").await.unwrap();
    assert!(store.user_owns_device(user_id, "dev-1").await.unwrap());

    // Re-assigning is idempotent
    store.assign_device(user_id, "dev-1").await.unwrap();
    assert!(store.user_owns_device(user_id, "dev-1").await.unwrap());
}

#[tokio::test]
async fn find_user_returns_stored_credentials() {
    let store = make_store().await;

    let user_id = store.register_user("ana@example.com", "pw").await.unwrap();

    let user = store.find_user("ana@example.com").await.unwrap().unwrap();
    assert_eq!(user.id, user_id);
    assert_eq!(user.contrasena, "pw");

    assert!(store.find_user("nadie@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_registration_fails() {
    let store = make_store().await;

    store.register_user("ana@example.com", "pw").await.unwrap();
    let err = store.register_user("ana@example.com", "other").await;
    assert!(err.is_err());
}

// --- readings ---

#[tokio::test]
async fn latest_reading_wins_per_kind() {
    let store = make_store().await;

    store
        .insert_air_quality("dev-1", 10, at(12, 0, 0))
        .await
        .unwrap();
    store
        .insert_air_quality("dev-1", 55, at(12, 0, 10))
        .await
        .unwrap();
    store
        .insert_temperature("dev-1", 19.0, at(12, 0, 0))
        .await
        .unwrap();
    store
        .insert_temperature("dev-1", 22.5, at(12, 0, 10))
        .await
        .unwrap();

    let aire = store.latest_air_quality("dev-1").await.unwrap().unwrap();
    assert_eq!(aire.indice, 55);

    let temp = store.latest_temperature("dev-1").await.unwrap().unwrap();
    assert_eq!(temp.grados, 22.5);

    assert!(store.latest_air_quality("dev-2").await.unwrap().is_none());
}
