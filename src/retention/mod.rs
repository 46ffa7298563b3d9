// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Background retention sweep for stored frames
//!
//! One periodic task deletes frames older than the retention window across
//! all devices, replacing the original platform's one-timer-per-upload
//! scheme. Sweep failures are logged and never surfaced: by the time a
//! sweep runs, the upload that produced the rows has already been
//! acknowledged.

mod cleanup;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::cache::ImageCache;
use crate::config::Config;
use crate::store::Store;

/// Starts the periodic retention sweep loop
///
/// Spawns a background task that deletes expired frame rows every
/// `sweep_interval_secs`. Also starts the cache idle-entry cleanup task.
/// Both stop when the shutdown channel flips.
pub fn start_retention_loop(
    mut shutdown_rx: watch::Receiver<bool>,
    config: Config,
    store: Store,
    cache: Arc<ImageCache>,
) -> JoinHandle<()> {
    let interval = config.sweep_interval_secs;
    let max_age = Duration::from_secs(config.retention_secs);
    tracing::info!(
        "Starting retention sweep every {}s (threshold: {}s)",
        interval,
        max_age.as_secs()
    );

    let cleanup_handle = cleanup::start_cache_cleanup_task(cache, shutdown_rx.clone());

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval));
        loop {
            tokio::select! {
                _ = ticker.tick() => {},
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        tracing::info!("Stopping retention sweep");
                        let _ = cleanup_handle.await;
                        break;
                    }
                }
            }

            match store.sweep_expired(Utc::now(), max_age).await {
                Ok(0) => {}
                Ok(removed) => {
                    tracing::debug!("Retention sweep removed {} expired frames", removed);
                }
                Err(e) => {
                    // Fire-and-forget by design: the uploads behind these
                    // rows were acknowledged long ago, so there is no
                    // caller left to notify and no retry.
                    tracing::warn!("Retention sweep failed: {}", e);
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            sweep_interval_secs: 1,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_retention_loop_respects_shutdown_signal() {
        let config = test_config();
        let store = Store::connect(&config).await.unwrap();
        let cache = Arc::new(ImageCache::new(
            config.max_images,
            Duration::from_secs(config.expiration_window_secs),
            Duration::from_secs(config.cache_idle_secs),
        ));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = start_retention_loop(shutdown_rx, config, store, cache);

        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = shutdown_tx.send(true);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("retention loop should stop on shutdown")
            .unwrap();
    }

    #[tokio::test]
    async fn test_sweep_loop_removes_expired_rows() {
        let config = test_config();
        let store = Store::connect(&config).await.unwrap();
        let cache = Arc::new(ImageCache::new(
            config.max_images,
            Duration::from_secs(config.expiration_window_secs),
            Duration::from_secs(config.cache_idle_secs),
        ));

        // A frame stamped well in the past is expired on the first pass
        let old = Utc::now() - chrono::Duration::seconds(60);
        store
            .insert_frame("aa:bb", "dev-1", "payload", old)
            .await
            .unwrap();
        assert_eq!(store.frame_count("dev-1").await.unwrap(), 1);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = start_retention_loop(shutdown_rx, config, store.clone(), cache);

        // First tick fires immediately; poll until the sweep lands
        let mut swept = false;
        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if store.frame_count("dev-1").await.unwrap() == 0 {
                swept = true;
                break;
            }
        }
        assert!(swept, "expired frame should be removed by the sweep loop");

        let _ = shutdown_tx.send(true);
        let _ = handle.await;
    }
}
