// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Cache idle-entry cleanup task
//!
//! This module provides internal functionality for dropping cache entries
//! of devices that stopped posting. It's not part of the public API.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::cache::ImageCache;

/// Cleanup interval for idle device entries (60 seconds)
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Starts a background task that drops idle device cache entries
///
/// This is an internal function (pub(super)) used only by the retention
/// module to bound the device-keyed map. It runs every 60 seconds.
pub(super) fn start_cache_cleanup_task(
    cache: Arc<ImageCache>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut cleanup_ticker = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            tokio::select! {
                _ = cleanup_ticker.tick() => {
                    cache.cleanup().await;
                },
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        tracing::debug!("Stopping cache cleanup");
                        break;
                    }
                }
            }
        }
    })
}
