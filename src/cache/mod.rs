// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! In-memory per-device cache of recent camera frames
//!
//! Process-local and disposable: the durable store remains the source of
//! truth, the cache is a read accelerator that starts cold after restart.
//! All mutation goes through one async mutex so concurrent pushes for the
//! same device cannot break the bounded-length or FIFO invariants.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::time::Instant;

/// One cached frame, most-recent-last in the per-device buffer
#[derive(Debug, Clone)]
pub struct CachedFrame {
    pub mac_address: String,
    pub payload: String,
    pub captured_at: DateTime<Utc>,
}

/// Liveness derived from the time since the device last posted a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Online,
    Offline,
    /// Device never seen by this process
    Unknown,
}

struct DeviceEntry {
    frames: VecDeque<CachedFrame>,
    last_received: Instant,
}

/// Cache of recent frames keyed by device id
pub struct ImageCache {
    entries: Mutex<HashMap<String, DeviceEntry>>,
    max_images: usize,
    expiration_window: Duration,
    idle_ttl: Duration,
}

impl ImageCache {
    #[must_use]
    pub fn new(max_images: usize, expiration_window: Duration, idle_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_images,
            expiration_window,
            idle_ttl,
        }
    }

    /// Appends a frame for a device, evicting by arrival order at capacity.
    ///
    /// The entry is created lazily on first push. Always bumps the
    /// last-received timestamp.
    pub async fn push(&self, device_id: &str, frame: CachedFrame) {
        let mut entries = self.entries.lock().await;
        let entry = entries
            .entry(device_id.to_string())
            .or_insert_with(|| DeviceEntry {
                frames: VecDeque::new(),
                last_received: Instant::now(),
            });

        entry.frames.push_back(frame);
        while entry.frames.len() > self.max_images {
            entry.frames.pop_front();
        }
        entry.last_received = Instant::now();
    }

    /// Most recently pushed frame for a device
    pub async fn latest(&self, device_id: &str) -> Option<CachedFrame> {
        let entries = self.entries.lock().await;
        entries.get(device_id).and_then(|e| e.frames.back().cloned())
    }

    /// Online/offline heuristic: a device is offline once it has been
    /// silent longer than the expiration window.
    pub async fn status(&self, device_id: &str) -> DeviceStatus {
        let entries = self.entries.lock().await;
        match entries.get(device_id) {
            None => DeviceStatus::Unknown,
            Some(entry) => {
                if entry.last_received.elapsed() > self.expiration_window {
                    DeviceStatus::Offline
                } else {
                    DeviceStatus::Online
                }
            }
        }
    }

    /// Current buffer contents for a device, oldest first
    pub async fn snapshot(&self, device_id: &str) -> Option<Vec<CachedFrame>> {
        let entries = self.entries.lock().await;
        entries
            .get(device_id)
            .map(|e| e.frames.iter().cloned().collect())
    }

    /// Drops entries for devices idle past the idle TTL.
    ///
    /// Bounds the outer device map: without this, every device id ever
    /// seen keeps an entry for the lifetime of the process.
    pub async fn cleanup(&self) {
        let mut entries = self.entries.lock().await;
        let before_count = entries.len();
        entries.retain(|_, entry| entry.last_received.elapsed() < self.idle_ttl);
        let removed = before_count - entries.len();
        if removed > 0 {
            tracing::debug!("Removed {} idle device cache entries", removed);
        }
    }

    /// (devices, total cached frames) for logging
    pub async fn stats(&self) -> (usize, usize) {
        let entries = self.entries.lock().await;
        let devices = entries.len();
        let frames = entries.values().map(|e| e.frames.len()).sum();
        (devices, frames)
    }
}
