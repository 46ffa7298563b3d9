// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Frame persistence and retention sweeps
//!
//! A frame row only exists while its age stays within the retention window,
//! or until the next sweep pass notices it. Deletion is eventual: the sweep
//! runs on its own schedule and the table briefly holds two generations of
//! frames per device between passes.

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::{Store, TimeParts};
use crate::error::Result;

/// One persisted camera frame
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredFrame {
    pub device_id: String,
    pub mac_address: String,
    pub payload: String,
    pub fecha: String,
    pub hora: String,
}

impl Store {
    /// Inserts one frame row stamped with `now`
    pub async fn insert_frame(
        &self,
        mac_address: &str,
        device_id: &str,
        payload: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let stamp = TimeParts::from_utc(now);
        sqlx::query(
            r"INSERT INTO camara (mac_address, guardar_fotografia, fecha, hora, dispositivo_id)
              VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(mac_address)
        .bind(payload)
        .bind(&stamp.fecha)
        .bind(&stamp.hora)
        .bind(device_id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Deletes frames for every device whose age exceeds `max_age` at `now`.
    ///
    /// Returns the number of rows removed.
    pub async fn sweep_expired(&self, now: DateTime<Utc>, max_age: Duration) -> Result<u64> {
        let cutoff = now.timestamp() - max_age.as_secs() as i64;
        let result = sqlx::query(
            r"DELETE FROM camara
              WHERE CAST(strftime('%s', fecha || ' ' || hora) AS INTEGER) < ?1",
        )
        .bind(cutoff)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected())
    }

    /// Targeted form of [`Store::sweep_expired`] for a single device
    pub async fn sweep_device(
        &self,
        device_id: &str,
        now: DateTime<Utc>,
        max_age: Duration,
    ) -> Result<u64> {
        let cutoff = now.timestamp() - max_age.as_secs() as i64;
        let result = sqlx::query(
            r"DELETE FROM camara
              WHERE dispositivo_id = ?1
                AND CAST(strftime('%s', fecha || ' ' || hora) AS INTEGER) < ?2",
        )
        .bind(device_id)
        .bind(cutoff)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected())
    }

    /// Most recent durable frame for a device, if any
    pub async fn latest_frame(&self, device_id: &str) -> Result<Option<StoredFrame>> {
        let frame = sqlx::query_as::<_, StoredFrame>(
            r"SELECT dispositivo_id AS device_id,
                     mac_address,
                     guardar_fotografia AS payload,
                     fecha,
                     hora
              FROM camara
              WHERE dispositivo_id = ?1
              ORDER BY fecha DESC, hora DESC
              LIMIT 1",
        )
        .bind(device_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(frame)
    }

    /// Number of frame rows currently held for a device
    pub async fn frame_count(&self, device_id: &str) -> Result<u64> {
        let count: (i64,) =
            sqlx::query_as(r"SELECT COUNT(*) FROM camara WHERE dispositivo_id = ?1")
                .bind(device_id)
                .fetch_one(self.pool())
                .await?;
        Ok(count.0 as u64)
    }
}
