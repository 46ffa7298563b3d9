// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Durable relational store backed by SQLite
//!
//! The pool is the one explicit backpressure point in the system: above
//! `db_max_connections` concurrent statements, acquisitions queue and wait
//! up to `db_acquire_timeout_secs` before failing.

mod devices;
mod frames;
mod readings;
mod users;

pub use frames::StoredFrame;
pub use readings::{AirQualityReading, TemperatureReading};
pub use users::UserRecord;

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::error::Result;

/// Split date/time representation used by the frame and reading tables.
///
/// Every timestamp written to the store goes through this one derivation
/// point, always from UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeParts {
    pub fecha: String,
    pub hora: String,
}

impl TimeParts {
    #[must_use]
    pub fn from_utc(now: DateTime<Utc>) -> Self {
        Self {
            fecha: now.format("%Y-%m-%d").to_string(),
            hora: now.format("%H:%M:%S").to_string(),
        }
    }
}

/// Handle to the relational store
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens the store and bootstraps the schema
    pub async fn connect(config: &Config) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            // Per-connection busy wait so pooled writers don't fail fast
            // with SQLITE_BUSY under write contention.
            .busy_timeout(Duration::from_secs(5))
            .pragma("journal_mode", "WAL")
            .pragma("synchronous", "NORMAL");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;

        tracing::info!(
            "Store ready at {} (pool limit: {})",
            config.database_url,
            config.db_max_connections
        );

        Ok(store)
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS usuarios (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                correo TEXT NOT NULL UNIQUE,
                contrasena TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS dispositivos (
                id TEXT PRIMARY KEY,
                mac_address TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS dispositivo_usuario (
                usuario_id INTEGER NOT NULL,
                dispositivo_id TEXT NOT NULL,
                PRIMARY KEY (usuario_id, dispositivo_id)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS camara (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                mac_address TEXT NOT NULL,
                guardar_fotografia TEXT NOT NULL,
                fecha TEXT NOT NULL,
                hora TEXT NOT NULL,
                dispositivo_id TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"CREATE INDEX IF NOT EXISTS idx_camara_dispositivo
              ON camara (dispositivo_id, fecha, hora)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS calidad_aire (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                dispositivo_id TEXT NOT NULL,
                indice INTEGER NOT NULL,
                fecha TEXT NOT NULL,
                hora TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS temperatura (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                dispositivo_id TEXT NOT NULL,
                grados REAL NOT NULL,
                fecha TEXT NOT NULL,
                hora TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
