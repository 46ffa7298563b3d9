// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Air-quality and temperature readings

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Store, TimeParts};
use crate::error::Result;

/// Latest air-quality index for a device
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AirQualityReading {
    pub indice: i64,
    pub fecha: String,
    pub hora: String,
}

/// Latest temperature reading for a device
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TemperatureReading {
    pub grados: f64,
    pub fecha: String,
    pub hora: String,
}

impl Store {
    pub async fn insert_air_quality(
        &self,
        device_id: &str,
        indice: i64,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let stamp = TimeParts::from_utc(now);
        sqlx::query(
            r"INSERT INTO calidad_aire (dispositivo_id, indice, fecha, hora)
              VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(device_id)
        .bind(indice)
        .bind(&stamp.fecha)
        .bind(&stamp.hora)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn insert_temperature(
        &self,
        device_id: &str,
        grados: f64,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let stamp = TimeParts::from_utc(now);
        sqlx::query(
            r"INSERT INTO temperatura (dispositivo_id, grados, fecha, hora)
              VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(device_id)
        .bind(grados)
        .bind(&stamp.fecha)
        .bind(&stamp.hora)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn latest_air_quality(&self, device_id: &str) -> Result<Option<AirQualityReading>> {
        let reading = sqlx::query_as::<_, AirQualityReading>(
            r"SELECT indice, fecha, hora
              FROM calidad_aire
              WHERE dispositivo_id = ?1
              ORDER BY fecha DESC, hora DESC
              LIMIT 1",
        )
        .bind(device_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(reading)
    }

    pub async fn latest_temperature(&self, device_id: &str) -> Result<Option<TemperatureReading>> {
        let reading = sqlx::query_as::<_, TemperatureReading>(
            r"SELECT grados, fecha, hora
              FROM temperatura
              WHERE dispositivo_id = ?1
              ORDER BY fecha DESC, hora DESC
              LIMIT 1",
        )
        .bind(device_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(reading)
    }
}
