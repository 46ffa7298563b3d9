// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Device registry and ownership assignment

use super::Store;
use crate::error::Result;

impl Store {
    /// Registers a device, replacing the MAC address if it already exists
    pub async fn register_device(&self, device_id: &str, mac_address: &str) -> Result<()> {
        sqlx::query(r"INSERT OR REPLACE INTO dispositivos (id, mac_address) VALUES (?1, ?2)")
            .bind(device_id)
            .bind(mac_address)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    /// Creates the ownership link between a user and a device.
    ///
    /// Idempotent: re-assigning an existing link is a no-op.
    pub async fn assign_device(&self, user_id: i64, device_id: &str) -> Result<()> {
        sqlx::query(
            r"INSERT OR IGNORE INTO dispositivo_usuario (usuario_id, dispositivo_id)
              VALUES (?1, ?2)",
        )
        .bind(user_id)
        .bind(device_id)
        .execute(self.pool())
        .await?;
        Ok(())
    }
}
