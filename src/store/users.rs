// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! User accounts and the device ownership relation

use super::Store;
use crate::error::Result;

/// One registered user account
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub correo: String,
    pub contrasena: String,
}

impl Store {
    /// Creates a user account, returning its id.
    ///
    /// Passwords are stored and compared as-is, matching the platform's
    /// existing accounts.
    pub async fn register_user(&self, correo: &str, contrasena: &str) -> Result<i64> {
        let result = sqlx::query(r"INSERT INTO usuarios (correo, contrasena) VALUES (?1, ?2)")
            .bind(correo)
            .bind(contrasena)
            .execute(self.pool())
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Looks up a user account by email
    pub async fn find_user(&self, correo: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r"SELECT id, correo, contrasena FROM usuarios WHERE correo = ?1",
        )
        .bind(correo)
        .fetch_optional(self.pool())
        .await?;
        Ok(user)
    }

    /// Whether an ownership link authorizes `user_id` to read `device_id`
    pub async fn user_owns_device(&self, user_id: i64, device_id: &str) -> Result<bool> {
        let count: (i64,) = sqlx::query_as(
            r"SELECT COUNT(*) FROM dispositivo_usuario
              WHERE usuario_id = ?1 AND dispositivo_id = ?2",
        )
        .bind(user_id)
        .bind(device_id)
        .fetch_one(self.pool())
        .await?;
        Ok(count.0 > 0)
    }
}
