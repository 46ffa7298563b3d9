// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! User registration and login
//!
//! Credentials are compared as stored. Responses keep the wire contract of
//! the existing platform, including 400 for unknown users and wrong
//! passwords.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{require_fields, AppJson};
use crate::api::AppState;
use crate::error::Result;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub correo: String,
    pub contrasena: String,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub message: String,
    pub id: i64,
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> Result<Response> {
    require_fields(&[("correo", &req.correo), ("contrasena", &req.contrasena)])?;

    let Some(user) = state.store.find_user(&req.correo).await? else {
        return Ok((StatusCode::BAD_REQUEST, "Usuario incorrecto").into_response());
    };

    if user.contrasena != req.contrasena {
        return Ok((StatusCode::BAD_REQUEST, "Contraseña incorrecta").into_response());
    }

    tracing::debug!("User {} logged in", user.id);

    Ok((
        StatusCode::OK,
        Json(AccountResponse {
            message: "Usuario correcto".to_string(),
            id: user.id,
        }),
    )
        .into_response())
}

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> Result<Response> {
    require_fields(&[("correo", &req.correo), ("contrasena", &req.contrasena)])?;

    let user_id = state
        .store
        .register_user(&req.correo, &req.contrasena)
        .await?;

    tracing::info!("Registered user {}", user_id);

    Ok((
        StatusCode::OK,
        Json(AccountResponse {
            message: "Usuario creado correctamente".to_string(),
            id: user_id,
        }),
    )
        .into_response())
}
