// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Device registration and ownership assignment

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use super::{require_fields, Ack, AppJson};
use crate::api::AppState;
use crate::error::Result;

#[derive(Debug, Deserialize)]
pub struct RegisterDeviceRequest {
    pub id: String,
    pub mac: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignDeviceRequest {
    pub usuario: i64,
    pub id: String,
}

/// POST /dispositivo
pub async fn register_device(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RegisterDeviceRequest>,
) -> Result<impl IntoResponse> {
    require_fields(&[("id", &req.id), ("mac", &req.mac)])?;

    state.store.register_device(&req.id, &req.mac).await?;

    tracing::info!("Registered device {}", req.id);

    Ok((
        StatusCode::OK,
        Json(Ack {
            message: "Dispositivo registrado".to_string(),
        }),
    ))
}

/// POST /asignar-dispositivo
///
/// Creates the ownership link that authorizes the user to read the
/// device's data.
pub async fn assign_device(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<AssignDeviceRequest>,
) -> Result<impl IntoResponse> {
    require_fields(&[("id", &req.id)])?;

    state.store.assign_device(req.usuario, &req.id).await?;

    Ok((
        StatusCode::OK,
        Json(Ack {
            message: "Dispositivo asignado".to_string(),
        }),
    ))
}
