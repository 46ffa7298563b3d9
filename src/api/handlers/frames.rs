// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Frame upload, camera status, and latest-image read path

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{require_fields, Ack, AppJson};
use crate::api::AppState;
use crate::cache::{CachedFrame, DeviceStatus};
use crate::error::{AppError, Result};

/// POST /video request body, as posted by camera devices
#[derive(Debug, Deserialize)]
pub struct UploadFrameRequest {
    /// Device credential
    pub mac: String,
    /// Base64-encoded snapshot
    pub image: String,
    /// Device id
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub estado: String,
}

#[derive(Debug, Deserialize)]
pub struct ViewImageRequest {
    /// Requesting user id
    pub usuario: i64,
    /// Device id
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub imagen: String,
}

/// POST /video
///
/// Validates, durably stores the frame, then updates the in-memory cache.
/// The cache is only touched after the insert succeeds: it must never
/// claim a frame the store does not have. Expired rows are removed later
/// by the background retention sweep.
pub async fn upload_frame(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<UploadFrameRequest>,
) -> Result<impl IntoResponse> {
    require_fields(&[("mac", &req.mac), ("image", &req.image), ("id", &req.id)])?;

    let now = Utc::now();
    state
        .store
        .insert_frame(&req.mac, &req.id, &req.image, now)
        .await?;

    state
        .cache
        .push(
            &req.id,
            CachedFrame {
                mac_address: req.mac,
                payload: req.image,
                captured_at: now,
            },
        )
        .await;

    tracing::debug!("Stored frame for device {}", req.id);

    Ok((
        StatusCode::OK,
        Json(Ack {
            message: "Datos insertados correctamente".to_string(),
        }),
    ))
}

/// GET /estado-camara/{device_id}
///
/// Time-based liveness heuristic: a device is offline once it has been
/// silent longer than the expiration window, and 404 if never seen.
pub async fn camera_status(
    State(state): State<Arc<AppState>>,
    Path(device_id): Path<String>,
) -> Result<impl IntoResponse> {
    let estado = match state.cache.status(&device_id).await {
        DeviceStatus::Unknown => return Err(AppError::NotFound),
        DeviceStatus::Online => "online",
        DeviceStatus::Offline => "offline",
    };

    Ok((
        StatusCode::OK,
        Json(StatusResponse {
            estado: estado.to_string(),
        }),
    ))
}

/// POST /ver-imagen
///
/// Ownership is checked before frame existence: a user without a link to
/// the device gets 403 whether or not frames exist. Reads are served from
/// the cache only; a cold cache answers 404 even if durable rows survive.
pub async fn view_image(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ViewImageRequest>,
) -> Result<impl IntoResponse> {
    require_fields(&[("id", &req.id)])?;

    if !state.store.user_owns_device(req.usuario, &req.id).await? {
        return Err(AppError::Unauthorized);
    }

    let frame = state.cache.latest(&req.id).await.ok_or(AppError::NotFound)?;

    Ok((
        StatusCode::OK,
        Json(ImageResponse {
            imagen: frame.payload,
        }),
    ))
}
