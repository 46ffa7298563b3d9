// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Air-quality and temperature reading endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{require_fields, Ack, AppJson};
use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::store::{AirQualityReading, TemperatureReading};

#[derive(Debug, Deserialize)]
pub struct AirQualityRequest {
    pub id: String,
    pub indice: i64,
}

#[derive(Debug, Deserialize)]
pub struct TemperatureRequest {
    pub id: String,
    pub grados: f64,
}

#[derive(Debug, Deserialize)]
pub struct ViewReadingsRequest {
    pub usuario: i64,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ReadingsResponse {
    pub calidad_aire: Option<AirQualityReading>,
    pub temperatura: Option<TemperatureReading>,
}

/// POST /calidad-aire
pub async fn post_air_quality(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<AirQualityRequest>,
) -> Result<impl IntoResponse> {
    require_fields(&[("id", &req.id)])?;

    state
        .store
        .insert_air_quality(&req.id, req.indice, Utc::now())
        .await?;

    Ok((
        StatusCode::OK,
        Json(Ack {
            message: "Lectura registrada".to_string(),
        }),
    ))
}

/// POST /temperatura
pub async fn post_temperature(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<TemperatureRequest>,
) -> Result<impl IntoResponse> {
    require_fields(&[("id", &req.id)])?;

    state
        .store
        .insert_temperature(&req.id, req.grados, Utc::now())
        .await?;

    Ok((
        StatusCode::OK,
        Json(Ack {
            message: "Lectura registrada".to_string(),
        }),
    ))
}

/// POST /ver-lecturas
///
/// Latest readings for an owned device. Ownership is checked first, as
/// with the image read path.
pub async fn view_readings(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ViewReadingsRequest>,
) -> Result<impl IntoResponse> {
    require_fields(&[("id", &req.id)])?;

    if !state.store.user_owns_device(req.usuario, &req.id).await? {
        return Err(AppError::Unauthorized);
    }

    let calidad_aire = state.store.latest_air_quality(&req.id).await?;
    let temperatura = state.store.latest_temperature(&req.id).await?;

    Ok((
        StatusCode::OK,
        Json(ReadingsResponse {
            calidad_aire,
            temperatura,
        }),
    ))
}
