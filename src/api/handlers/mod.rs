// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

mod auth;
mod devices;
mod frames;
mod health;
mod readings;

pub use auth::{login, register};
pub use devices::{assign_device, register_device};
pub use frames::{camera_status, upload_frame, view_image};
pub use health::{health_check, welcome};
pub use readings::{post_air_quality, post_temperature, view_readings};

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::Serialize;

use crate::error::{AppError, Result};

/// Generic acknowledgement body
#[derive(Debug, Serialize)]
pub struct Ack {
    pub message: String,
}

/// JSON extractor whose rejection lands in the application error taxonomy.
///
/// A body that omits a required key (or fails to parse at all) is a
/// validation failure like any other and must answer 400, not the
/// extractor's own status.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Rejects the request when any named field is empty
fn require_fields(fields: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}
