//! HTTP API module for the camwatch backend
//!
//! Provides the REST endpoints devices and users talk to.
//!
//! # Endpoints
//! - `GET  /` — welcome banner
//! - `GET  /health` — health check
//! - `POST /video` — frame upload from a camera device
//! - `GET  /estado-camara/{device_id}` — online/offline status
//! - `POST /ver-imagen` — latest cached frame for an owned device
//! - `POST /login`, `POST /register` — user accounts
//! - `POST /dispositivo`, `POST /asignar-dispositivo` — device registry
//! - `POST /calidad-aire`, `POST /temperatura`, `POST /ver-lecturas` — sensor readings

pub mod handlers;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::cache::ImageCache;
use crate::config::Config;
use crate::store::Store;

/// Application state shared with endpoints
pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub cache: Arc<ImageCache>,
}

/// Creates the main Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.body_limit_bytes;
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/health", get(handlers::health_check))
        .route("/video", post(handlers::upload_frame))
        .route("/estado-camara/{device_id}", get(handlers::camera_status))
        .route("/ver-imagen", post(handlers::view_image))
        .route("/login", post(handlers::login))
        .route("/register", post(handlers::register))
        .route("/dispositivo", post(handlers::register_device))
        .route("/asignar-dispositivo", post(handlers::assign_device))
        .route("/calidad-aire", post(handlers::post_air_quality))
        .route("/temperatura", post(handlers::post_temperature))
        .route("/ver-lecturas", post(handlers::view_readings))
        // Base64 snapshots are the largest bodies this API accepts
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
