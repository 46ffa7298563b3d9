// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # camwatch
//!
//! Backend for an IoT monitoring platform: camera devices post snapshot
//! frames, air-quality indices and temperature readings; users query the
//! latest data for devices they own.
//!
//! Stored frames live only for a short retention window and are removed by
//! a background sweep; a bounded in-memory cache serves the latest frame
//! per device and derives online/offline status from upload recency.
//!
//! ## Main modules
//! - `api`: HTTP API handlers
//! - `cache`: in-memory per-device frame cache
//! - `config`: configuration management
//! - `error`: error types
//! - `retention`: background retention sweep
//! - `store`: durable relational store
//! - `prelude`: commonly used types and traits

mod api;
mod cache;
mod config;
mod error;
mod retention;
mod store;
pub mod prelude;

// Re-export commonly used types
/// Application configuration
pub use config::Config;

/// Application error and result type
pub use error::{AppError, Result};

/// HTTP API router and state
pub use api::{AppState, create_router};

/// In-memory frame cache
pub use cache::{CachedFrame, DeviceStatus, ImageCache};

/// Background retention sweep loop
pub use retention::start_retention_loop;

/// Durable store and row types
pub use store::{AirQualityReading, Store, StoredFrame, TemperatureReading, TimeParts, UserRecord};
