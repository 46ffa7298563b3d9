// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for convenient use.
//! Users of the library can import everything they need with:
//!
//! ```rust
//! use camwatch::prelude::*;
//! ```

// Core types
pub use crate::config::Config;
pub use crate::error::{AppError, Result};

// HTTP surface
pub use crate::api::{AppState, create_router};

// Cache and retention
pub use crate::cache::{CachedFrame, DeviceStatus, ImageCache};
pub use crate::retention::start_retention_loop;

// Store
pub use crate::store::{
    AirQualityReading, Store, StoredFrame, TemperatureReading, TimeParts, UserRecord,
};
