// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Configuration module for the camwatch application
//!
//! Loads and parses configuration from environment variables.


/// Default configuration values
pub mod defaults {
    pub const SERVER_ADDR: &str = "0.0.0.0:3000";
    pub const DATABASE_URL: &str = "sqlite:camwatch.db";
    pub const MAX_IMAGES: usize = 20;
    pub const RETENTION_SECONDS: u64 = 5;
    pub const SWEEP_INTERVAL_SECONDS: u64 = 5;
    pub const EXPIRATION_WINDOW_SECONDS: u64 = 300;
    pub const CACHE_IDLE_SECONDS: u64 = 3600;
    pub const DB_MAX_CONNECTIONS: u32 = 10;
    pub const DB_ACQUIRE_TIMEOUT_SECONDS: u64 = 10;
    pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;
}

/// Environment variable names used by the application
pub mod env_vars {
    pub const SERVER_ADDR: &str = "SERVER_ADDR";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const MAX_IMAGES: &str = "MAX_IMAGES";
    pub const RETENTION_SECONDS: &str = "RETENTION_SECONDS";
    pub const SWEEP_INTERVAL_SECONDS: &str = "SWEEP_INTERVAL_SECONDS";
    pub const EXPIRATION_WINDOW_SECONDS: &str = "EXPIRATION_WINDOW_SECONDS";
    pub const CACHE_IDLE_SECONDS: &str = "CACHE_IDLE_SECONDS";
    pub const DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
    pub const DB_ACQUIRE_TIMEOUT_SECONDS: &str = "DB_ACQUIRE_TIMEOUT_SECONDS";
    pub const BODY_LIMIT_BYTES: &str = "BODY_LIMIT_BYTES";
}

/// Application-wide configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address for the HTTP server
    pub server_addr: String,
    /// Connection string for the relational store
    pub database_url: String,
    /// Per-device cap on cached frames
    pub max_images: usize,
    /// Maximum age a stored frame may reach before the sweep deletes it
    pub retention_secs: u64,
    /// Interval between background sweep passes
    pub sweep_interval_secs: u64,
    /// Silence duration after which a device is reported offline
    pub expiration_window_secs: u64,
    /// Idle duration after which a device's cache entry is dropped
    pub cache_idle_secs: u64,
    /// Upper bound on concurrent store connections
    pub db_max_connections: u32,
    /// How long an acquisition may wait for a pooled connection
    pub db_acquire_timeout_secs: u64,
    /// Upper bound on request body size (base64 snapshots)
    pub body_limit_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: defaults::SERVER_ADDR.to_string(),
            database_url: defaults::DATABASE_URL.to_string(),
            max_images: defaults::MAX_IMAGES,
            retention_secs: defaults::RETENTION_SECONDS,
            sweep_interval_secs: defaults::SWEEP_INTERVAL_SECONDS,
            expiration_window_secs: defaults::EXPIRATION_WINDOW_SECONDS,
            cache_idle_secs: defaults::CACHE_IDLE_SECONDS,
            db_max_connections: defaults::DB_MAX_CONNECTIONS,
            db_acquire_timeout_secs: defaults::DB_ACQUIRE_TIMEOUT_SECONDS,
            body_limit_bytes: defaults::BODY_LIMIT_BYTES,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(v) => v.parse::<T>().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: '{}'. Using default.", name, v);
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    /// Loads configuration from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let server_addr = std::env::var(env_vars::SERVER_ADDR)
            .unwrap_or_else(|_| defaults::SERVER_ADDR.to_string());
        let database_url = std::env::var(env_vars::DATABASE_URL)
            .unwrap_or_else(|_| defaults::DATABASE_URL.to_string());

        Config {
            server_addr,
            database_url,
            max_images: env_parse(env_vars::MAX_IMAGES, defaults::MAX_IMAGES),
            retention_secs: env_parse(env_vars::RETENTION_SECONDS, defaults::RETENTION_SECONDS),
            sweep_interval_secs: env_parse(
                env_vars::SWEEP_INTERVAL_SECONDS,
                defaults::SWEEP_INTERVAL_SECONDS,
            ),
            expiration_window_secs: env_parse(
                env_vars::EXPIRATION_WINDOW_SECONDS,
                defaults::EXPIRATION_WINDOW_SECONDS,
            ),
            cache_idle_secs: env_parse(env_vars::CACHE_IDLE_SECONDS, defaults::CACHE_IDLE_SECONDS),
            db_max_connections: env_parse(
                env_vars::DB_MAX_CONNECTIONS,
                defaults::DB_MAX_CONNECTIONS,
            ),
            db_acquire_timeout_secs: env_parse(
                env_vars::DB_ACQUIRE_TIMEOUT_SECONDS,
                defaults::DB_ACQUIRE_TIMEOUT_SECONDS,
            ),
            body_limit_bytes: env_parse(env_vars::BODY_LIMIT_BYTES, defaults::BODY_LIMIT_BYTES),
        }
    }

    /// Validates the loaded configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.server_addr.contains(':') {
            return Err(format!(
                "Invalid server address '{}': expected 'host:port'",
                self.server_addr
            ));
        }

        if self.database_url.trim().is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }

        if self.max_images == 0 {
            return Err("MAX_IMAGES must be at least 1".to_string());
        }

        if self.sweep_interval_secs == 0 {
            return Err("SWEEP_INTERVAL_SECONDS must be at least 1".to_string());
        }

        if self.db_max_connections == 0 {
            return Err("DB_MAX_CONNECTIONS must be at least 1".to_string());
        }

        Ok(())
    }
}
