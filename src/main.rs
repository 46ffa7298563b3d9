use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use camwatch::{AppError, AppState, Config, ImageCache, Result, Store};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    setup_tracing();

    let config = Config::from_env();
    config.validate().map_err(AppError::Config)?;

    tracing::info!(
        "Loaded configuration: retention {}s, sweep every {}s, {} cached frames per device",
        config.retention_secs,
        config.sweep_interval_secs,
        config.max_images
    );

    // Durable store is the source of truth; the cache starts cold
    let store = Store::connect(&config).await.map_err(|e| {
        tracing::error!("Failed to open store: {}", e);
        e
    })?;

    let cache = Arc::new(ImageCache::new(
        config.max_images,
        Duration::from_secs(config.expiration_window_secs),
        Duration::from_secs(config.cache_idle_secs),
    ));

    let state = Arc::new(AppState {
        config: config.clone(),
        store: store.clone(),
        cache: cache.clone(),
    });

    // Канал завершения (graceful shutdown)
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Ожидание Ctrl+C
    tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
                let _ = shutdown_tx.send(true);
            }
        }
    });

    // Запускаем фоновую очистку устаревших кадров
    camwatch::start_retention_loop(shutdown_rx.clone(), config.clone(), store, cache);

    let app = camwatch::create_router(state);

    let addr: SocketAddr = config.server_addr.parse().map_err(|e| {
        tracing::error!("Invalid server address: {}", e);
        e
    })?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind address: {}", e);
        e
    })?;

    tracing::info!("camwatch starting on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET  /health                    - Health check");
    tracing::info!("  - POST /video                     - Frame upload");
    tracing::info!("  - GET  /estado-camara/:deviceId   - Device status");
    tracing::info!("  - POST /ver-imagen                - Latest frame");
    tracing::info!("  - POST /login, /register          - Accounts");

    // Запуск сервера с graceful shutdown
    let mut serve_shutdown = shutdown_rx.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = serve_shutdown.changed().await;
            tracing::info!("HTTP server shutting down");
        })
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            e
        })?;

    Ok(())
}

fn setup_tracing() {
    // Используем EnvFilter::from_default_env() для правильной обработки RUST_LOG
    // Если RUST_LOG не установлена, используем "info" по умолчанию
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
