// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::handlers::{
    create_item_handler, get_item_handler, get_model_handler, health_handler,
    list_items_handler, room_status_handler, upload_room_handler,
};
use crate::config::ServerConfig;
use crate::ingest::IngestService;
use crate::storage::CaptureStorage;
use crate::store::CaptureStore;

/// Application context shared by every handler
pub struct AppState {
    pub ingest: IngestService,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(ingest: IngestService, config: ServerConfig) -> Self {
        Self { ingest, config }
    }

    /// Open the database and prepare the upload tree described by `config`
    pub async fn from_config(config: ServerConfig) -> Result<Self> {
        config.validate().map_err(|e| anyhow!(e))?;

        let store = CaptureStore::open(&config.database_path).with_context(|| {
            format!("opening database {}", config.database_path.display())
        })?;
        if config.reset_db {
            warn!("Resetting capture database at {}", config.database_path.display());
            store.reset()?;
        }

        let storage = CaptureStorage::new(&config.upload_root);
        storage.ensure_layout().await?;

        Ok(Self::new(
            IngestService::new(Arc::new(store), storage),
            config,
        ))
    }

    /// In-memory database with uploads under `upload_root`
    pub fn new_for_test(upload_root: &Path) -> Self {
        let config = ServerConfig {
            upload_root: upload_root.to_path_buf(),
            ..ServerConfig::default()
        };
        let store = CaptureStore::open_in_memory().expect("in-memory sqlite should open");
        let storage = CaptureStorage::new(upload_root);
        Self::new(IngestService::new(Arc::new(store), storage), config)
    }
}

/// Build the capture API router
pub fn create_app(state: Arc<AppState>) -> Router {
    let origin = state.config.cors_origin_header().unwrap_or_else(|e| {
        warn!("{}; falling back to default origin", e);
        HeaderValue::from_static(crate::config::server::DEFAULT_CORS_ORIGIN)
    });

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/upload-room", post(upload_room_handler))
        .route("/api/items", get(list_items_handler).post(create_item_handler))
        .route("/api/item/:id", get(get_item_handler))
        .route("/api/model/:slug", get(get_model_handler))
        .route("/api/room/:slug/status", get(room_status_handler))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API until Ctrl+C or SIGTERM
pub async fn start_server(state: AppState) -> Result<()> {
    let addr = state.config.socket_addr().map_err(|e| anyhow!(e))?;
    let app = create_app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
