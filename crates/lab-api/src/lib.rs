// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use clap::Parser;
use serde_json::json;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

pub mod aggregation;
pub mod models;
pub mod routes;
pub mod store;

use models::SharesEnvelope;
use store::{MemoryStore, StoreError, StoreObj};

const SERVICE_NAME: &str = "lab-api";

/// Error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = StatusCode::INTERNAL_SERVER_ERROR;
        error!("api error, code {code}: {self:?}");

        (code, Json(SharesEnvelope::<()>::failure(self.to_string()))).into_response()
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Bind address for REST api
    #[clap(long, env, default_value = "0.0.0.0:3000")]
    pub bind_addr: String,
    /// JSON file holding an array of analyses to serve
    #[clap(long, env)]
    pub data_file: Option<PathBuf>,
    /// JSON file holding an array of samples to serve
    #[clap(long, env)]
    pub samples_file: Option<PathBuf>,
}

/// Configuration struct
#[derive(Clone, Debug)]
pub struct Config {
    /// Seed file for the analyses, if any
    pub data_file: Option<PathBuf>,
    /// Seed file for the samples, if any
    pub samples_file: Option<PathBuf>,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Self { data_file: args.data_file.clone(), samples_file: args.samples_file.clone() }
    }
}

/// Application state struct
pub struct AppState {
    pub store: StoreObj,
}

impl AppState {
    /// Create a new AppState, loading the seed file when one is configured
    pub async fn new(config: &Config) -> Result<Arc<Self>> {
        let mut store = match &config.data_file {
            Some(path) => MemoryStore::from_file(path)
                .await
                .with_context(|| format!("Failed to load analyses from {}", path.display()))?,
            None => {
                tracing::warn!("No data file configured, starting with an empty store");
                MemoryStore::default()
            }
        };
        if let Some(path) = &config.samples_file {
            store = store
                .load_samples(path)
                .await
                .with_context(|| format!("Failed to load samples from {}", path.display()))?;
        }

        Ok(Self::with_store(Arc::new(store)))
    }

    /// Create an AppState around an existing store
    pub fn with_store(store: StoreObj) -> Arc<Self> {
        Arc::new(Self { store })
    }
}

/// Create the application router
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .merge(routes::shares::routes())
        .merge(routes::analyses::routes())
        .merge(routes::samples::routes())
        .with_state(state)
        .layer(cors)
        .fallback(not_found)
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME
    }))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": "The requested endpoint does not exist"
        })),
    )
}

/// Run the REST API service
pub async fn run(args: &Args) -> Result<()> {
    let config = args.into();
    let app_state = AppState::new(&config).await.context("Failed to initialize AppState")?;
    let listener = tokio::net::TcpListener::bind(&args.bind_addr)
        .await
        .context("Failed to bind a TCP listener")?;

    tracing::info!("REST API listening on: {}", args.bind_addr);
    axum::serve(listener, self::app(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("REST API service failed")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                error!("failed to install signal handler: {err}");
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
}
