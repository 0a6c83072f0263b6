//! HTTP transport for the analyzer.
//!
//! - `POST /analyze` with `{"command": "..."}` answers an [`AnalysisResponse`]
//! - `GET /health` answers `{"status": "ok"}`
//!
//! CORS is open to every origin, method and header.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    Analyzer, Executor,
    output::{AnalysisResponse, AnalyzeRequest},
};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

/// Serve until Ctrl-C, connecting the executor first and closing it last.
///
/// A store that fails to connect is logged and the server starts anyway;
/// analyses then report the execution error per request.
pub async fn serve(config: &ServerConfig, executor: Arc<dyn Executor>) -> std::io::Result<()> {
    if let Err(e) = executor.connect() {
        warn!("Could not connect document store: {}", e);
    }

    let state = AppState {
        analyzer: Arc::new(Analyzer::with_executor(executor.clone())),
    };
    let app = create_router(state);

    let address = config.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    let local: SocketAddr = listener.local_addr()?;
    info!("Listening on {} (POST /analyze, GET /health)", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = executor.close() {
        warn!("Could not close document store: {}", e);
    }
    Ok(())
}

/// Resolves on Ctrl-C. Without a signal handler the server runs until killed.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            warn!("Could not install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected analyze request: {}", rejection);
            return (StatusCode::BAD_REQUEST, "JSON inválido").into_response();
        }
    };

    let result = state.analyzer.analyze(&request.command);
    Json(AnalysisResponse::from(&result)).into_response()
}
