//! Static file server for the built site.
//!
//! ```text
//! GET /health          → 200 "OK"
//! GET /<existing file> → the file, via ServeDir
//! GET /<anything else> → index.html, caching disabled
//! ```
//!
//! The catch-all serves the entry document so client-side routes resolve.
//! Its response carries `Cache-Control: no-cache, no-store, must-revalidate`
//! so a redeploy is picked up on the next navigation.

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::{net::TcpListener, signal};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::ServerConfig;

/// Name of the entry document served for unmatched routes.
pub const ENTRY_DOCUMENT: &str = "index.html";

pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Entry document not found: {0}")]
    MissingEntryDocument(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::MissingEntryDocument { .. } => StatusCode::NOT_FOUND,
        };

        (status, self.to_string()).into_response()
    }
}

#[derive(Debug, Clone)]
pub struct ServerState {
    pub dist: Arc<PathBuf>,
}

impl ServerState {
    pub fn new(dist: impl Into<PathBuf>) -> Self {
        Self {
            dist: Arc::new(dist.into()),
        }
    }
}

pub fn build_router(state: ServerState) -> Router {
    let spa = get(spa_fallback).with_state::<()>(state.clone());
    let files = ServeDir::new(state.dist.as_path()).fallback(spa);

    Router::new()
        .route("/health", get(health_handler))
        .fallback_service(files)
        .layer(TraceLayer::new_for_http())
}

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn spa_fallback(State(state): State<ServerState>) -> Result<Response, ServerError> {
    let entry = state.dist.join(ENTRY_DOCUMENT);
    let body = tokio::fs::read_to_string(&entry).await.map_err(|e| {
        warn!("Failed to read {}: {e}", entry.display());
        ServerError::MissingEntryDocument(entry.display().to_string())
    })?;

    Ok((
        [
            (header::CACHE_CONTROL, NO_CACHE),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        Html(body),
    )
        .into_response())
}

/// Serve `dist` on the configured address until Ctrl+C or SIGTERM.
pub async fn serve(config: &ServerConfig, dist: PathBuf) -> Result<(), ServerError> {
    if !dist.join(ENTRY_DOCUMENT).exists() {
        warn!(
            "{} has no {ENTRY_DOCUMENT}; run `build` first",
            dist.display()
        );
    }

    info!("Serving {}", dist.display());
    let app = build_router(ServerState::new(dist));

    let address = config.address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use tempfile::TempDir;

    #[tokio::test]
    async fn health_is_ok() {
        let response = health_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn fallback_serves_entry_without_caching() {
        let dist = TempDir::new().unwrap();
        std::fs::write(dist.path().join("index.html"), "<h1>villa</h1>").unwrap();

        let response = spa_fallback(State(ServerState::new(dist.path())))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CACHE_CONTROL], NO_CACHE);
        assert_eq!(response.headers()[header::PRAGMA], "no-cache");
        assert_eq!(response.headers()[header::EXPIRES], "0");
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<h1>villa</h1>");
    }

    #[tokio::test]
    async fn fallback_without_entry_is_not_found() {
        let dist = TempDir::new().unwrap();
        let response = spa_fallback(State(ServerState::new(dist.path())))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn io_error_maps_to_internal_error() {
        let err = ServerError::Io(std::io::Error::other("disk gone"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
