//! HTTP front end for a [`PathMap`].

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::path_map::PathMap;

/// Body served for paths with no redirect.
pub const FALLBACK_BODY: &str = "Hello, world!\n";

/// Build the router: every path is looked up in `map`.
pub fn router(map: PathMap) -> Router {
    Router::new()
        .fallback(redirect)
        .with_state(Arc::new(map))
        .layer(TraceLayer::new_for_http())
}

async fn redirect(State(map): State<Arc<PathMap>>, uri: Uri) -> Response {
    match map.lookup(uri.path()) {
        Some(dest) => {
            tracing::debug!("redirecting {} -> {dest}", uri.path());
            (StatusCode::FOUND, [(header::LOCATION, dest.to_string())]).into_response()
        }
        None => FALLBACK_BODY.into_response(),
    }
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(map: PathMap, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    serve_on(listener, map).await
}

/// Serve on an already-bound listener.
pub async fn serve_on(listener: TcpListener, map: PathMap) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("redirect server listening on {addr} ({} paths)", map.len());
    axum::serve(listener, router(map))
        .await
        .context("redirect server failed")
}
