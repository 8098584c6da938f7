//! Router assembly and serving.

use std::future::Future;

use axum::Router;
use axum::http::Uri;
use axum::routing::get;
use devdash_common::error::DevdashError;
use tokio::net::TcpListener;

use crate::error::ApiError;
use crate::handlers::{devcontainers, health};
use crate::middleware;
use crate::state::AppState;

/// Builds the `/v1` router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1", get(health::handle))
        .route("/v1/devcontainers", get(devcontainers::list))
        .route("/v1/devcontainers/{id}", get(devcontainers::get))
        .fallback(unknown_route)
        .layer(axum::middleware::from_fn(middleware::trace_request))
        .with_state(state)
}

async fn unknown_route(uri: Uri) -> ApiError {
    ApiError(DevdashError::NotFound {
        kind: "route",
        id: uri.path().to_string(),
    })
}

/// Serves the router on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if accepting connections fails.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "API server listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
