//! `GET /v1`

use axum::Json;
use devdash_common::constants::HEALTH_OK;

/// Liveness check. Never touches the container runtime.
pub async fn handle() -> Json<&'static str> {
    Json(HEALTH_OK)
}
