//! `GET /v1/devcontainers` and `GET /v1/devcontainers/{id}`

use axum::Json;
use axum::extract::{Path, State};
use devdash_common::types::ContainerRecord;

use super::run_blocking;
use crate::error::ApiError;
use crate::state::AppState;

/// Lists every running devcontainer.
///
/// # Errors
///
/// Fails as a whole if the runtime fails or any record is invalid.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ContainerRecord>>, ApiError> {
    let lister = state.lister;
    let records = run_blocking(move || lister.list_devcontainers()).await?;
    Ok(Json(records))
}

/// Returns the devcontainer with exactly this id.
///
/// # Errors
///
/// Returns 404 when no running devcontainer has the id.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContainerRecord>, ApiError> {
    tracing::debug!(%id, "looking up devcontainer");
    let lister = state.lister;
    let record = run_blocking(move || lister.get_devcontainer(&id)).await?;
    Ok(Json(record))
}
