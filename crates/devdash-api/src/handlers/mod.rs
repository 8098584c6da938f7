//! Route handlers.

pub mod devcontainers;
pub mod health;

use devdash_common::error::{DevdashError, Result};

/// Runs blocking lister work off the async reactor.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DevdashError::Internal {
            message: format!("lister task failed: {e}"),
        })?
}
