//! Shared handler state.

use std::sync::Arc;

use devdash_common::config::DevdashConfig;
use devdash_runtime::client::{CliRuntimeClient, ContainerRuntimeClient};
use devdash_runtime::lister::ContainerLister;

/// State built once at startup and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Lister queried on every request.
    pub lister: ContainerLister,
}

impl AppState {
    /// Wraps an existing lister.
    #[must_use]
    pub const fn new(lister: ContainerLister) -> Self {
        Self { lister }
    }

    /// Builds state around an arbitrary runtime client.
    #[must_use]
    pub fn with_client(client: Arc<dyn ContainerRuntimeClient>) -> Self {
        Self::new(ContainerLister::new(client))
    }

    /// Builds state that shells out to the configured runtime CLI.
    #[must_use]
    pub fn from_config(config: &DevdashConfig) -> Self {
        let client = CliRuntimeClient::from_config(&config.runtime);
        Self::with_client(Arc::new(client))
    }
}
