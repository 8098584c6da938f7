//! `devdash serve` — Serve the devcontainer API.

use std::net::SocketAddr;

use anyhow::Context;
use clap::Args;
use devdash_api::AppState;
use devdash_common::config::DevdashConfig;

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Listen address (overrides the config file).
    #[arg(long, env = "DEVDASH_BIND")]
    pub bind: Option<SocketAddr>,
}

/// Executes the `serve` command.
///
/// Binds the listener and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the async runtime cannot start, the address
/// cannot be bound, or the server fails.
pub fn execute(args: ServeArgs, mut config: DevdashConfig) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    let state = AppState::from_config(&config);
    if !state.lister.runtime_available() {
        tracing::warn!(
            runtime = %config.runtime.program,
            "container runtime not found on PATH; list requests will fail"
        );
    }

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(config.bind)
            .await
            .with_context(|| format!("binding {}", config.bind))?;
        devdash_api::serve(listener, state, shutdown_signal())
            .await
            .context("serving API")
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
