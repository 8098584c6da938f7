//! CLI command definitions and dispatch.

pub mod ls;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use devdash_common::config::DevdashConfig;

/// devdash — report running devcontainers.
#[derive(Parser, Debug)]
#[command(name = "devdash", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// YAML configuration file.
    #[arg(long, global = true, env = "DEVDASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Container runtime binary (overrides the config file).
    #[arg(long, global = true, env = "DEVDASH_RUNTIME")]
    pub runtime: Option<String>,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the devcontainer API over HTTP.
    Serve(serve::ServeArgs),
    /// Print running devcontainers once.
    Ls(ls::LsArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if configuration loading or the command fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli.config.as_deref(), cli.runtime)?;
    match cli.command {
        Command::Serve(args) => serve::execute(args, config),
        Command::Ls(args) => ls::execute(&args, &config),
    }
}

/// Layers defaults, the optional config file, and flag overrides.
fn resolve_config(
    path: Option<&std::path::Path>,
    runtime: Option<String>,
) -> anyhow::Result<DevdashConfig> {
    let mut config = match path {
        Some(p) => DevdashConfig::load(p)?,
        None => DevdashConfig::default(),
    };
    if let Some(program) = runtime {
        config.runtime.program = program;
    }
    Ok(config)
}
