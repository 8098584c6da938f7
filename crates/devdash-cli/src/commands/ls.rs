//! `devdash ls` — Print running devcontainers once.

use clap::Args;
use devdash_common::config::DevdashConfig;
use devdash_runtime::lister::ContainerLister;

use crate::output;

/// Arguments for the `ls` command.
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Print the records as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `ls` command.
///
/// Runs the same listing and validation as `GET /v1/devcontainers`.
///
/// # Errors
///
/// Returns an error if the runtime fails or a record is invalid.
pub fn execute(args: &LsArgs, config: &DevdashConfig) -> anyhow::Result<()> {
    let lister = devdash_api::AppState::from_config(config).lister;
    print_devcontainers(&lister, args.json)
}

fn print_devcontainers(lister: &ContainerLister, json: bool) -> anyhow::Result<()> {
    let records = lister.list_devcontainers()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No devcontainers running.");
        return Ok(());
    }

    println!("{}", output::table_header());
    for record in &records {
        println!("{}", output::table_row(record));
    }
    Ok(())
}
