//! Container runtime client abstraction.

use std::process::Command;

use devdash_common::config::RuntimeConfig;
use devdash_common::constants::PS_JSON_FORMAT;
use devdash_common::error::{DevdashError, Result};
use serde_json::Value;

use crate::normalize;

/// One container as reported by the runtime, before validation.
pub type RawRecord = Value;

/// Read-only access to the containers a runtime is running.
///
/// Implementors return canonical JSON objects (see [`normalize`]) in the
/// order the runtime reports them.
pub trait ContainerRuntimeClient: Send + Sync {
    /// Lists running containers that carry the label `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be reached or its output
    /// cannot be decoded.
    fn list_by_label(&self, key: &str) -> Result<Vec<RawRecord>>;

    /// Returns whether the runtime looks reachable from this host.
    fn is_available(&self) -> bool;
}

/// Client that shells out to a docker-compatible CLI.
///
/// Every call spawns one `ps` process and waits for it to exit.
#[derive(Debug, Clone)]
pub struct CliRuntimeClient {
    program: String,
    args: Vec<String>,
}

impl CliRuntimeClient {
    /// Creates a client for the given runtime binary.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Creates a client from runtime configuration.
    #[must_use]
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.program.clone()).with_args(config.args.iter().cloned())
    }

    /// Sets the arguments placed before the `ps` subcommand.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the runtime binary.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    fn ps_command(&self, key: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        let _ = cmd
            .args(&self.args)
            .arg("ps")
            .arg("--filter")
            .arg(format!("label={key}"))
            .arg("--format")
            .arg(PS_JSON_FORMAT);
        cmd
    }
}

impl ContainerRuntimeClient for CliRuntimeClient {
    fn list_by_label(&self, key: &str) -> Result<Vec<RawRecord>> {
        let mut cmd = self.ps_command(key);
        tracing::debug!(program = %self.program, args = ?cmd.get_args().collect::<Vec<_>>(), "invoking container runtime");

        let output = cmd.output().map_err(|e| DevdashError::RuntimeUnavailable {
            program: self.program.clone(),
            source: e,
        })?;

        if !output.status.success() {
            return Err(DevdashError::RuntimeFailed {
                program: self.program.clone(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| DevdashError::MalformedOutput {
            line: 1,
            reason: format!("output is not valid UTF-8: {e}"),
        })?;
        normalize::decode_output(&stdout)
    }

    fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    /// Runs `script` through `sh -c`; the `ps ...` arguments land in `$0..`.
    fn shell(script: &str) -> CliRuntimeClient {
        CliRuntimeClient::new("sh").with_args(["-c", script])
    }

    #[test]
    fn ps_arguments_follow_prefix_args() {
        let client = shell(r#"printf '{"Id":"%s","Filter":"%s","Format":"%s"}\n' "$0" "$2" "$4""#);
        let records = client
            .list_by_label("devcontainer.local_folder")
            .expect("list");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Id"], "ps");
        assert_eq!(records[0]["Filter"], "label=devcontainer.local_folder");
        assert_eq!(records[0]["Format"], "{{json .}}");
    }

    #[test]
    fn line_framed_output_is_decoded() {
        let client = shell(
            r#"printf '%s\n' '{"ID":"a","Labels":"x=1"}' '{"ID":"b","Labels":"x=2"}'"#,
        );
        let records = client.list_by_label("x").expect("list");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Id"], "a");
        assert_eq!(records[1]["Labels"]["x"], "2");
    }

    #[test]
    fn empty_output_is_empty_list() {
        let client = shell("true");
        assert!(client.list_by_label("x").expect("list").is_empty());
    }

    #[test]
    fn nonzero_exit_is_runtime_failed() {
        let client = shell("echo 'daemon not running' >&2; exit 3");
        let err = client.list_by_label("x").unwrap_err();
        assert!(matches!(
            &err,
            DevdashError::RuntimeFailed { code: 3, stderr, .. } if stderr == "daemon not running"
        ));
    }

    #[test]
    fn killed_runtime_reports_status_minus_one() {
        let client = shell("kill -9 $$");
        let err = client.list_by_label("x").unwrap_err();
        assert!(matches!(err, DevdashError::RuntimeFailed { code: -1, .. }));
        assert!(err.to_string().contains("exited with status -1"));
    }

    #[test]
    fn garbage_output_is_malformed() {
        let client = shell("echo 'not json'");
        assert!(matches!(
            client.list_by_label("x"),
            Err(DevdashError::MalformedOutput { line: 1, .. })
        ));
    }

    #[test]
    fn missing_binary_is_runtime_unavailable() {
        let client = CliRuntimeClient::new("/nonexistent/devdash-runtime");
        assert!(!client.is_available());
        assert!(matches!(
            client.list_by_label("x"),
            Err(DevdashError::RuntimeUnavailable { .. })
        ));
    }

    #[test]
    fn from_config_copies_program_and_args() {
        let config = RuntimeConfig {
            program: "podman".into(),
            args: vec!["--remote".into()],
        };
        let client = CliRuntimeClient::from_config(&config);
        assert_eq!(client.program(), "podman");
        let cmd = client.ps_command("devcontainer.local_folder");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            [
                "--remote",
                "ps",
                "--filter",
                "label=devcontainer.local_folder",
                "--format",
                "{{json .}}"
            ]
        );
    }
}
