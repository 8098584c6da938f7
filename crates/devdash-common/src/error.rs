//! Unified error types for the devdash workspace.
//!
//! Every failure in the pipeline from runtime invocation to HTTP response
//! is one of these variants. None of them are retried; the API layer maps
//! each one to a status code.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum DevdashError {
    /// The container runtime process could not be spawned.
    #[error("container runtime `{program}` is unavailable: {source}")]
    RuntimeUnavailable {
        /// Program that failed to start.
        program: String,
        /// Underlying spawn error.
        source: std::io::Error,
    },

    /// The container runtime ran but exited unsuccessfully.
    #[error("container runtime `{program}` exited with status {code}: {stderr}")]
    RuntimeFailed {
        /// Program that was invoked.
        program: String,
        /// Exit code, `-1` if terminated by a signal.
        code: i32,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The runtime's output could not be decoded as JSON objects.
    #[error("malformed runtime output at line {line}: {reason}")]
    MalformedOutput {
        /// One-based line of the offending value (1 for array framing).
        line: usize,
        /// Decoder message.
        reason: String,
    },

    /// A container record does not match the required shape.
    #[error("container {id} violates the devcontainer schema: {reason}")]
    SchemaViolation {
        /// Identifier of the offending record, or `<unknown>`.
        id: String,
        /// Description of the mismatch.
        reason: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A background task failed before producing a result.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl DevdashError {
    /// Returns `true` for the not-found variant.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DevdashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_failed_display_includes_status() {
        let err = DevdashError::RuntimeFailed {
            program: "docker".into(),
            code: 1,
            stderr: "Cannot connect to the Docker daemon".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("status 1:"));
        assert!(msg.contains("Cannot connect"));
    }

    #[test]
    fn runtime_failed_display_for_signal_exit() {
        let err = DevdashError::RuntimeFailed {
            program: "docker".into(),
            code: -1,
            stderr: "killed".into(),
        };
        assert_eq!(
            err.to_string(),
            "container runtime `docker` exited with status -1: killed"
        );
    }

    #[test]
    fn not_found_is_detected() {
        let err = DevdashError::NotFound {
            kind: "devcontainer",
            id: "abc".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "devcontainer not found: abc");
    }
}
