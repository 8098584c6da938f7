//! Configuration model for the devdash server.

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DevdashError, Result};

/// Root configuration, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DevdashConfig {
    /// Address the HTTP server listens on.
    pub bind: SocketAddr,
    /// How to reach the container runtime.
    pub runtime: RuntimeConfig,
}

/// Container runtime invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Runtime binary, looked up on `PATH` when not absolute.
    pub program: String,
    /// Arguments placed before the `ps` subcommand (e.g. `--context`).
    pub args: Vec<String>,
}

impl Default for DevdashConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            program: crate::constants::DEFAULT_RUNTIME.to_string(),
            args: Vec::new(),
        }
    }
}

impl DevdashConfig {
    /// Parses a YAML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DevdashError::Config`] if the document is not valid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| DevdashError::Config {
            message: e.to_string(),
        })
    }

    /// Loads a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`DevdashError::Io`] if the file cannot be read, or
    /// [`DevdashError::Config`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DevdashError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_yaml::from_str(&content).map_err(|e| DevdashError::Config {
            message: format!("{}: {e}", path.display()),
        })
    }
}
