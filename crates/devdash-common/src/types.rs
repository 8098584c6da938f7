//! Domain types for devcontainer records.
//!
//! The runtime hands back loosely shaped JSON. [`ContainerRecord::from_raw`]
//! is the single gate through which that JSON becomes a typed record: any
//! missing or mistyped field rejects the whole value.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DevdashError, Result};

/// Unique identifier for a running container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a new container ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns at most the first 12 characters, as `docker ps` shows them.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.char_indices().nth(12).map_or(&self.0, |(i, _)| &self.0[..i])
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A published host port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortBinding {
    /// Host address the port is bound on.
    pub host_ip: String,
    /// Host port number.
    pub host_port: u16,
}

/// The fixed label set every devcontainer must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevcontainerLabels {
    /// Devcontainer CLI identifier.
    #[serde(rename = "dev.containers.id")]
    pub id: String,
    /// Image release.
    #[serde(rename = "dev.containers.release")]
    pub release: String,
    /// Image source repository.
    #[serde(rename = "dev.containers.source")]
    pub source: String,
    /// Image build timestamp.
    #[serde(rename = "dev.containers.timestamp")]
    pub timestamp: String,
    /// Image variant.
    #[serde(rename = "dev.containers.variant")]
    pub variant: String,
    /// Host folder, shortened to its last two segments.
    #[serde(rename = "devcontainer.local_folder")]
    pub local_folder: String,
    /// OCI image reference name.
    #[serde(rename = "org.opencontainers.image.ref.name")]
    pub image_ref_name: String,
    /// OCI image version.
    #[serde(rename = "org.opencontainers.image.version")]
    pub image_version: String,
    /// Devcontainer metadata version.
    pub version: String,
}

/// One running devcontainer as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Container identifier.
    #[serde(rename = "Id")]
    pub id: ContainerId,
    /// Container names.
    #[serde(rename = "Names")]
    pub names: Vec<String>,
    /// Published ports, possibly empty.
    #[serde(rename = "Ports")]
    pub ports: Vec<PortBinding>,
    /// Required labels.
    #[serde(rename = "Labels")]
    pub labels: DevcontainerLabels,
}

impl ContainerRecord {
    /// Validates one raw runtime object into a typed record.
    ///
    /// Extra fields and extra labels are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DevdashError::SchemaViolation`] if a required field is
    /// missing or has the wrong type.
    pub fn from_raw(raw: Value) -> Result<Self> {
        let id = raw
            .get("Id")
            .and_then(Value::as_str)
            .unwrap_or("<unknown>")
            .to_string();
        serde_json::from_value(raw).map_err(|e| DevdashError::SchemaViolation {
            id,
            reason: e.to_string(),
        })
    }

    /// Validates every raw object, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns the first [`DevdashError::SchemaViolation`] encountered; no
    /// partial list is produced.
    pub fn from_raw_all(raw: Vec<Value>) -> Result<Vec<Self>> {
        raw.into_iter().map(Self::from_raw).collect()
    }
}
