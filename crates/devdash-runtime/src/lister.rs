//! Devcontainer listing on top of a runtime client.

use std::sync::Arc;

use devdash_common::constants::{LOCAL_FOLDER_LABEL, LOCAL_FOLDER_SEGMENTS};
use devdash_common::error::{DevdashError, Result};
use devdash_common::types::ContainerRecord;
use serde_json::Value;

use crate::client::{ContainerRuntimeClient, RawRecord};

/// Lists devcontainers, re-querying the runtime on every call.
///
/// Cheap to clone; clones share the same client.
#[derive(Clone)]
pub struct ContainerLister {
    client: Arc<dyn ContainerRuntimeClient>,
}

impl ContainerLister {
    /// Creates a lister filtering on the `devcontainer.local_folder` label.
    #[must_use]
    pub const fn new(client: Arc<dyn ContainerRuntimeClient>) -> Self {
        Self { client }
    }

    /// Returns whether the underlying runtime looks reachable.
    #[must_use]
    pub fn runtime_available(&self) -> bool {
        self.client.is_available()
    }

    /// Queries the runtime and shortens each record's local folder label.
    ///
    /// Records are returned unvalidated, in runtime order.
    ///
    /// # Errors
    ///
    /// Propagates runtime invocation and decoding errors.
    pub fn list_containers(&self) -> Result<Vec<RawRecord>> {
        let mut records = self.client.list_by_label(LOCAL_FOLDER_LABEL)?;
        for record in &mut records {
            shorten_local_folder(record);
        }
        tracing::info!(count = records.len(), "listed containers");
        Ok(records)
    }

    /// Lists and validates every devcontainer.
    ///
    /// # Errors
    ///
    /// Fails as a whole if the runtime fails or any single record does not
    /// match the devcontainer schema.
    pub fn list_devcontainers(&self) -> Result<Vec<ContainerRecord>> {
        ContainerRecord::from_raw_all(self.list_containers()?)
    }

    /// Returns the first devcontainer whose `Id` equals `id` exactly.
    ///
    /// Only the matching record is validated.
    ///
    /// # Errors
    ///
    /// Returns [`DevdashError::NotFound`] when nothing matches, a schema
    /// violation if the match is invalid, or any runtime error.
    pub fn get_devcontainer(&self, id: &str) -> Result<ContainerRecord> {
        let raw = self
            .list_containers()?
            .into_iter()
            .find(|r| r.get("Id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| DevdashError::NotFound {
                kind: "devcontainer",
                id: id.to_string(),
            })?;
        ContainerRecord::from_raw(raw)
    }
}

/// Shortens `Labels["devcontainer.local_folder"]` in place.
///
/// Records without the label, or with a non-string value, are untouched.
pub fn shorten_local_folder(record: &mut RawRecord) {
    let Some(folder) = record
        .get_mut("Labels")
        .and_then(|labels| labels.get_mut(LOCAL_FOLDER_LABEL))
    else {
        return;
    };
    if let Some(short) = folder.as_str().and_then(shorten_path) {
        *folder = Value::String(short);
    }
}

/// Keeps the last two `/`-separated segments of `path`.
///
/// Returns `None` when the result would be empty, so an empty label is
/// left as it is. Paths of two segments or fewer come back unchanged.
pub fn shorten_path(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').collect();
    let start = segments.len().saturating_sub(LOCAL_FOLDER_SEGMENTS);
    let short = segments[start..].join("/");
    (!short.is_empty()).then_some(short)
}
