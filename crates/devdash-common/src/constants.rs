//! System-wide constants and defaults.

/// Label that marks a container as a devcontainer. Its value is the host
/// folder the devcontainer was opened from.
pub const LOCAL_FOLDER_LABEL: &str = "devcontainer.local_folder";

/// Default container runtime binary.
pub const DEFAULT_RUNTIME: &str = "docker";

/// Default HTTP listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Go template passed to `ps --format` so the runtime emits one JSON
/// object per container.
pub const PS_JSON_FORMAT: &str = "{{json .}}";

/// Body returned by the liveness endpoint.
pub const HEALTH_OK: &str = "OK";

/// Number of trailing path segments kept when shortening the local folder.
pub const LOCAL_FOLDER_SEGMENTS: usize = 2;
