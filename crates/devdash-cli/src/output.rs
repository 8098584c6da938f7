//! Formatted output helpers for `devdash ls`.

use devdash_common::types::{ContainerRecord, PortBinding};

/// Column header matching [`table_row`].
#[must_use]
pub fn table_header() -> String {
    format!("{:<14} {:<24} {:<30} {}", "CONTAINER ID", "NAME", "FOLDER", "PORTS")
}

/// One table line for a devcontainer.
#[must_use]
pub fn table_row(record: &ContainerRecord) -> String {
    let name = record
        .names
        .first()
        .map_or("-", |n| n.trim_start_matches('/'));
    format!(
        "{:<14} {:<24} {:<30} {}",
        record.id.short(),
        name,
        record.labels.local_folder,
        format_ports(&record.ports)
    )
}

/// Formats host bindings as `ip:port`, bracketing IPv6 hosts.
#[must_use]
pub fn format_ports(ports: &[PortBinding]) -> String {
    if ports.is_empty() {
        return "-".to_string();
    }
    ports
        .iter()
        .map(|p| {
            if p.host_ip.contains(':') {
                format!("[{}]:{}", p.host_ip, p.host_port)
            } else {
                format!("{}:{}", p.host_ip, p.host_port)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
