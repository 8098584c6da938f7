//! Runtime output decoding and shape canonicalization.
//!
//! Runtimes differ in how they frame `ps` output. The engine API returns a
//! JSON array of objects with structured `Labels`/`Ports`; the docker CLI
//! with `--format "{{json .}}"` prints one object per line and flattens
//! `Labels`, `Names` and `Ports` to strings. Both become the engine shape.

use devdash_common::error::{DevdashError, Result};
use serde_json::{Map, Value, json};

/// Decodes runtime stdout into canonical container objects.
///
/// Output whose first non-blank byte is `[` is read as one JSON array;
/// anything else is read as one object per non-blank line.
///
/// # Errors
///
/// Returns [`DevdashError::MalformedOutput`] for undecodable JSON or for a
/// value that is not an object.
pub fn decode_output(stdout: &str) -> Result<Vec<Value>> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let values = if trimmed.starts_with('[') {
        let values: Vec<Value> =
            serde_json::from_str(trimmed).map_err(|e| DevdashError::MalformedOutput {
                line: e.line(),
                reason: e.to_string(),
            })?;
        values
            .into_iter()
            .map(|v| expect_object(v, 1))
            .collect::<Result<Vec<_>>>()?
    } else {
        let mut values = Vec::new();
        for (idx, line) in stdout.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let value: Value =
                serde_json::from_str(line).map_err(|e| DevdashError::MalformedOutput {
                    line: idx + 1,
                    reason: e.to_string(),
                })?;
            values.push(expect_object(value, idx + 1)?);
        }
        values
    };

    Ok(values.into_iter().map(canonicalize).collect())
}

fn expect_object(value: Value, line: usize) -> Result<Value> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(DevdashError::MalformedOutput {
            line,
            reason: format!("expected a JSON object, found {value}"),
        })
    }
}

/// Rewrites CLI-flattened fields into the engine shape.
///
/// Objects already in engine shape pass through unchanged.
#[must_use]
pub fn canonicalize(mut value: Value) -> Value {
    let Some(obj) = value.as_object_mut() else {
        return value;
    };

    if !obj.contains_key("Id") {
        if let Some(id) = obj.remove("ID") {
            let _ = obj.insert("Id".to_string(), id);
        }
    }

    if let Some(parsed) = obj.get("Labels").and_then(Value::as_str).map(parse_labels) {
        let _ = obj.insert("Labels".to_string(), Value::Object(parsed));
    }

    if let Some(parsed) = obj.get("Names").and_then(Value::as_str).map(parse_names) {
        let _ = obj.insert("Names".to_string(), parsed);
    }

    if let Some(parsed) = obj.get("Ports").and_then(Value::as_str).map(parse_ports) {
        let _ = obj.insert("Ports".to_string(), parsed);
    }

    value
}

/// Parses `k1=v1,k2=v2` into a label map.
///
/// The CLI joins labels with `,` without escaping, so a segment that has
/// no `=` is a continuation of the previous value (RFC-1123 timestamps,
/// folder names) and is re-joined to it with its comma.
fn parse_labels(labels: &str) -> Map<String, Value> {
    let mut entries: Vec<(String, String)> = Vec::new();
    for segment in labels.split(',') {
        if let Some((key, val)) = segment.split_once('=') {
            entries.push((key.to_string(), val.to_string()));
        } else if let Some((_, val)) = entries.last_mut() {
            val.push(',');
            val.push_str(segment);
        } else if !segment.is_empty() {
            entries.push((segment.to_string(), String::new()));
        }
    }
    entries
        .into_iter()
        .map(|(key, val)| (key, Value::String(val)))
        .collect()
}

fn parse_names(names: &str) -> Value {
    Value::Array(
        names
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| Value::String(n.to_string()))
            .collect(),
    )
}

/// Parses the CLI port summary into published host bindings.
///
/// `0.0.0.0:8080->80/tcp, :::8080->80/tcp, 5432/tcp` yields two bindings;
/// the unpublished `5432/tcp` is dropped. Host port ranges expand to one
/// binding per port.
fn parse_ports(ports: &str) -> Value {
    let mut bindings = Vec::new();
    for entry in ports.split(',').map(str::trim) {
        let Some((host, _container)) = entry.split_once("->") else {
            continue;
        };
        let Some((ip, port)) = host.rsplit_once(':') else {
            tracing::debug!(entry, "skipping port without host address");
            continue;
        };
        let ip = ip.trim_start_matches('[').trim_end_matches(']');
        match parse_port_range(port) {
            Some((start, end)) => {
                for p in start..=end {
                    bindings.push(json!({ "host_ip": ip, "host_port": p }));
                }
            }
            None => tracing::debug!(entry, "skipping unparseable host port"),
        }
    }
    Value::Array(bindings)
}

fn parse_port_range(port: &str) -> Option<(u16, u16)> {
    match port.split_once('-') {
        Some((start, end)) => {
            let start = start.parse().ok()?;
            let end = end.parse().ok()?;
            (start <= end).then_some((start, end))
        }
        None => port.parse().ok().map(|p| (p, p)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_array_framing() {
        let out = r#"[{"Id":"a"},{"Id":"b"}]"#;
        let values = decode_output(out).expect("decode");
        assert_eq!(values.len(), 2);
        assert_eq!(values[1]["Id"], "b");
    }

    #[test]
    fn decode_empty_array_and_blank_output() {
        assert!(decode_output("[]\n").expect("decode").is_empty());
        assert!(decode_output("  \n").expect("decode").is_empty());
    }

    #[test]
    fn decode_line_framing_skips_blank_lines() {
        let out = "{\"Id\":\"a\"}\n\n{\"Id\":\"b\"}\n";
        let values = decode_output(out).expect("decode");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn decode_reports_failing_line() {
        let out = "{\"Id\":\"a\"}\n{broken\n";
        let err = decode_output(out).unwrap_err();
        assert!(matches!(err, DevdashError::MalformedOutput { line: 2, .. }));
    }

    #[test]
    fn decode_rejects_non_object_values() {
        assert!(matches!(
            decode_output("[1, 2]"),
            Err(DevdashError::MalformedOutput { .. })
        ));
        assert!(matches!(
            decode_output("\"OK\""),
            Err(DevdashError::MalformedOutput { .. })
        ));
    }

    #[test]
    fn canonicalize_cli_shape() {
        let raw = json!({
            "ID": "abc",
            "Names": "happy_turing",
            "Labels": "devcontainer.local_folder=/home/alice/app,version=1.1.0,flag=",
            "Ports": "0.0.0.0:8080->80/tcp, :::8080->80/tcp, 5432/tcp",
        });
        let out = canonicalize(raw);
        assert_eq!(out["Id"], "abc");
        assert!(out.get("ID").is_none());
        assert_eq!(out["Names"], json!(["happy_turing"]));
        assert_eq!(out["Labels"]["devcontainer.local_folder"], "/home/alice/app");
        assert_eq!(out["Labels"]["version"], "1.1.0");
        assert_eq!(out["Labels"]["flag"], "");
        assert_eq!(
            out["Ports"],
            json!([
                {"host_ip": "0.0.0.0", "host_port": 8080},
                {"host_ip": "::", "host_port": 8080}
            ])
        );
    }

    #[test]
    fn labels_with_commas_keep_their_values() {
        let out = r#"{"ID":"abc","Labels":"dev.containers.timestamp=Tue, 02 Jan 2024 10:00:00 GMT,version=1.1.0,devcontainer.local_folder=/home/a/b, c"}"#;
        let values = decode_output(out).expect("decode");
        assert_eq!(
            values[0]["Labels"],
            json!({
                "dev.containers.timestamp": "Tue, 02 Jan 2024 10:00:00 GMT",
                "version": "1.1.0",
                "devcontainer.local_folder": "/home/a/b, c"
            })
        );
    }

    #[test]
    fn leading_label_segment_without_value() {
        assert_eq!(
            parse_labels("orphan,a=1,,b=x=y"),
            json!({"orphan": "", "a": "1,", "b": "x=y"})
                .as_object()
                .cloned()
                .expect("object")
        );
    }

    #[test]
    fn canonicalize_leaves_engine_shape_alone() {
        let raw = json!({
            "Id": "abc",
            "Names": ["/x"],
            "Labels": {"a": "b"},
            "Ports": [{"host_ip": "127.0.0.1", "host_port": 3000}],
        });
        assert_eq!(canonicalize(raw.clone()), raw);
    }

    #[test]
    fn empty_port_and_label_strings() {
        let out = canonicalize(json!({"ID": "a", "Labels": "", "Ports": ""}));
        assert_eq!(out["Labels"], json!({}));
        assert_eq!(out["Ports"], json!([]));
    }

    #[test]
    fn port_ranges_expand() {
        assert_eq!(
            parse_ports("127.0.0.1:9000-9002->9000-9002/tcp"),
            json!([
                {"host_ip": "127.0.0.1", "host_port": 9000},
                {"host_ip": "127.0.0.1", "host_port": 9001},
                {"host_ip": "127.0.0.1", "host_port": 9002}
            ])
        );
    }

    #[test]
    fn bracketed_ipv6_host() {
        assert_eq!(
            parse_ports("[::1]:7000->7000/udp"),
            json!([{"host_ip": "::1", "host_port": 7000}])
        );
    }
}
