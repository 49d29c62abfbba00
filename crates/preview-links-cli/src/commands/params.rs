//! Shared argument parsing for commands that take field values.

use std::fs::read_to_string;
use std::path::Path;

use miette::{miette, Result};
use preview_links::{FieldValue, PreviewConfig, Snapshot};

use crate::output::JsonDiagnostic;

/// Parse a key=value parameter string.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid parameter format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Interpret a raw parameter as a field value.
///
/// Integers and `true`/`false` keep their type; everything else is text.
pub fn field_value(raw: &str) -> FieldValue {
    if let Ok(n) = raw.parse::<i64>() {
        return FieldValue::Integer(n);
    }
    match raw {
        "true" => FieldValue::Boolean(true),
        "false" => FieldValue::Boolean(false),
        _ => FieldValue::Text(raw.to_string()),
    }
}

/// Build a snapshot from `name=value` parameters.
pub fn snapshot_from_params(locale: &str, params: &[(String, String)]) -> Snapshot {
    let mut snapshot = Snapshot::new(locale);
    for (name, raw) in params {
        snapshot.set(name.as_str(), field_value(raw));
    }
    snapshot
}

/// Load a config file, rendering parse errors against the file contents.
pub fn load_config(path: &Path) -> Result<PreviewConfig> {
    let content = read_to_string(path)
        .map_err(|e| miette!("Cannot read config file {}: {}", path.display(), e))?;

    PreviewConfig::from_json_str(&content).map_err(|e| {
        match JsonDiagnostic::from_config_error(path, &content, &e) {
            Some(diagnostic) => diagnostic.into(),
            None => miette!("Invalid config file {}: {}", path.display(), e),
        }
    })
}
