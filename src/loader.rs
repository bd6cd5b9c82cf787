//! Snapshot ingestion from the capture store's export files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::types::{ComponentKey, IdentityOverride, RawCapture};

/// Everything a derivation needs: the full capture set plus identity overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySnapshot {
    #[serde(default)]
    pub captures: Vec<RawCapture>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<ComponentKey, IdentityOverride>,
}

impl From<Vec<RawCapture>> for InventorySnapshot {
    fn from(captures: Vec<RawCapture>) -> Self {
        InventorySnapshot {
            captures,
            overrides: BTreeMap::new(),
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "yaml" | "yml"))
        .unwrap_or(false)
}

/// Parse a JSON snapshot: a bare capture array or a full snapshot object.
///
/// The shape is picked from the first token so that a bad field reports its
/// own line and column.
pub fn parse_snapshot_json(data: &str) -> Result<InventorySnapshot> {
    let is_array = data.trim_start().starts_with('[');
    if is_array {
        let captures: Vec<RawCapture> = serde_json::from_str(data)?;
        Ok(captures.into())
    } else {
        Ok(serde_json::from_str(data)?)
    }
}

/// Parse a YAML snapshot, accepting the same two shapes as JSON.
pub fn parse_snapshot_yaml(data: &str) -> Result<InventorySnapshot> {
    let value: serde_yaml::Value = serde_yaml::from_str(data)?;
    if value.is_sequence() {
        let captures: Vec<RawCapture> = serde_yaml::from_str(data)?;
        Ok(captures.into())
    } else {
        Ok(serde_yaml::from_str(data)?)
    }
}

/// Load a snapshot file; `.yaml`/`.yml` parse as YAML, everything else as JSON.
pub fn load_snapshot(path: &Path) -> Result<InventorySnapshot> {
    let data = std::fs::read_to_string(path)?;
    let snapshot = if is_yaml(path) {
        parse_snapshot_yaml(&data)?
    } else {
        parse_snapshot_json(&data)?
    };
    log::debug!(
        "loaded {} captures and {} overrides from {}",
        snapshot.captures.len(),
        snapshot.overrides.len(),
        path.display()
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn bare_array_parses_without_overrides() {
        let snapshot =
            parse_snapshot_json(r#"[{"id":"c1","url":"https://a.dev"},{"id":"c2"}]"#)
                .expect("parse array");
        assert_eq!(snapshot.captures.len(), 2);
        assert!(snapshot.overrides.is_empty());
    }

    #[test]
    fn snapshot_object_parses_overrides() {
        let snapshot = parse_snapshot_json(
            r#"{"captures":[{"id":"c1"}],"overrides":{"abc":{"displayName":"Primary button"}}}"#,
        )
        .expect("parse object");
        assert_eq!(snapshot.captures.len(), 1);
        assert_eq!(
            snapshot.overrides["abc"].display_name.as_deref(),
            Some("Primary button")
        );
    }

    #[test]
    fn yaml_files_are_detected_by_extension() {
        let mut file = Builder::new().suffix(".yaml").tempfile().expect("tempfile");
        writeln!(
            file,
            "- id: c1\n  createdAt: 5\n  styles:\n    primitives:\n      padding:\n        top: 4px"
        )
        .expect("write yaml");

        let snapshot = load_snapshot(file.path()).expect("load yaml");
        assert_eq!(snapshot.captures[0].created_at, 5);
        let padding = snapshot.captures[0]
            .styles
            .primitives
            .padding
            .as_ref()
            .expect("padding");
        assert_eq!(padding.top, "4px");
        assert_eq!(padding.left, "0px");
    }

    #[test]
    fn invalid_json_is_a_serialization_error() {
        let err = parse_snapshot_json("{\"captures\": 3}").unwrap_err();
        assert!(matches!(err, InventoryError::Serialization(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_snapshot(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, InventoryError::Io(_)));
    }
    #[test]
    fn bad_field_reports_its_location() {
        let err = parse_snapshot_json(
            "{\"captures\":[\n  {\"id\":\"c1\",\"createdAt\":\"yesterday\"}\n]}",
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(!msg.contains("untagged"), "unexpected message: {msg}");
        assert!(msg.contains("yesterday"), "unexpected message: {msg}");
        assert!(msg.contains("line 2"), "unexpected message: {msg}");
    }

    #[test]
    fn bad_field_in_bare_array_reports_its_location() {
        let err = parse_snapshot_json("[{\"id\":\"c1\"},\n {\"id\":7}]").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 2"), "unexpected message: {msg}");
    }

    #[test]
    fn yaml_snapshot_object_parses_overrides() {
        let snapshot = parse_snapshot_yaml(
            "captures:\n  - id: c1\noverrides:\n  abc:\n    statusOverride: approved\n",
        )
        .expect("parse yaml object");
        assert_eq!(snapshot.captures.len(), 1);
        assert_eq!(
            snapshot.overrides["abc"].status_override.as_deref(),
            Some("approved")
        );
    }
}
