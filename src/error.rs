use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the outer shell (config, snapshot loading, lookups).
///
/// Derivations themselves are total and never produce these.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl InventoryError {
    pub fn not_found(what: impl Into<String>) -> Self {
        InventoryError::NotFound(what.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            InventoryError::Io(e) => ErrorPayload::new(
                ErrorCategory::Io,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            InventoryError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Fix the value at the reported line/column; the file must be a JSON array of captures or an object with a `captures` array.",
            ),
            InventoryError::Yaml(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check YAML indentation and field names (camelCase, e.g. createdAt).",
            ),
            InventoryError::ConfigParse(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Fix the TOML syntax; supported tables are [identity] and [essentials].",
            ),
            InventoryError::Config(msg) => ErrorPayload::new(
                ErrorCategory::Config,
                msg.to_string(),
                "Check --config and the values in [identity]/[essentials].",
            ),
            InventoryError::NotFound(msg) => {
                let lower = msg.to_ascii_lowercase();
                let remediation = if lower.contains("component") {
                    "List component keys with `uinv components` and pass one via --key."
                } else if lower.contains("capture") {
                    "Check the capture id in the snapshot; ids are case-sensitive."
                } else {
                    "Verify the identifier against the snapshot contents."
                };
                ErrorPayload::new(ErrorCategory::NotFound, msg.to_string(), remediation)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    Io,
    Input,
    Config,
    NotFound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
