use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{InventoryError, Result};

/// Attributes that change between captures of the same element and so never
/// enter its signature.
pub const DEFAULT_VOLATILE_ATTRIBUTES: &[&str] = &[
    "id",
    "style",
    "tabindex",
    "aria-expanded",
    "aria-selected",
    "aria-checked",
    "aria-pressed",
    "aria-hidden",
    "data-state",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    pub identity: IdentityConfig,
    pub essentials: EssentialsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct IdentityConfig {
    /// Attribute names excluded from the signature (case-insensitive)
    pub volatile_attributes: Vec<String>,
    /// Whether the accessible name participates in the signature
    pub include_accessible_name: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            volatile_attributes: DEFAULT_VOLATILE_ATTRIBUTES
                .iter()
                .map(|a| a.to_string())
                .collect(),
            include_accessible_name: true,
        }
    }
}

impl IdentityConfig {
    pub fn is_volatile(&self, attribute: &str) -> bool {
        self.volatile_attributes
            .iter()
            .any(|a| a.trim().eq_ignore_ascii_case(attribute.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EssentialsConfig {
    /// Attach authored/token traces to color rows
    pub include_evidence: bool,
}

impl Default for EssentialsConfig {
    fn default() -> Self {
        Self {
            include_evidence: true,
        }
    }
}

impl Config {
    /// Location of the per-user config file, if a config directory exists.
    pub fn central_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("uinv").join("config.toml"))
    }

    /// Load config from `path`, the central config file, or defaults.
    ///
    /// An explicit path must exist; a missing central file falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::central_config_path() {
            Some(central) if central.is_file() => Self::from_file(&central),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_toml(&data)
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self
            .identity
            .volatile_attributes
            .iter()
            .any(|a| a.trim().is_empty())
        {
            return Err(InventoryError::Config(
                "identity.volatile_attributes must not contain blank names".to_string(),
            ));
        }
        Ok(())
    }
}
