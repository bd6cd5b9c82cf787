//! Derived view models.
//!
//! Nothing here is persisted: every value is recomputed from the capture set
//! on each query.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::capture::{EvidenceMethod, RawCapture};

/// Stable identity of a captured element (lowercase hex SHA-1).
pub type ComponentKey = String;

/// A capture paired with the component key assigned to it.
#[derive(Debug, Clone, Copy)]
pub struct KeyedCapture<'a> {
    pub key: &'a str,
    pub capture: &'a RawCapture,
}

/// Externally maintained identity edits for one component key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_override: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_override: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_override: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerComponent {
    pub id: ComponentKey,
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub status: String,
    /// Source label of the representative capture
    pub source: String,
    pub capture_count: usize,
    pub representative_capture_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_blob_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerComponentCapture {
    pub capture_id: String,
    pub component_id: ComponentKey,
    pub url: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_blob_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    pub created_at: i64,
}

/// Category of a catalogued style value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Color,
    Typography,
    Spacing,
    Border,
    Radius,
    Shadow,
}

impl StyleKind {
    pub fn all() -> [StyleKind; 6] {
        [
            StyleKind::Color,
            StyleKind::Typography,
            StyleKind::Spacing,
            StyleKind::Border,
            StyleKind::Radius,
            StyleKind::Shadow,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKind::Color => "color",
            StyleKind::Typography => "typography",
            StyleKind::Spacing => "spacing",
            StyleKind::Border => "border",
            StyleKind::Radius => "radius",
            StyleKind::Shadow => "shadow",
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        StyleKind::all()
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| {
                format!(
                    "Unknown style kind '{}'. Expected one of: color, typography, spacing, border, radius, shadow",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerStyle {
    pub id: String,
    pub token: String,
    pub value: String,
    pub kind: StyleKind,
    pub usage_count: usize,
    /// Source label of the first capture exhibiting this style
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerStyleLocation {
    pub capture_id: String,
    pub component_id: ComponentKey,
    pub url: String,
    pub source: String,
    pub usage_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerStyleRelatedComponent {
    pub component_id: ComponentKey,
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub capture_count: usize,
    /// Occurrences of the style across this component's captures
    pub usage_count: usize,
}

/// Fixed display sections, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    Text,
    Surface,
    Spacing,
    State,
}

impl Section {
    pub const ORDER: [Section; 4] = [
        Section::Text,
        Section::Surface,
        Section::Spacing,
        Section::State,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Text => "Text",
            Section::Surface => "Surface",
            Section::Spacing => "Spacing",
            Section::State => "State",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualEssentialsRow {
    pub section: Section,
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex8: Option<String>,
}

/// A row with its authored/token trace attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidencedRow {
    #[serde(flatten)]
    pub row: VisualEssentialsRow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authored: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl EvidencedRow {
    pub fn bare(row: VisualEssentialsRow) -> Self {
        Self {
            row,
            authored: None,
            token: None,
        }
    }

    pub fn has_trace(&self) -> bool {
        self.authored.is_some() || self.token.is_some()
    }
}

/// How the representative capture's authored styles were obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceState {
    pub method: EvidenceMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdp_error: Option<String>,
    /// Explanation shown when only computed values were available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualEssentials {
    pub rows: Vec<EvidencedRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<EvidenceState>,
}
