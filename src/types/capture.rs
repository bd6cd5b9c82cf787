//! Raw capture records as exported by the extension's capture store.
//!
//! These types are read-only inputs. Every optional field degrades to "absent"
//! rather than failing, so a partially populated capture still deserializes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::color::to_hex8;

/// One recorded snapshot of a single DOM element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCapture {
    /// Unique capture identifier
    pub id: String,
    /// Page URL the element was captured from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Capture timestamp (epoch milliseconds)
    #[serde(default)]
    pub created_at: i64,
    /// Opaque reference to the stored screenshot blob
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_blob_id: Option<String>,
    /// Serialized outer HTML of the element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dom_snapshot: Option<String>,
    /// Structural attributes used to fingerprint the element
    #[serde(default)]
    pub identity: IdentityAttributes,
    #[serde(default)]
    pub styles: CapturedStyles,
}

/// Structural, content-independent descriptors of a captured element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessible_name: Option<String>,
    /// Selector-like path from the document root (e.g. `main > form > button`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

/// Everything the capture pipeline recorded about an element's styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedStyles {
    #[serde(default)]
    pub primitives: StylePrimitives,
    /// Authored (pre-cascade) values keyed by kebab-case CSS property
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<BTreeMap<String, String>>,
    /// Design-token names keyed by kebab-case CSS property
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<StyleEvidence>,
}

/// How the authored-style evidence was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceMethod {
    /// Inspected through the DevTools protocol; authored values are reliable
    Cdp,
    /// Fallback to post-cascade computed values only
    Computed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleEvidence {
    pub method: EvidenceMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdp_error: Option<String>,
}

/// Resolved style values for one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePrimitives {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorValue>,
    #[serde(default)]
    pub typography: Typography,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<BoxSides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<BorderColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<Corners>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<BoxSides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<BoxSides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<Gap>,
}

/// A resolved color: the browser's raw string plus an optional `#RRGGBBAA` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorValue {
    #[serde(default)]
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex8: Option<String>,
}

impl ColorValue {
    pub fn new(raw: impl Into<String>, hex8: Option<&str>) -> Self {
        Self {
            raw: raw.into(),
            hex8: hex8.map(str::to_string),
        }
    }

    /// The supplied hex8, or one derived from the raw value when it parses.
    pub fn resolved_hex8(&self) -> Option<String> {
        match self.hex8.as_deref().map(str::trim) {
            Some(hex) if !hex.is_empty() => Some(hex.to_string()),
            _ => to_hex8(&self.raw),
        }
    }

    /// Display value: hex8 when available, raw otherwise.
    pub fn display_value(&self) -> String {
        self.resolved_hex8()
            .unwrap_or_else(|| self.raw.trim().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty() && self.hex8.as_deref().map_or(true, |h| h.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
}

/// Font weight arrives either as a number (`700`) or a keyword (`"bold"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    Numeric(f64),
    Named(String),
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontWeight::Numeric(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            FontWeight::Numeric(n) => write!(f, "{n}"),
            FontWeight::Named(s) => write!(f, "{}", s.trim()),
        }
    }
}

fn zero_px() -> String {
    "0px".to_string()
}

/// Four per-side values in CSS order (top, right, bottom, left).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxSides {
    #[serde(default = "zero_px")]
    pub top: String,
    #[serde(default = "zero_px")]
    pub right: String,
    #[serde(default = "zero_px")]
    pub bottom: String,
    #[serde(default = "zero_px")]
    pub left: String,
}

impl Default for BoxSides {
    fn default() -> Self {
        Self::uniform("0px")
    }
}

impl BoxSides {
    pub fn new(top: &str, right: &str, bottom: &str, left: &str) -> Self {
        Self {
            top: top.to_string(),
            right: right.to_string(),
            bottom: bottom.to_string(),
            left: left.to_string(),
        }
    }

    pub fn uniform(value: &str) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sides in canonical order, paired with their CSS side name.
    pub fn named(&self) -> [(&'static str, &str); 4] {
        [
            ("top", self.top.as_str()),
            ("right", self.right.as_str()),
            ("bottom", self.bottom.as_str()),
            ("left", self.left.as_str()),
        ]
    }
}

/// Four corner radii in CSS corner order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corners {
    #[serde(default = "zero_px")]
    pub top_left: String,
    #[serde(default = "zero_px")]
    pub top_right: String,
    #[serde(default = "zero_px")]
    pub bottom_right: String,
    #[serde(default = "zero_px")]
    pub bottom_left: String,
}

impl Default for Corners {
    fn default() -> Self {
        Self::uniform("0px")
    }
}

impl Corners {
    pub fn new(top_left: &str, top_right: &str, bottom_right: &str, bottom_left: &str) -> Self {
        Self {
            top_left: top_left.to_string(),
            top_right: top_right.to_string(),
            bottom_right: bottom_right.to_string(),
            bottom_left: bottom_left.to_string(),
        }
    }

    pub fn uniform(value: &str) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn named(&self) -> [(&'static str, &str); 4] {
        [
            ("top-left", self.top_left.as_str()),
            ("top-right", self.top_right.as_str()),
            ("bottom-right", self.bottom_right.as_str()),
            ("bottom-left", self.bottom_left.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gap {
    #[serde(default = "zero_px")]
    pub row_gap: String,
    #[serde(default = "zero_px")]
    pub column_gap: String,
}

/// Border color in either of the two shapes the capture store has written.
///
/// Older captures carry a single color; newer ones carry one per side. The
/// shape is decided on read: any of `top`/`right`/`bottom`/`left` makes it
/// per-side, otherwise it is a single color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BorderColor {
    Single(ColorValue),
    PerSide(SideColors),
}

/// Union of both border color shapes, as read from a snapshot.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BorderColorFields {
    #[serde(default)]
    raw: Option<String>,
    #[serde(default)]
    hex8: Option<String>,
    #[serde(default)]
    top: Option<ColorValue>,
    #[serde(default)]
    right: Option<ColorValue>,
    #[serde(default)]
    bottom: Option<ColorValue>,
    #[serde(default)]
    left: Option<ColorValue>,
}

impl<'de> Deserialize<'de> for BorderColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let fields = BorderColorFields::deserialize(deserializer)?;
        let per_side = fields.top.is_some()
            || fields.right.is_some()
            || fields.bottom.is_some()
            || fields.left.is_some();
        Ok(if per_side {
            BorderColor::PerSide(SideColors {
                top: fields.top,
                right: fields.right,
                bottom: fields.bottom,
                left: fields.left,
            })
        } else {
            BorderColor::Single(ColorValue {
                raw: fields.raw.unwrap_or_default(),
                hex8: fields.hex8,
            })
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideColors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<ColorValue>,
}

/// Canonical per-side border color, every side populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBorderColor {
    pub top: ColorValue,
    pub right: ColorValue,
    pub bottom: ColorValue,
    pub left: ColorValue,
}

impl BorderColor {
    /// Resolve either shape to four populated sides.
    ///
    /// Missing sides fall back to the top color. Without a top color there is
    /// nothing to fall back to and `None` is returned.
    pub fn resolve(&self) -> Option<ResolvedBorderColor> {
        match self {
            BorderColor::Single(color) if color.is_empty() => None,
            BorderColor::Single(color) => Some(ResolvedBorderColor {
                top: color.clone(),
                right: color.clone(),
                bottom: color.clone(),
                left: color.clone(),
            }),
            BorderColor::PerSide(sides) => {
                let top = sides.top.as_ref().filter(|c| !c.is_empty())?;
                let side = |value: &Option<ColorValue>| {
                    value
                        .as_ref()
                        .filter(|c| !c.is_empty())
                        .unwrap_or(top)
                        .clone()
                };
                Some(ResolvedBorderColor {
                    top: top.clone(),
                    right: side(&sides.right),
                    bottom: side(&sides.bottom),
                    left: side(&sides.left),
                })
            }
        }
    }
}

impl ResolvedBorderColor {
    pub fn named(&self) -> [(&'static str, &ColorValue); 4] {
        [
            ("top", &self.top),
            ("right", &self.right),
            ("bottom", &self.bottom),
            ("left", &self.left),
        ]
    }
}
