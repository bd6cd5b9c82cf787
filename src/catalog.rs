//! Style catalog: every distinct (token, value, kind) triple across captures.

use sha1::{Digest, Sha1};
use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::essentials::is_nonzero_length;
use crate::source::{normalize_url, source_label};
use crate::types::{CapturedStyles, ColorValue, RawCapture, StyleKind, ViewerStyle};

/// One CSS property value observed on one capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleObservation {
    pub property: String,
    pub token: String,
    pub value: String,
    pub kind: StyleKind,
}

impl StyleObservation {
    pub fn triple(&self) -> StyleTriple {
        StyleTriple {
            kind: self.kind,
            token: self.token.clone(),
            value: self.value.clone(),
        }
    }

    pub fn matches(&self, triple: &StyleTriple) -> bool {
        self.kind == triple.kind && self.token == triple.token && self.value == triple.value
    }
}

/// Structural identity of a catalogued style.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StyleTriple {
    pub kind: StyleKind,
    pub token: String,
    pub value: String,
}

impl StyleTriple {
    pub fn id(&self) -> String {
        style_id(self.kind, &self.token, &self.value)
    }
}

impl From<&ViewerStyle> for StyleTriple {
    fn from(style: &ViewerStyle) -> Self {
        Self {
            kind: style.kind,
            token: style.token.clone(),
            value: style.value.clone(),
        }
    }
}

/// Stable style id: `style_` plus 16 hex digits of SHA-1 over the triple.
pub fn style_id(kind: StyleKind, token: &str, value: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("{kind}\u{1f}{token}\u{1f}{value}").as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("style_{}", &digest[..16])
}

/// Design token for a property: explicit token map first, then a `var(--x)`
/// reference in the authored value.
pub fn resolve_token(styles: &CapturedStyles, properties: &[&str]) -> Option<String> {
    let explicit = styles.tokens.as_ref().and_then(|tokens| {
        properties
            .iter()
            .find_map(|p| tokens.get(*p).map(|t| t.trim()).filter(|t| !t.is_empty()))
    });
    if let Some(token) = explicit {
        return Some(token.to_string());
    }

    let author = styles.author.as_ref()?;
    properties
        .iter()
        .find_map(|p| author.get(*p).and_then(|v| var_reference(v)))
}

/// Extract `--name` from the first `var(--name[, fallback])` in a value.
pub fn var_reference(value: &str) -> Option<String> {
    let start = value.find("var(")? + "var(".len();
    let rest = &value[start..];
    let end = rest.find([',', ')']).unwrap_or(rest.len());
    let name = rest[..end].trim();
    name.starts_with("--").then(|| name.to_string())
}

fn synthesized_token(kind: StyleKind, value: &str) -> String {
    format!("{kind} {value}")
}

/// All meaningful style observations for one capture, in a fixed property order.
pub fn style_observations(capture: &RawCapture) -> Vec<StyleObservation> {
    let styles = &capture.styles;
    let primitives = &styles.primitives;
    let mut out = Vec::new();

    let mut push = |property: String, value: String, kind: StyleKind, token_props: &[&str]| {
        let value = value.trim().to_string();
        if value.is_empty() {
            return;
        }
        let token = resolve_token(styles, token_props)
            .unwrap_or_else(|| synthesized_token(kind, &value));
        out.push(StyleObservation {
            property,
            token,
            value,
            kind,
        });
    };

    let color_value = |c: &ColorValue| c.display_value();

    if let Some(color) = &primitives.color {
        push("color".into(), color_value(color), StyleKind::Color, &["color"]);
    }
    if let Some(bg) = &primitives.background_color {
        let value = color_value(bg);
        if value != "#00000000" {
            push(
                "background-color".into(),
                value,
                StyleKind::Color,
                &["background-color"],
            );
        }
    }

    let border_width = primitives.border_width.as_ref();
    if let (Some(widths), Some(resolved)) = (
        border_width,
        primitives.border_color.as_ref().and_then(|b| b.resolve()),
    ) {
        for ((side, width), (_, color)) in widths.named().into_iter().zip(resolved.named()) {
            if is_nonzero_length(width) {
                let property = format!("border-{side}-color");
                let props = [property.as_str(), "border-color"];
                push(property.clone(), color_value(color), StyleKind::Color, &props);
            }
        }
    }

    let typography = &primitives.typography;
    let text_props = [
        ("font-family", typography.font_family.clone()),
        ("font-size", typography.font_size.clone()),
        ("font-weight", typography.font_weight.as_ref().map(|w| w.to_string())),
        ("line-height", typography.line_height.clone()),
    ];
    for (property, value) in text_props {
        if let Some(value) = value {
            push(property.into(), value, StyleKind::Typography, &[property]);
        }
    }

    for (prefix, sides) in [("padding", &primitives.padding), ("margin", &primitives.margin)] {
        let Some(sides) = sides else { continue };
        for (side, value) in sides.named() {
            if is_nonzero_length(value) {
                let property = format!("{prefix}-{side}");
                let props = [property.as_str(), prefix];
                push(property.clone(), value.to_string(), StyleKind::Spacing, &props);
            }
        }
    }
    if let Some(gap) = &primitives.gap {
        for (property, value) in [("row-gap", &gap.row_gap), ("column-gap", &gap.column_gap)] {
            if is_nonzero_length(value) {
                push(property.into(), value.clone(), StyleKind::Spacing, &[property, "gap"]);
            }
        }
    }

    if let Some(widths) = border_width {
        for (side, value) in widths.named() {
            if is_nonzero_length(value) {
                let property = format!("border-{side}-width");
                let props = [property.as_str(), "border-width"];
                push(property.clone(), value.to_string(), StyleKind::Border, &props);
            }
        }
    }
    if let Some(radius) = &primitives.border_radius {
        for (corner, value) in radius.named() {
            if is_nonzero_length(value) {
                let property = format!("border-{corner}-radius");
                let props = [property.as_str(), "border-radius"];
                push(property.clone(), value.to_string(), StyleKind::Radius, &props);
            }
        }
    }
    if let Some(shadow) = &primitives.box_shadow {
        if !shadow.trim().eq_ignore_ascii_case("none") {
            push("box-shadow".into(), shadow.clone(), StyleKind::Shadow, &["box-shadow"]);
        }
    }

    out
}

/// Number of properties on `capture` that exhibit `triple`.
pub fn occurrences(capture: &RawCapture, triple: &StyleTriple) -> usize {
    style_observations(capture)
        .iter()
        .filter(|obs| obs.matches(triple))
        .count()
}

struct Tally {
    usage: usize,
    source: String,
}

/// Fold every capture's observations into one deduplicated style list.
///
/// Ordered by kind, then usage (descending), then token and value.
pub fn build_style_catalog(captures: &[RawCapture]) -> Vec<ViewerStyle> {
    let tallies = captures
        .iter()
        .fold(BTreeMap::<StyleTriple, Tally>::new(), |mut acc, capture| {
            for obs in style_observations(capture) {
                acc.entry(obs.triple())
                    .or_insert_with(|| Tally {
                        usage: 0,
                        source: source_label(&normalize_url(capture.url.as_deref())),
                    })
                    .usage += 1;
            }
            acc
        });

    let mut styles: Vec<ViewerStyle> = tallies
        .into_iter()
        .map(|(triple, tally)| ViewerStyle {
            id: triple.id(),
            token: triple.token,
            value: triple.value,
            kind: triple.kind,
            usage_count: tally.usage,
            source: tally.source,
        })
        .collect();
    styles.sort_by(|a, b| {
        (a.kind, Reverse(a.usage_count), &a.token, &a.value).cmp(&(
            b.kind,
            Reverse(b.usage_count),
            &b.token,
            &b.value,
        ))
    });

    log::debug!(
        "catalogued {} distinct styles from {} captures",
        styles.len(),
        captures.len()
    );
    styles
}
