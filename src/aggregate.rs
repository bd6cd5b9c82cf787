//! Capture aggregation: component and style view models derived on demand.
//!
//! Every function here is a read-only query over the full keyed capture set
//! and returns an empty collection (never an error) when nothing matches.

use std::collections::{BTreeMap, HashMap};

use crate::catalog::{occurrences, StyleTriple};
use crate::source::{normalize_url, source_label};
use crate::types::{
    ComponentKey, IdentityAttributes, IdentityOverride, KeyedCapture, RawCapture,
    ViewerComponent, ViewerComponentCapture, ViewerStyle, ViewerStyleLocation,
    ViewerStyleRelatedComponent,
};

/// Default review status for components without an override.
pub const DEFAULT_STATUS: &str = "unreviewed";

/// All captures sharing `key`, in input order. Duplicate URLs are kept; see
/// [`crate::source::dedupe_by_url`] for the de-duplicated source list.
pub fn derive_component_captures(
    key: &str,
    captures: &[KeyedCapture<'_>],
) -> Vec<ViewerComponentCapture> {
    captures
        .iter()
        .filter(|kc| kc.key == key)
        .map(|kc| {
            let capture = kc.capture;
            let url = normalize_url(capture.url.as_deref());
            ViewerComponentCapture {
                capture_id: capture.id.clone(),
                component_id: kc.key.to_string(),
                source: source_label(&url),
                url,
                screenshot_blob_id: capture.screenshot_blob_id.clone(),
                html: capture.dom_snapshot.clone(),
                created_at: capture.created_at,
            }
        })
        .collect()
}

fn find_triple(style_id: &str, styles: &[ViewerStyle]) -> Option<StyleTriple> {
    styles
        .iter()
        .find(|s| s.id == style_id)
        .map(StyleTriple::from)
}

/// Captures exhibiting the style, one record per capture.
pub fn derive_style_locations(
    style_id: &str,
    captures: &[KeyedCapture<'_>],
    styles: &[ViewerStyle],
) -> Vec<ViewerStyleLocation> {
    let Some(triple) = find_triple(style_id, styles) else {
        return Vec::new();
    };

    captures
        .iter()
        .filter_map(|kc| {
            let usage_count = occurrences(kc.capture, &triple);
            (usage_count > 0).then(|| {
                let url = normalize_url(kc.capture.url.as_deref());
                ViewerStyleLocation {
                    capture_id: kc.capture.id.clone(),
                    component_id: kc.key.to_string(),
                    source: source_label(&url),
                    url,
                    usage_count,
                }
            })
        })
        .collect()
}

/// Components whose captures use the style, once per component key.
pub fn derive_related_components_for_style(
    style_id: &str,
    captures: &[KeyedCapture<'_>],
    components: &[ViewerComponent],
    styles: &[ViewerStyle],
) -> Vec<ViewerStyleRelatedComponent> {
    let Some(triple) = find_triple(style_id, styles) else {
        return Vec::new();
    };

    let mut order: Vec<&str> = Vec::new();
    let mut usage: HashMap<&str, usize> = HashMap::new();
    for kc in captures {
        let count = occurrences(kc.capture, &triple);
        if count == 0 {
            continue;
        }
        let entry = usage.entry(kc.key).or_insert_with(|| {
            order.push(kc.key);
            0
        });
        *entry += count;
    }

    let by_id: HashMap<&str, &ViewerComponent> =
        components.iter().map(|c| (c.id.as_str(), c)).collect();

    order
        .into_iter()
        .filter_map(|key| {
            let component = by_id.get(key)?;
            Some(ViewerStyleRelatedComponent {
                component_id: component.id.clone(),
                name: component.name.clone(),
                category: component.category.clone(),
                component_type: component.component_type.clone(),
                capture_count: component.capture_count,
                usage_count: usage.get(key).copied().unwrap_or_default(),
            })
        })
        .collect()
}

/// The most recent capture for `key`; ties go to the earliest in input order.
pub fn representative_capture<'a>(
    key: &str,
    captures: &[KeyedCapture<'a>],
) -> Option<&'a RawCapture> {
    captures
        .iter()
        .filter(|kc| kc.key == key)
        .map(|kc| kc.capture)
        .fold(None, |best: Option<&RawCapture>, capture| match best {
            Some(b) if b.created_at >= capture.created_at => Some(b),
            _ => Some(capture),
        })
}

/// One component per distinct key, in first-occurrence order, with overrides
/// applied over derived defaults.
pub fn derive_components(
    captures: &[KeyedCapture<'_>],
    overrides: &BTreeMap<ComponentKey, IdentityOverride>,
) -> Vec<ViewerComponent> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<KeyedCapture<'_>>> = HashMap::new();
    for kc in captures {
        groups
            .entry(kc.key)
            .or_insert_with(|| {
                order.push(kc.key);
                Vec::new()
            })
            .push(*kc);
    }

    let components: Vec<ViewerComponent> = order
        .into_iter()
        .filter_map(|key| {
            let group = groups.get(key)?;
            let representative = representative_capture(key, group)?;
            let identity = &representative.identity;
            let patch = overrides.get(key);
            let pick = |value: Option<&String>, default: String| {
                value
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .unwrap_or(default)
            };

            Some(ViewerComponent {
                id: key.to_string(),
                name: pick(
                    patch.and_then(|p| p.display_name.as_ref()),
                    default_name(identity),
                ),
                category: pick(
                    patch.and_then(|p| p.category_override.as_ref()),
                    default_category(identity).to_string(),
                ),
                component_type: pick(
                    patch.and_then(|p| p.type_override.as_ref()),
                    default_type(identity),
                ),
                status: pick(
                    patch.and_then(|p| p.status_override.as_ref()),
                    DEFAULT_STATUS.to_string(),
                ),
                source: source_label(&normalize_url(representative.url.as_deref())),
                capture_count: group.len(),
                representative_capture_id: representative.id.clone(),
                screenshot_blob_id: representative.screenshot_blob_id.clone(),
            })
        })
        .collect();

    log::debug!(
        "derived {} components from {} captures ({} overrides supplied)",
        components.len(),
        captures.len(),
        overrides.len()
    );
    components
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn default_name(identity: &IdentityAttributes) -> String {
    trimmed(&identity.accessible_name)
        .map(|n| n.split_whitespace().collect::<Vec<_>>().join(" "))
        .or_else(|| trimmed(&identity.role).map(str::to_string))
        .or_else(|| trimmed(&identity.tag_name).map(str::to_lowercase))
        .unwrap_or_else(|| "Unknown element".to_string())
}

pub fn default_type(identity: &IdentityAttributes) -> String {
    trimmed(&identity.role)
        .or_else(|| trimmed(&identity.tag_name))
        .map(str::to_lowercase)
        .unwrap_or_else(|| "element".to_string())
}

pub fn default_category(identity: &IdentityAttributes) -> &'static str {
    let tag = trimmed(&identity.tag_name)
        .map(str::to_lowercase)
        .unwrap_or_default();
    let role = trimmed(&identity.role)
        .map(str::to_lowercase)
        .unwrap_or_default();

    match (tag.as_str(), role.as_str()) {
        ("button", _) | (_, "button") => "Actions",
        ("a" | "nav", _) | (_, "link" | "navigation" | "menuitem" | "tab") => "Navigation",
        ("input" | "select" | "textarea" | "form", _)
        | (_, "checkbox" | "radio" | "textbox" | "combobox" | "switch" | "searchbox") => "Forms",
        ("img" | "svg" | "video" | "picture" | "canvas", _) | (_, "img") => "Media",
        ("h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" | "span" | "label", _) | (_, "heading") => {
            "Typography"
        }
        ("header" | "footer" | "main" | "section" | "aside" | "div", _) => "Layout",
        _ => "Uncategorized",
    }
}
