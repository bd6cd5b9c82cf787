//! Visual essentials: the curated, human-readable subset of a capture's styles.
//!
//! Rows are produced in a fixed order driven by [`ESSENTIALS`]; sections follow
//! [`Section::ORDER`]. Absent or empty primitives simply contribute no row.

use crate::catalog::resolve_token;
use crate::types::{
    CapturedStyles, ColorValue, EvidenceMethod, EvidenceState, EvidencedRow, RawCapture, Section,
    StylePrimitives, VisualEssentials, VisualEssentialsRow,
};

/// One entry of the essentials table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Essential {
    TextColor,
    FontFamily,
    FontSize,
    FontWeight,
    LineHeight,
    Background,
    BorderWidth,
    BorderColor,
    Radius,
    Shadow,
    Padding,
    Margin,
    Gap,
}

/// Row order. This is a display contract, not an iteration artifact.
pub const ESSENTIALS: [Essential; 13] = [
    Essential::TextColor,
    Essential::FontFamily,
    Essential::FontSize,
    Essential::FontWeight,
    Essential::LineHeight,
    Essential::Background,
    Essential::BorderWidth,
    Essential::BorderColor,
    Essential::Radius,
    Essential::Shadow,
    Essential::Padding,
    Essential::Margin,
    Essential::Gap,
];

impl Essential {
    pub fn label(&self) -> &'static str {
        match self {
            Essential::TextColor => "Text color",
            Essential::FontFamily => "Font family",
            Essential::FontSize => "Font size",
            Essential::FontWeight => "Font weight",
            Essential::LineHeight => "Line height",
            Essential::Background => "Background",
            Essential::BorderWidth => "Border width",
            Essential::BorderColor => "Border color",
            Essential::Radius => "Radius",
            Essential::Shadow => "Shadow",
            Essential::Padding => "Padding",
            Essential::Margin => "Margin",
            Essential::Gap => "Gap",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Essential::TextColor
            | Essential::FontFamily
            | Essential::FontSize
            | Essential::FontWeight
            | Essential::LineHeight => Section::Text,
            Essential::Background
            | Essential::BorderWidth
            | Essential::BorderColor
            | Essential::Radius
            | Essential::Shadow => Section::Surface,
            Essential::Padding | Essential::Margin | Essential::Gap => Section::Spacing,
        }
    }

    /// CSS properties consulted for authored/token evidence. Only color rows
    /// carry a trace.
    pub fn evidence_properties(&self) -> Option<&'static [&'static str]> {
        match self {
            Essential::TextColor => Some(&["color"]),
            Essential::Background => Some(&["background-color"]),
            Essential::BorderColor => Some(&["border-color", "border-top-color"]),
            _ => None,
        }
    }

    pub fn from_label(label: &str) -> Option<Essential> {
        ESSENTIALS.into_iter().find(|e| e.label() == label)
    }
}

/// Collapse four values into CSS shorthand.
///
/// Order is top/right/bottom/left for sides, or top-left/top-right/
/// bottom-right/bottom-left for corners.
pub fn collapse_shorthand(values: [&str; 4]) -> String {
    let [a, b, c, d] = values.map(str::trim);
    if a == b && b == c && c == d {
        a.to_string()
    } else if a == c && b == d {
        format!("{a} {b}")
    } else {
        format!("{a} {b} {c} {d}")
    }
}

/// Whether a CSS length is non-zero. Non-numeric keywords (`thin`, `medium`)
/// count as non-zero; empty strings do not.
pub fn is_nonzero_length(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    let numeric: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        .collect();
    match numeric.parse::<f64>() {
        Ok(n) => n != 0.0,
        Err(_) => true,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn color_row(essential: Essential, color: &ColorValue) -> Option<VisualEssentialsRow> {
    if color.is_empty() {
        return None;
    }
    Some(VisualEssentialsRow {
        section: essential.section(),
        label: essential.label().to_string(),
        value: color.display_value(),
        hex8: color.resolved_hex8(),
    })
}

fn row(essential: Essential, value: String) -> VisualEssentialsRow {
    VisualEssentialsRow {
        section: essential.section(),
        label: essential.label().to_string(),
        value,
        hex8: None,
    }
}

fn derive_row(
    essential: Essential,
    p: &StylePrimitives,
    border_emitted: bool,
) -> Option<VisualEssentialsRow> {
    let text = &p.typography;
    match essential {
        Essential::TextColor => p.color.as_ref().and_then(|c| color_row(essential, c)),
        Essential::FontFamily => non_empty(text.font_family.as_deref()).map(|v| row(essential, v)),
        Essential::FontSize => non_empty(text.font_size.as_deref()).map(|v| row(essential, v)),
        Essential::FontWeight => text
            .font_weight
            .as_ref()
            .and_then(|w| non_empty(Some(w.to_string().as_str())))
            .map(|v| row(essential, v)),
        Essential::LineHeight => non_empty(text.line_height.as_deref()).map(|v| row(essential, v)),
        Essential::Background => p
            .background_color
            .as_ref()
            .and_then(|c| color_row(essential, c)),
        Essential::BorderWidth => {
            let widths = p.border_width.as_ref()?;
            let sides = [
                widths.top.as_str(),
                widths.right.as_str(),
                widths.bottom.as_str(),
                widths.left.as_str(),
            ];
            sides
                .iter()
                .any(|w| is_nonzero_length(w))
                .then(|| row(essential, collapse_shorthand(sides)))
        }
        Essential::BorderColor => {
            if !border_emitted {
                return None;
            }
            let resolved = p.border_color.as_ref()?.resolve()?;
            let [top, right, bottom, left] = resolved.named().map(|(_, c)| c.display_value());
            Some(VisualEssentialsRow {
                hex8: resolved.top.resolved_hex8(),
                ..row(
                    essential,
                    collapse_shorthand([top.as_str(), right.as_str(), bottom.as_str(), left.as_str()]),
                )
            })
        }
        Essential::Radius => p.border_radius.as_ref().map(|r| {
            row(
                essential,
                collapse_shorthand([
                    r.top_left.as_str(),
                    r.top_right.as_str(),
                    r.bottom_right.as_str(),
                    r.bottom_left.as_str(),
                ]),
            )
        }),
        Essential::Shadow => non_empty(p.box_shadow.as_deref()).map(|v| row(essential, v)),
        Essential::Padding | Essential::Margin => {
            let sides = if essential == Essential::Padding {
                p.padding.as_ref()?
            } else {
                p.margin.as_ref()?
            };
            Some(row(
                essential,
                collapse_shorthand([
                    sides.top.as_str(),
                    sides.right.as_str(),
                    sides.bottom.as_str(),
                    sides.left.as_str(),
                ]),
            ))
        }
        Essential::Gap => p.gap.as_ref().map(|g| {
            row(
                essential,
                format!("{} / {}", g.row_gap.trim(), g.column_gap.trim()),
            )
        }),
    }
}

/// Format one capture's primitives into ordered essentials rows.
pub fn derive_visual_essentials(primitives: &StylePrimitives) -> Vec<VisualEssentialsRow> {
    let mut rows = Vec::new();
    let mut border_emitted = false;
    for essential in ESSENTIALS {
        if let Some(r) = derive_row(essential, primitives, border_emitted) {
            if essential == Essential::BorderWidth {
                border_emitted = true;
            }
            rows.push(r);
        }
    }
    rows.sort_by_key(|r| r.section);
    rows
}

/// Attach authored values and design tokens to color rows.
pub fn annotate_evidence(rows: Vec<VisualEssentialsRow>, styles: &CapturedStyles) -> Vec<EvidencedRow> {
    rows.into_iter()
        .map(|row| {
            let Some(props) = Essential::from_label(&row.label).and_then(|e| e.evidence_properties())
            else {
                return EvidencedRow::bare(row);
            };
            let authored = styles.author.as_ref().and_then(|author| {
                props
                    .iter()
                    .find_map(|p| non_empty(author.get(*p).map(String::as_str)))
            });
            EvidencedRow {
                row,
                authored,
                token: resolve_token(styles, props),
            }
        })
        .collect()
}

/// Surface how authored styles were obtained, with a fallback note when only
/// computed values were available.
pub fn evidence_state(styles: &CapturedStyles) -> Option<EvidenceState> {
    let evidence = styles.evidence.as_ref()?;
    let cdp_error = non_empty(evidence.cdp_error.as_deref());
    let note = match evidence.method {
        EvidenceMethod::Cdp => None,
        EvidenceMethod::Computed => Some(match &cdp_error {
            Some(err) => format!(
                "Authored values unavailable; showing computed styles. Inspector error: {err}"
            ),
            None => "Authored values unavailable; showing computed styles.".to_string(),
        }),
    };
    Some(EvidenceState {
        method: evidence.method,
        cdp_error,
        note,
    })
}

/// Full essentials bundle for one (representative) capture.
pub fn derive_capture_essentials(capture: &RawCapture, include_evidence: bool) -> VisualEssentials {
    let rows = derive_visual_essentials(&capture.styles.primitives);
    let rows = if include_evidence {
        annotate_evidence(rows, &capture.styles)
    } else {
        rows.into_iter().map(EvidencedRow::bare).collect()
    };
    VisualEssentials {
        rows,
        evidence: evidence_state(&capture.styles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BorderColor, BoxSides, Corners, FontWeight, Gap, SideColors, StyleEvidence, Typography,
    };
    use std::collections::BTreeMap;

    fn value_of<'a>(rows: &'a [VisualEssentialsRow], label: &str) -> Option<&'a str> {
        rows.iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }

    fn padding(top: &str, right: &str, bottom: &str, left: &str) -> StylePrimitives {
        StylePrimitives {
            padding: Some(BoxSides::new(top, right, bottom, left)),
            ..Default::default()
        }
    }

    #[test]
    fn shorthand_all_equal_collapses_to_one_value() {
        let rows = derive_visual_essentials(&padding("8px", "8px", "8px", "8px"));
        assert_eq!(value_of(&rows, "Padding"), Some("8px"));
    }

    #[test]
    fn shorthand_symmetric_collapses_to_two_values() {
        let rows = derive_visual_essentials(&padding("8px", "16px", "8px", "16px"));
        assert_eq!(value_of(&rows, "Padding"), Some("8px 16px"));
    }

    #[test]
    fn shorthand_asymmetric_keeps_four_values() {
        let rows = derive_visual_essentials(&padding("4px", "8px", "12px", "16px"));
        assert_eq!(value_of(&rows, "Padding"), Some("4px 8px 12px 16px"));
    }

    #[test]
    fn radius_uses_corner_order() {
        let p = StylePrimitives {
            border_radius: Some(Corners::new("4px", "8px", "4px", "8px")),
            ..Default::default()
        };
        assert_eq!(value_of(&derive_visual_essentials(&p), "Radius"), Some("4px 8px"));

        let p = StylePrimitives {
            border_radius: Some(Corners::new("1px", "2px", "3px", "4px")),
            ..Default::default()
        };
        assert_eq!(
            value_of(&derive_visual_essentials(&p), "Radius"),
            Some("1px 2px 3px 4px")
        );
    }

    #[test]
    fn gap_always_shows_both_sides() {
        let p = StylePrimitives {
            gap: Some(Gap {
                row_gap: "4px".to_string(),
                column_gap: "0px".to_string(),
            }),
            ..Default::default()
        };
        assert_eq!(value_of(&derive_visual_essentials(&p), "Gap"), Some("4px / 0px"));
    }

    #[test]
    fn per_side_border_color_falls_back_to_top_and_collapses() {
        let p = StylePrimitives {
            border_width: Some(BoxSides::uniform("1px")),
            border_color: Some(BorderColor::PerSide(SideColors {
                top: Some(ColorValue::new("rgb(0, 0, 0)", Some("#000000FF"))),
                ..Default::default()
            })),
            ..Default::default()
        };
        let rows = derive_visual_essentials(&p);
        let border = rows
            .iter()
            .find(|r| r.label == "Border color")
            .expect("border color row");
        assert_eq!(border.value, "#000000FF");
        assert_eq!(border.hex8.as_deref(), Some("#000000FF"));
        assert_eq!(value_of(&rows, "Border width"), Some("1px"));
    }

    #[test]
    fn per_side_border_color_carries_top_hex8() {
        let p = StylePrimitives {
            border_width: Some(BoxSides::new("1px", "2px", "1px", "2px")),
            border_color: Some(BorderColor::PerSide(SideColors {
                top: Some(ColorValue::new("red", Some("#FF0000FF"))),
                right: Some(ColorValue::new("blue", Some("#0000FFFF"))),
                bottom: None,
                left: Some(ColorValue::new("blue", Some("#0000FFFF"))),
            })),
            ..Default::default()
        };
        let rows = derive_visual_essentials(&p);
        let border = rows.iter().find(|r| r.label == "Border color").expect("row");
        assert_eq!(border.value, "#FF0000FF #0000FFFF");
        assert_eq!(border.hex8.as_deref(), Some("#FF0000FF"));
        assert_eq!(value_of(&rows, "Border width"), Some("1px 2px"));
    }

    #[test]
    fn legacy_single_border_color_is_emitted_directly() {
        let p = StylePrimitives {
            border_width: Some(BoxSides::new("0px", "0px", "2px", "0px")),
            border_color: Some(BorderColor::Single(ColorValue::new("currentcolor", None))),
            ..Default::default()
        };
        let rows = derive_visual_essentials(&p);
        assert_eq!(value_of(&rows, "Border color"), Some("currentcolor"));
        assert_eq!(value_of(&rows, "Border width"), Some("0px 0px 2px 0px"));
    }

    #[test]
    fn zero_border_width_suppresses_border_rows() {
        let p = StylePrimitives {
            border_width: Some(BoxSides::uniform("0px")),
            border_color: Some(BorderColor::Single(ColorValue::new(
                "black",
                Some("#000000FF"),
            ))),
            ..Default::default()
        };
        let rows = derive_visual_essentials(&p);
        assert!(value_of(&rows, "Border width").is_none());
        assert!(value_of(&rows, "Border color").is_none());
    }

    #[test]
    fn rows_follow_fixed_order() {
        let p = StylePrimitives {
            color: Some(ColorValue::new("black", Some("#000000FF"))),
            background_color: Some(ColorValue::new("white", Some("#FFFFFFFF"))),
            typography: Typography {
                font_family: Some("Inter, sans-serif".to_string()),
                font_size: Some("14px".to_string()),
                font_weight: Some(FontWeight::Numeric(600.0)),
                line_height: Some("20px".to_string()),
            },
            border_width: Some(BoxSides::uniform("1px")),
            border_color: Some(BorderColor::Single(ColorValue::new("black", None))),
            border_radius: Some(Corners::uniform("6px")),
            box_shadow: Some("0 1px 2px rgba(0,0,0,.1)".to_string()),
            padding: Some(BoxSides::uniform("8px")),
            margin: Some(BoxSides::uniform("0px")),
            gap: Some(Gap {
                row_gap: "0px".to_string(),
                column_gap: "8px".to_string(),
            }),
        };
        let labels: Vec<String> = derive_visual_essentials(&p)
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Text color",
                "Font family",
                "Font size",
                "Font weight",
                "Line height",
                "Background",
                "Border width",
                "Border color",
                "Radius",
                "Shadow",
                "Padding",
                "Margin",
                "Gap"
            ]
        );
    }

    #[test]
    fn color_rows_prefer_hex8_and_fall_back_to_raw() {
        let p = StylePrimitives {
            color: Some(ColorValue::new("rgb(51, 102, 255)", None)),
            background_color: Some(ColorValue::new("color-mix(in srgb, red, blue)", None)),
            ..Default::default()
        };
        let rows = derive_visual_essentials(&p);
        assert_eq!(rows[0].value, "#3366FFFF");
        assert_eq!(rows[0].hex8.as_deref(), Some("#3366FFFF"));
        assert_eq!(rows[1].value, "color-mix(in srgb, red, blue)");
        assert!(rows[1].hex8.is_none());
    }

    #[test]
    fn empty_primitives_produce_no_rows() {
        assert!(derive_visual_essentials(&StylePrimitives::default()).is_empty());

        let p = StylePrimitives {
            box_shadow: Some("  ".to_string()),
            typography: Typography {
                font_family: Some(String::new()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(derive_visual_essentials(&p).is_empty());
    }

    #[test]
    fn evidence_only_attaches_to_color_rows() {
        let styles = CapturedStyles {
            primitives: StylePrimitives {
                color: Some(ColorValue::new("black", Some("#000000FF"))),
                typography: Typography {
                    font_size: Some("14px".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            },
            author: Some(BTreeMap::from([
                ("color".to_string(), "var(--ink)".to_string()),
                ("font-size".to_string(), "var(--text-sm)".to_string()),
            ])),
            tokens: Some(BTreeMap::from([(
                "font-size".to_string(),
                "--text-sm".to_string(),
            )])),
            evidence: None,
        };
        let rows = annotate_evidence(derive_visual_essentials(&styles.primitives), &styles);

        assert_eq!(rows[0].row.label, "Text color");
        assert_eq!(rows[0].authored.as_deref(), Some("var(--ink)"));
        assert_eq!(rows[0].token.as_deref(), Some("--ink"));
        assert_eq!(rows[1].row.label, "Font size");
        assert!(!rows[1].has_trace());
    }

    #[test]
    fn border_color_evidence_falls_back_to_top_side_property() {
        let primitives = StylePrimitives {
            border_width: Some(BoxSides::uniform("1px")),
            border_color: Some(BorderColor::Single(ColorValue::new(
                "rgb(0, 0, 0)",
                Some("#000000FF"),
            ))),
            ..Default::default()
        };
        let styles = CapturedStyles {
            primitives,
            author: Some(BTreeMap::from([(
                "border-top-color".to_string(),
                "var(--line)".to_string(),
            )])),
            tokens: None,
            evidence: None,
        };
        let rows = annotate_evidence(derive_visual_essentials(&styles.primitives), &styles);
        let border = rows
            .iter()
            .find(|r| r.row.label == "Border color")
            .expect("border color row");
        assert_eq!(border.authored.as_deref(), Some("var(--line)"));
        assert_eq!(border.token.as_deref(), Some("--line"));

        let width = rows
            .iter()
            .find(|r| r.row.label == "Border width")
            .expect("border width row");
        assert!(!width.has_trace());
    }

    #[test]
    fn border_color_token_prefers_shorthand_property() {
        let styles = CapturedStyles {
            primitives: StylePrimitives {
                border_width: Some(BoxSides::uniform("2px")),
                border_color: Some(BorderColor::Single(ColorValue::new("#ccc", None))),
                ..Default::default()
            },
            author: Some(BTreeMap::from([
                ("border-color".to_string(), "var(--edge)".to_string()),
                ("border-top-color".to_string(), "var(--line)".to_string()),
            ])),
            tokens: Some(BTreeMap::from([(
                "border-top-color".to_string(),
                "--line".to_string(),
            )])),
            evidence: None,
        };
        let rows = annotate_evidence(derive_visual_essentials(&styles.primitives), &styles);
        let border = rows
            .iter()
            .find(|r| r.row.label == "Border color")
            .expect("border color row");
        assert_eq!(border.authored.as_deref(), Some("var(--edge)"));
        assert_eq!(border.token.as_deref(), Some("--line"));
    }

    #[test]
    fn hex8_only_legacy_border_color_still_emits_row() {
        let primitives: StylePrimitives = serde_json::from_str(
            r##"{"borderWidth":{"top":"1px","right":"1px","bottom":"1px","left":"1px"},
                "borderColor":{"hex8":"#000000FF"}}"##,
        )
        .expect("parse primitives");
        let rows = derive_visual_essentials(&primitives);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Border width", "Border color"]);
        assert_eq!(rows[1].value, "#000000FF");
        assert_eq!(rows[1].hex8.as_deref(), Some("#000000FF"));
    }

    #[test]
    fn computed_evidence_carries_fallback_note() {
        let styles = CapturedStyles {
            evidence: Some(StyleEvidence {
                method: EvidenceMethod::Computed,
                cdp_error: Some("debugger already attached".to_string()),
            }),
            ..Default::default()
        };
        let state = evidence_state(&styles).expect("evidence state");
        let note = state.note.expect("fallback note");
        assert!(note.contains("computed styles"));
        assert!(note.contains("debugger already attached"));

        let cdp = CapturedStyles {
            evidence: Some(StyleEvidence {
                method: EvidenceMethod::Cdp,
                cdp_error: None,
            }),
            ..Default::default()
        };
        assert!(evidence_state(&cdp).expect("state").note.is_none());
        assert!(evidence_state(&CapturedStyles::default()).is_none());
    }

    #[test]
    fn nonzero_length_detection() {
        assert!(!is_nonzero_length("0px"));
        assert!(!is_nonzero_length("0"));
        assert!(!is_nonzero_length("0.0em"));
        assert!(!is_nonzero_length(""));
        assert!(is_nonzero_length("0.5px"));
        assert!(is_nonzero_length("thin"));
    }
}
