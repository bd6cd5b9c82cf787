//! Color normalization to the `#RRGGBBAA` form used across the catalog.

use palette::{Srgb, Srgba, WithAlpha};
use std::str::FromStr;

/// Format a color as uppercase `#RRGGBBAA`.
pub fn format_hex8(color: Srgba<u8>) -> String {
    format!(
        "#{:02X}{:02X}{:02X}{:02X}",
        color.red, color.green, color.blue, color.alpha
    )
}

/// Parse a resolved CSS color string.
///
/// Supports hex (3, 4, 6 or 8 digits), `rgb()`/`rgba()` in comma or space
/// syntax, and `transparent`. Named colors other than `transparent` are not
/// resolved.
pub fn parse_color(raw: &str) -> Option<Srgba<u8>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    let lower = value.to_ascii_lowercase();

    if lower == "transparent" {
        return Some(Srgba::new(0, 0, 0, 0));
    }
    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
    {
        return parse_rgb_args(args.strip_suffix(')')?);
    }

    None
}

/// Derive `#RRGGBBAA` from a raw color string, if it parses.
pub fn to_hex8(raw: &str) -> Option<String> {
    let parsed = parse_color(raw).map(format_hex8);
    if parsed.is_none() && !raw.trim().is_empty() {
        log::debug!("color '{}' has no hex8 form; keeping raw value", raw.trim());
    }
    parsed
}

fn parse_hex(hex: &str) -> Option<Srgba<u8>> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 | 6 => Srgb::<u8>::from_str(hex).ok().map(|rgb| rgb.with_alpha(255)),
        4 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some(Srgba::new(digit(0)?, digit(1)?, digit(2)?, digit(3)?))
        }
        8 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Srgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?))
        }
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Srgba<u8>> {
    // rgb(1, 2, 3) / rgba(1, 2, 3, 0.5) / rgb(1 2 3 / 50%)
    let (channels, alpha) = match args.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (args, None),
    };
    let mut parts: Vec<&str> = channels
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    let alpha = match (alpha, parts.len()) {
        (Some(a), 3) => Some(a),
        (None, 4) => parts.pop(),
        (None, 3) => None,
        _ => return None,
    };

    let red = parse_channel(parts[0])?;
    let green = parse_channel(parts[1])?;
    let blue = parse_channel(parts[2])?;
    let alpha = match alpha {
        Some(a) => parse_alpha(a)?,
        None => 255,
    };

    Some(Srgba::new(red, green, blue, alpha))
}

fn parse_channel(value: &str) -> Option<u8> {
    let scaled = match value.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f32>().ok()? / 100.0 * 255.0,
        None => value.trim().parse::<f32>().ok()?,
    };
    Some(scaled.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(value: &str) -> Option<u8> {
    let fraction = match value.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f32>().ok()? / 100.0,
        None => value.trim().parse::<f32>().ok()?,
    };
    Some((fraction.clamp(0.0, 1.0) * 255.0).round() as u8)
}
