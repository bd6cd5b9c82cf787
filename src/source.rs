//! Capture provenance: URL normalization and human-readable source labels.

use std::collections::HashSet;
use url::Url;

use crate::types::ViewerComponentCapture;

/// Stand-in for captures recorded without a page URL.
pub const MISSING_URL: &str = "(missing url)";

/// Normalize an optional capture URL, substituting [`MISSING_URL`] when absent.
pub fn normalize_url(url: Option<&str>) -> String {
    match url.map(str::trim) {
        Some(u) if !u.is_empty() => u.to_string(),
        _ => MISSING_URL.to_string(),
    }
}

/// Short label for a capture URL, used in source lists.
///
/// Hosted URLs collapse to their hostname (without a leading `www.`). Host-less
/// URLs such as `file:` keep scheme and path. Anything that fails to parse is
/// returned verbatim.
pub fn source_label(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() || trimmed == MISSING_URL {
        return MISSING_URL.to_string();
    }

    match Url::parse(trimmed) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) if !host.is_empty() => {
                host.strip_prefix("www.").unwrap_or(host).to_string()
            }
            _ => format!("{}:{}", parsed.scheme(), parsed.path()),
        },
        Err(err) => {
            log::warn!("unparseable capture url '{}': {}; using literal label", trimmed, err);
            trimmed.to_string()
        }
    }
}

/// Drop records whose URL was already seen, keeping the first occurrence.
pub fn dedupe_by_url(records: &[ViewerComponentCapture]) -> Vec<ViewerComponentCapture> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| seen.insert(record.url.as_str()))
        .cloned()
        .collect()
}
