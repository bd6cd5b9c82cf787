//! UI Inventory (uinv) Library
//!
//! Turns raw element captures recorded by the browser extension into a
//! deduplicated catalog of components and design-token styles, and formats a
//! capture's resolved styles as a compact "visual essentials" table.
//!
//! # Module Overview
//!
//! - [`signature`] - Stable component keys from structural identity attributes
//! - [`aggregate`] - Component lists, per-component captures, style locations
//! - [`catalog`] - Deduplicated (token, value, kind) style catalog
//! - [`essentials`] - Visual-essentials rows, shorthand collapsing, evidence
//! - [`color`] - Color normalization to `#RRGGBBAA`
//! - [`source`] - URL normalization and source labels
//! - [`loader`] - Snapshot file ingestion (JSON/YAML)
//! - [`config`] - Configuration file support
//! - [`types`] - Core data types and structures
//! - [`output`] - JSON output schemas
//!
//! All derivations are pure: the same capture set always yields the same output.
//!
//! # Example
//!
//! ```no_run
//! use uinv_lib::{assign_keys, build_style_catalog, derive_components, keyed, load_snapshot};
//! use uinv_lib::config::IdentityConfig;
//!
//! # fn example() -> uinv_lib::Result<()> {
//! let snapshot = load_snapshot(std::path::Path::new("captures.json"))?;
//! let keys = assign_keys(&snapshot.captures, &IdentityConfig::default());
//! let captures = keyed(&snapshot.captures, &keys);
//!
//! let components = derive_components(&captures, &snapshot.overrides);
//! let styles = build_style_catalog(&snapshot.captures);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod catalog;
pub mod color;
pub mod config;
pub mod error;
pub mod essentials;
pub mod loader;
pub mod output;
pub mod signature;
pub mod source;
pub mod types;

pub use aggregate::{
    derive_component_captures, derive_components, derive_related_components_for_style,
    derive_style_locations, representative_capture,
};
pub use catalog::{build_style_catalog, style_observations, StyleObservation, StyleTriple};
pub use config::Config;
pub use error::{InventoryError, Result};
pub use essentials::{
    annotate_evidence, collapse_shorthand, derive_capture_essentials, derive_visual_essentials,
    evidence_state,
};
pub use loader::{load_snapshot, InventorySnapshot};
pub use output::{
    ComponentDetailsOutput, ComponentsOutput, EssentialsOutput, ErrorOutput, InventoryOutput,
    StyleDetailsOutput, StylesOutput, UINV_OUTPUT_VERSION,
};
pub use signature::{assign_keys, component_key, compute_signature, hash_signature, keyed, Signature};
pub use source::{dedupe_by_url, source_label, MISSING_URL};
pub use types::{
    ComponentKey, IdentityOverride, KeyedCapture, RawCapture, StyleKind, ViewerComponent,
    ViewerComponentCapture, ViewerStyle, ViewerStyleLocation, ViewerStyleRelatedComponent,
    VisualEssentials, VisualEssentialsRow,
};
