//! Core types used throughout the inventory library.
//!
//! - [`capture`] - Raw capture records consumed read-only
//! - [`view`] - Derived component, style and visual-essentials view models

pub mod capture;
pub mod view;

pub use capture::{
    BorderColor, BoxSides, CapturedStyles, ColorValue, Corners, EvidenceMethod, FontWeight, Gap,
    IdentityAttributes, RawCapture, ResolvedBorderColor, SideColors, StyleEvidence,
    StylePrimitives, Typography,
};
pub use view::{
    ComponentKey, EvidenceState, EvidencedRow, IdentityOverride, KeyedCapture, Section,
    StyleKind, ViewerComponent, ViewerComponentCapture, ViewerStyle, ViewerStyleLocation,
    ViewerStyleRelatedComponent, VisualEssentials, VisualEssentialsRow,
};
