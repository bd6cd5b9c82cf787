use crate::error::ErrorPayload;
use crate::types::{
    ViewerComponent, ViewerComponentCapture, ViewerStyle, ViewerStyleLocation,
    ViewerStyleRelatedComponent, VisualEssentials,
};
use serde::{Deserialize, Serialize};

/// Schema version for output payloads.
pub const UINV_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum InventoryOutput {
    Components(ComponentsOutput),
    Styles(StylesOutput),
    ComponentDetails(ComponentDetailsOutput),
    StyleDetails(StyleDetailsOutput),
    Essentials(EssentialsOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentsOutput {
    pub version: String,
    pub capture_count: usize,
    pub components: Vec<ViewerComponent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylesOutput {
    pub version: String,
    pub capture_count: usize,
    pub styles: Vec<ViewerStyle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDetailsOutput {
    pub version: String,
    pub component: ViewerComponent,
    pub captures: Vec<ViewerComponentCapture>,
    /// Captures de-duplicated by URL, first occurrence kept
    pub sources: Vec<ViewerComponentCapture>,
    pub essentials: VisualEssentials,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDetailsOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ViewerStyle>,
    #[serde(default)]
    pub locations: Vec<ViewerStyleLocation>,
    #[serde(default)]
    pub related_components: Vec<ViewerStyleRelatedComponent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssentialsOutput {
    pub version: String,
    pub capture_id: String,
    pub component_id: String,
    pub essentials: VisualEssentials,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}
