use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of both POST endpoints. Fields are optional here so that missing
/// values are reported by the service rather than rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct EditRequest {
    #[serde(default)]
    pub style_name: Option<String>,
    #[serde(default)]
    pub image_base64: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub model: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub success: bool,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub model: String,
    pub request_id: Option<String>,
    pub usage: Value,
    pub content_structure: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct DebugResponse {
    pub success: bool,
    pub full_response: Value,
    pub content_structure: Option<Value>,
    pub request_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_styles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_data: Option<Value>,
}
