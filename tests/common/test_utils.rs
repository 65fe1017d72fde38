use super::mocks::MockImageEditClient;
use paper_style_server::{
    editor::ImageEditor,
    server::{self, handlers::AppState},
    style::{DEFAULT_MODEL, StyleCatalog},
};
use axum::Router;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

pub const EDIT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEBUG_TIMEOUT: Duration = Duration::from_secs(30);

/// A tiny JPEG header, enough to stand in for an upload
pub const RAW_IMAGE: &str = "/9j/4AAQSkZJRgABAQAAAQABAAD";

pub const STYLE_NAMES: [&str; 4] = ["徽州生宣", "贵州皮纸", "棠岙竹纸", "西北毛边"];

pub fn create_editor(client: Arc<MockImageEditClient>) -> ImageEditor {
    ImageEditor::new(
        Arc::new(StyleCatalog::builtin()),
        client,
        EDIT_TIMEOUT,
        DEBUG_TIMEOUT,
    )
}

/// Router wired to a mock upstream; static files come from a temp dir.
pub fn create_test_app(client: Arc<MockImageEditClient>, static_dir: &str) -> Router {
    let state = AppState {
        editor: Arc::new(create_editor(client)),
        model: DEFAULT_MODEL.to_string(),
    };
    server::router(state, static_dir)
}

/// Successful reply in the shape the image-edit model documents
pub fn sample_success_response(image_url: &str) -> Value {
    json!({
        "output": {
            "choices": [{
                "finish_reason": "stop",
                "message": {
                    "role": "assistant",
                    "content": [{"image": image_url}]
                }
            }]
        },
        "usage": {"width": 1024, "image_count": 1, "height": 1024},
        "request_id": "d8a5b3c2-0000-4f1e-9d9b-3b1f2c7a1e11"
    })
}

/// Reply carrying usage under `output`, as seen from some model versions
pub fn sample_response_with_output_usage(image_url: &str) -> Value {
    json!({
        "output": {
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": [{"image": {"url": image_url, "width": 1024}}]
                }
            }],
            "usage": {"image_count": 1}
        },
        "request_id": "7f0c0e3a-1111-4c2b-a0e2-2b7f6f3d5c22"
    })
}

pub fn sample_error_response(code: &str, message: &str) -> Value {
    json!({
        "code": code,
        "message": message,
        "request_id": "0b9e7d6c-2222-4d3a-b1f3-1c8e5e4d6b33"
    })
}
