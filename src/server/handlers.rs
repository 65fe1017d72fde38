use super::types::{DebugResponse, EditRequest, EditResponse, ErrorResponse, HealthResponse};
use crate::{Error, editor::ImageEditor};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

pub const SERVICE_NAME: &str = "Paper style image edit API";

const SUGGESTION: &str =
    "Check the API key and model configuration, or contact support with the request id";

#[derive(Clone)]
pub struct AppState {
    pub editor: Arc<ImageEditor>,
    pub model: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn validation_error(e: &Error) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            success: false,
            error: e.user_message(),
            suggestion: None,
            available_styles: e.available_styles().map(<[String]>::to_vec),
            response_data: None,
        }),
    )
}

/// Turns an unreadable body (bad JSON, wrong field types, wrong content
/// type) into the same 400 reply as any other invalid request.
fn body_error(state: &AppState, rejection: JsonRejection) -> ApiError {
    warn!("Rejected request body: {}", rejection.body_text());
    validation_error(&Error::InvalidBody {
        message: rejection.body_text(),
        available: state.editor.style_names(),
    })
}

fn edit_error(e: &Error) -> ApiError {
    if e.is_validation() {
        return validation_error(e);
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            success: false,
            error: e.user_message(),
            suggestion: Some(SUGGESTION.to_string()),
            available_styles: None,
            response_data: None,
        }),
    )
}

fn debug_error(e: &Error) -> ApiError {
    if e.is_validation() {
        return validation_error(e);
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            success: false,
            error: e.to_string(),
            suggestion: None,
            available_styles: None,
            response_data: e.upstream_body().cloned(),
        }),
    )
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "running".to_string(),
        service: SERVICE_NAME.to_string(),
        model: state.model.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

pub async fn image_edit(
    State(state): State<AppState>,
    payload: Result<Json<EditRequest>, JsonRejection>,
) -> Result<Json<EditResponse>, ApiError> {
    let span = info_span!("image_edit", trace_id = %Uuid::new_v4());

    async move {
        let Json(request) = payload.map_err(|rejection| body_error(&state, rejection))?;

        info!(
            "Received image edit request for style: {}",
            request.style_name.as_deref().unwrap_or("<none>")
        );

        match state
            .editor
            .edit(request.style_name.as_deref(), request.image_base64.as_deref())
            .await
        {
            Ok(outcome) => Ok(Json(EditResponse {
                success: true,
                image_url: outcome.result.image_url,
                model: outcome.model,
                request_id: outcome.result.request_id,
                usage: outcome.result.usage,
                content_structure: outcome.result.content,
            })),
            Err(e) => {
                error!("Image edit failed: {}", e);
                Err(edit_error(&e))
            }
        }
    }
    .instrument(span)
    .await
}

pub async fn debug_response(
    State(state): State<AppState>,
    payload: Result<Json<EditRequest>, JsonRejection>,
) -> Result<Json<DebugResponse>, ApiError> {
    let span = info_span!("debug_response", trace_id = %Uuid::new_v4());

    async move {
        let Json(request) = payload.map_err(|rejection| body_error(&state, rejection))?;

        match state
            .editor
            .debug(request.style_name.as_deref(), request.image_base64.as_deref())
            .await
        {
            Ok(outcome) => Ok(Json(DebugResponse {
                success: true,
                full_response: outcome.full_response,
                content_structure: outcome.content,
                request_id: outcome.request_id,
            })),
            Err(e) => {
                error!("Debug request failed: {}", e);
                Err(debug_error(&e))
            }
        }
    }
    .instrument(span)
    .await
}
