use super::types::GenerationRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const GENERATION_PATH: &str = "/services/aigc/multimodal-generation/generation";

/// Upstream image model. Returns the raw response envelope; interpreting it
/// is left to the extractor.
#[async_trait]
pub trait ImageEditClient: Send + Sync {
    async fn generate(&self, request: &GenerationRequest, timeout: Duration) -> Result<Value>;
}

pub struct DashScopeClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl DashScopeClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), GENERATION_PATH),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> Error {
    if err.is_timeout() {
        Error::Timeout(timeout)
    } else {
        Error::transport(err.to_string())
    }
}

/// Turns a non-2xx reply into an upstream error, keeping whatever the
/// upstream said about it.
fn status_error(status: StatusCode, body: &str) -> Error {
    match serde_json::from_str::<Value>(body) {
        Ok(envelope) if envelope.is_object() => match Error::from_envelope(&envelope) {
            Error::Api {
                code,
                message,
                request_id,
                body,
            } => Error::Api {
                code: if code.is_empty() {
                    status.as_u16().to_string()
                } else {
                    code
                },
                message,
                request_id,
                body,
            },
            other => other,
        },
        _ => Error::Api {
            code: status.as_u16().to_string(),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
            request_id: None,
            body: None,
        },
    }
}

#[async_trait]
impl ImageEditClient for DashScopeClient {
    async fn generate(&self, request: &GenerationRequest, timeout: Duration) -> Result<Value> {
        debug!(
            "Calling {} with model {} (timeout {:?})",
            self.endpoint, request.model, timeout
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        debug!("Upstream responded with status {}", status);

        if !status.is_success() {
            warn!("Upstream rejected the call with status {}", status);
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::malformed(format!("response body is not JSON: {}", e)))
    }
}
