use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Upstream error codes with a dedicated user-facing message.
pub const CODE_INVALID_API_KEY: &str = "InvalidApiKey";
pub const CODE_MODEL_NOT_AVAILABLE: &str = "ModelNotAvailable";

const DEFAULT_FAILURE_MESSAGE: &str = "Image edit failed";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown style: {style}")]
    UnknownStyle {
        style: String,
        available: Vec<String>,
    },

    #[error("No image supplied")]
    MissingImage { available: Vec<String> },

    #[error("Invalid request body: {message}")]
    InvalidBody {
        message: String,
        available: Vec<String>,
    },

    #[error("Upstream error {code}: {message}")]
    Api {
        code: String,
        message: String,
        request_id: Option<String>,
        body: Option<Value>,
    },

    #[error("Upstream call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("Generated image URL not found in upstream response")]
    ImageNotFound,

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Upstream,
    Extraction,
    Timeout,
    Internal,
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Builds an upstream error from an error envelope such as
    /// `{"code": "...", "message": "...", "request_id": "..."}`.
    pub fn from_envelope(envelope: &Value) -> Self {
        let field = |name: &str| {
            envelope
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self::Api {
            code: envelope
                .get("code")
                .map(|code| match code {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_default(),
            message: field("message").unwrap_or_default(),
            request_id: field("request_id"),
            body: Some(envelope.clone()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownStyle { .. } | Self::MissingImage { .. } | Self::InvalidBody { .. } => {
                ErrorKind::Validation
            }
            Self::Api { .. } | Self::Transport(_) => ErrorKind::Upstream,
            Self::MalformedResponse(_) | Self::ImageNotFound => ErrorKind::Extraction,
            Self::Timeout(_) => ErrorKind::Timeout,
            _ => ErrorKind::Internal,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Style names to offer the caller when the request itself was invalid.
    pub fn available_styles(&self) -> Option<&[String]> {
        match self {
            Self::UnknownStyle { available, .. }
            | Self::MissingImage { available }
            | Self::InvalidBody { available, .. } => Some(available.as_slice()),
            _ => None,
        }
    }

    /// Raw upstream body attached to the error, if the upstream replied at all.
    pub fn upstream_body(&self) -> Option<&Value> {
        match self {
            Self::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Message shown to API callers.
    ///
    /// Upstream failures are translated for the known codes and always carry
    /// the upstream request id so that support can trace the call.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownStyle { .. } => "Invalid style selection".to_string(),
            Self::MissingImage { .. } => "Please upload an image".to_string(),
            Self::Api {
                code,
                message,
                request_id,
                ..
            } => {
                let text = match code.as_str() {
                    CODE_INVALID_API_KEY => "Invalid API key".to_string(),
                    CODE_MODEL_NOT_AVAILABLE => {
                        "Model not available, check the model name".to_string()
                    }
                    _ if !message.is_empty() => format!("{}: {}", code, message),
                    _ if !code.is_empty() => code.clone(),
                    _ => DEFAULT_FAILURE_MESSAGE.to_string(),
                };
                format!(
                    "{} (Request ID: {})",
                    text,
                    request_id.as_deref().unwrap_or("none")
                )
            }
            Self::MalformedResponse(_) | Self::ImageNotFound | Self::Timeout(_) => {
                format!("{}: {}", DEFAULT_FAILURE_MESSAGE, self)
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_invalid_api_key_is_translated() {
        let err = Error::from_envelope(&json!({
            "code": "InvalidApiKey",
            "message": "Invalid API-key provided.",
            "request_id": "req-1"
        }));

        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(err.user_message(), "Invalid API key (Request ID: req-1)");
    }

    #[test]
    fn test_model_not_available_is_translated() {
        let err = Error::from_envelope(&json!({"code": "ModelNotAvailable"}));
        assert_eq!(
            err.user_message(),
            "Model not available, check the model name (Request ID: none)"
        );
    }

    #[test]
    fn test_unknown_code_passes_upstream_message_through() {
        let err = Error::from_envelope(&json!({
            "code": "DataInspectionFailed",
            "message": "Input data may contain inappropriate content.",
            "request_id": "abc"
        }));

        let msg = err.user_message();
        assert!(msg.contains("DataInspectionFailed"));
        assert!(msg.contains("Input data may contain inappropriate content."));
        assert!(msg.ends_with("(Request ID: abc)"));
    }

    #[test]
    fn test_envelope_without_code_falls_back_to_generic_message() {
        let err = Error::from_envelope(&json!({}));
        assert_eq!(err.user_message(), "Image edit failed (Request ID: none)");
    }

    #[test]
    fn test_numeric_code_is_kept() {
        match Error::from_envelope(&json!({"code": 429})) {
            Error::Api { code, .. } => assert_eq!(code, "429"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_errors_expose_styles() {
        let err = Error::MissingImage {
            available: vec!["a".to_string(), "b".to_string()],
        };
        assert!(err.is_validation());
        assert_eq!(err.available_styles().map(<[String]>::len), Some(2));
        assert!(Error::ImageNotFound.available_styles().is_none());
    }

    #[test]
    fn test_invalid_body_is_a_validation_error() {
        let err = Error::InvalidBody {
            message: "expected a string".to_string(),
            available: vec!["a".to_string()],
        };
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "Invalid request body: expected a string");
        assert_eq!(err.available_styles().map(<[String]>::len), Some(1));
    }

    #[test]
    fn test_extraction_failures_are_not_validation_errors() {
        assert_eq!(Error::ImageNotFound.kind(), ErrorKind::Extraction);
        assert_eq!(Error::malformed("x").kind(), ErrorKind::Extraction);
        assert!(!Error::ImageNotFound.is_validation());
        assert!(Error::ImageNotFound.user_message().starts_with("Image edit failed"));
    }
}
