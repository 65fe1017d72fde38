use crate::style::StyleEntry;
use serde::{Deserialize, Serialize};

/// Fixed text prompt of the debug request.
pub const DESCRIBE_PROMPT: &str = "简单描述这张图片";

pub const OUTPUT_SIZE: &str = "1024*1024";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub input: GenerationInput,
    pub parameters: GenerationParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationInput {
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    Image { image: String },
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub n: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_extend: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<bool>,
}

impl Message {
    pub fn user(image: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: vec![
                ContentPart::Image {
                    image: image.into(),
                },
                ContentPart::Text { text: text.into() },
            ],
        }
    }
}

impl GenerationRequest {
    /// Request that re-renders `image` in the given style.
    ///
    /// One 1024x1024 output, upstream prompt extension and watermark enabled.
    pub fn for_style(style: &StyleEntry, image: &str) -> Self {
        Self {
            model: style.model.clone(),
            input: GenerationInput {
                messages: vec![Message::user(image, style.positive_prompt.as_str())],
            },
            parameters: GenerationParameters {
                n: 1,
                negative_prompt: Some(style.negative_prompt.clone()),
                size: Some(OUTPUT_SIZE.to_string()),
                prompt_extend: Some(true),
                watermark: Some(true),
            },
        }
    }

    /// Minimal request used to inspect raw upstream responses.
    pub fn describe(model: &str, image: &str) -> Self {
        Self {
            model: model.to_string(),
            input: GenerationInput {
                messages: vec![Message::user(image, DESCRIBE_PROMPT)],
            },
            parameters: GenerationParameters {
                n: 1,
                negative_prompt: None,
                size: None,
                prompt_extend: None,
                watermark: None,
            },
        }
    }
}
