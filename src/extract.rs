//! Locates the generated image inside an upstream response.
//!
//! The documented envelope puts the result at
//! `output.choices[0].message.content`, but the shape found there varies
//! between calls. Strategies are tried from most to least specific and the
//! first hit wins:
//!
//! 1. a top-level `code` field means the call failed; nothing is inspected;
//! 2. `content` as a list: the first element with an `image` string, or an
//!    `image` object carrying a `url` string;
//! 3. `content` as a single object with an `image` string;
//! 4. a depth-first scan of the whole response for a string accepted by the
//!    [`UrlPattern`].

use crate::{Error, Result};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static HTTP_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s"'<>]+"#).expect("Invalid URL token regex")
});

/// Decides whether a string found by the deep scan is the generated image,
/// and which part of it to return.
pub trait UrlPattern: Send + Sync {
    fn find(&self, candidate: &str) -> Option<String>;
}

/// Accepts strings mentioning both "http" and ".png".
///
/// Only PNG output is recognised and incidental matches (a prompt echoing a
/// URL, say) are accepted too. Swap the pattern to change either.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngUrlPattern;

impl UrlPattern for PngUrlPattern {
    fn find(&self, candidate: &str) -> Option<String> {
        if !(candidate.contains("http") && candidate.contains(".png")) {
            return None;
        }

        let token = HTTP_TOKEN
            .find_iter(candidate)
            .map(|m| m.as_str().trim_end_matches([',', '.', ';', ')', ']', '}']))
            .find(|token| token.contains(".png"));

        Some(token.unwrap_or(candidate).to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedResult {
    pub image_url: String,
    pub request_id: Option<String>,
    /// `output.usage`, or an empty object.
    pub usage: Value,
    /// `output.choices[0].message.content` as returned, if present.
    pub content: Option<Value>,
}

pub struct ResponseExtractor {
    pattern: Box<dyn UrlPattern>,
}

impl Default for ResponseExtractor {
    fn default() -> Self {
        Self::new(PngUrlPattern)
    }
}

impl ResponseExtractor {
    pub fn new(pattern: impl UrlPattern + 'static) -> Self {
        Self {
            pattern: Box::new(pattern),
        }
    }

    pub fn extract(&self, response: &Value) -> Result<ExtractedResult> {
        if response.get("code").is_some_and(is_present) {
            return Err(Error::from_envelope(response));
        }

        let content = content_structure(response);
        let image_url = content
            .and_then(structured_url)
            .or_else(|| self.deep_scan(response));

        let image_url = match (image_url, content) {
            (Some(url), _) => url,
            (None, None) => {
                return Err(Error::malformed(
                    "missing output.choices[0].message.content",
                ));
            }
            (None, Some(_)) => return Err(Error::ImageNotFound),
        };

        Ok(ExtractedResult {
            image_url,
            request_id: request_id(response),
            usage: response
                .pointer("/output/usage")
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new())),
            content: content.cloned(),
        })
    }

    /// Depth-first, in document order, so the same response always yields
    /// the same match.
    pub fn deep_scan(&self, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => self.pattern.find(s),
            Value::Array(items) => items.iter().find_map(|item| self.deep_scan(item)),
            Value::Object(map) => map.values().find_map(|item| self.deep_scan(item)),
            _ => None,
        }
    }
}

/// The `content` node of the first choice, treating null and empty values as
/// absent.
pub fn content_structure(response: &Value) -> Option<&Value> {
    response
        .pointer("/output/choices/0/message/content")
        .filter(|content| is_present(content))
}

pub fn request_id(response: &Value) -> Option<String> {
    response
        .get("request_id")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn structured_url(content: &Value) -> Option<String> {
    match content {
        Value::Array(items) => items.iter().find_map(|item| match item.get("image")? {
            Value::String(url) if !url.is_empty() => Some(url.clone()),
            Value::Object(image) => image
                .get("url")?
                .as_str()
                .filter(|url| !url.is_empty())
                .map(str::to_string),
            _ => None,
        }),
        Value::Object(item) => item
            .get("image")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
