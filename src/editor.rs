use crate::{
    Error, Result,
    dashscope::{GenerationRequest, ImageEditClient},
    extract::{self, ExtractedResult, ResponseExtractor},
    image,
    style::{DEFAULT_STYLE, StyleCatalog},
};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tracing::{debug, error, info, warn};

/// Successful re-render of an image.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub model: String,
    pub result: ExtractedResult,
}

/// Raw upstream reply captured by the debug endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugOutcome {
    pub full_response: Value,
    pub content: Option<Value>,
    pub request_id: Option<String>,
}

pub struct ImageEditor {
    catalog: Arc<StyleCatalog>,
    client: Arc<dyn ImageEditClient>,
    extractor: ResponseExtractor,
    edit_timeout: Duration,
    debug_timeout: Duration,
}

impl ImageEditor {
    pub fn new(
        catalog: Arc<StyleCatalog>,
        client: Arc<dyn ImageEditClient>,
        edit_timeout: Duration,
        debug_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            client,
            extractor: ResponseExtractor::default(),
            edit_timeout,
            debug_timeout,
        }
    }

    pub fn with_extractor(mut self, extractor: ResponseExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn style_names(&self) -> Vec<String> {
        self.catalog.names()
    }

    /// Re-renders `raw_image` in the named style.
    ///
    /// Validation happens before any upstream call. There are no retries.
    pub async fn edit(
        &self,
        style_name: Option<&str>,
        raw_image: Option<&str>,
    ) -> Result<EditOutcome> {
        let style = self.catalog.lookup(style_name.unwrap_or_default())?;
        let image = image::normalize(raw_image, &self.catalog.names())?;

        info!(
            "Editing image with style {} using model {}",
            style.name, style.model
        );
        debug!("Normalized image payload is {} bytes", image.len());

        let request = GenerationRequest::for_style(style, &image);
        let response = self.client.generate(&request, self.edit_timeout).await?;

        debug!("Upstream response: {}", response);

        match self.extractor.extract(&response) {
            Ok(result) => {
                info!("Image edit succeeded: {}", result.image_url);
                Ok(EditOutcome {
                    model: style.model.clone(),
                    result,
                })
            }
            Err(e) => {
                match &e {
                    Error::Api { .. } => warn!("Upstream reported an error: {}", e),
                    _ => error!("Could not extract image from upstream response: {}", e),
                }
                Err(e)
            }
        }
    }

    /// Sends a minimal describe request and hands back the raw reply.
    ///
    /// Unknown or missing styles fall back to the default style.
    pub async fn debug(
        &self,
        style_name: Option<&str>,
        raw_image: Option<&str>,
    ) -> Result<DebugOutcome> {
        let image = image::normalize(raw_image, &self.catalog.names())?;

        let style = style_name
            .and_then(|name| self.catalog.get(name))
            .or_else(|| self.catalog.get(DEFAULT_STYLE))
            .ok_or_else(|| Error::internal("style catalog has no default style"))?;

        info!("Debug request with model {}", style.model);

        let request = GenerationRequest::describe(&style.model, &image);
        let response = self.client.generate(&request, self.debug_timeout).await?;

        Ok(DebugOutcome {
            content: extract::content_structure(&response).cloned(),
            request_id: extract::request_id(&response),
            full_response: response,
        })
    }
}
