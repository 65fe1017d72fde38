use async_trait::async_trait;
use paper_style_server::{
    Error, Result,
    dashscope::{GenerationRequest, ImageEditClient},
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock upstream client for testing
#[derive(Debug, Default)]
pub struct MockImageEditClient {
    pub responses: Arc<Mutex<VecDeque<Value>>>,
    pub requests: Arc<Mutex<Vec<(GenerationRequest, Duration)>>>,
    pub error: Arc<Mutex<Option<Error>>>,
}

impl MockImageEditClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: Value) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn with_error(self, error: Error) -> Self {
        *self.error.lock().unwrap() = Some(error);
        self
    }

    pub fn get_requests(&self) -> Vec<(GenerationRequest, Duration)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageEditClient for MockImageEditClient {
    async fn generate(&self, request: &GenerationRequest, timeout: Duration) -> Result<Value> {
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), timeout));

        if let Some(error) = self.error.lock().unwrap().take() {
            return Err(error);
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::transport("No more mock responses available"))
    }
}
