use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;

use super::source::{FetchErrorKind, HttpSource};

/// Mock HTTP source that records calls and serves canned bodies per URL
#[derive(Debug, Clone, Default)]
pub struct MockHttpSource {
    calls: Arc<Mutex<Vec<String>>>,
    responses: Arc<Mutex<HashMap<String, Result<String, FetchErrorKind>>>>,
}

impl MockHttpSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to serve a body for a given URL
    pub fn with_body(self, url: &str, body: impl Into<String>) -> Self {
        self.insert(url, Ok(body.into()));
        self
    }

    /// Builder method to fail requests for a given URL
    pub fn with_error(self, url: &str, error: FetchErrorKind) -> Self {
        self.insert(url, Err(error));
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn insert(&self, url: &str, response: Result<String, FetchErrorKind>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(url.to_string(), response);
        }
    }
}

#[async_trait]
impl HttpSource for MockHttpSource {
    async fn get_text(&self, url: &str) -> Result<String, FetchErrorKind> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }

        self.responses
            .lock()
            .map_err(|_| FetchErrorKind::Transport("mock poisoned".to_string()))?
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(FetchErrorKind::Transport(format!("no response configured for {}", url))))
    }
}
