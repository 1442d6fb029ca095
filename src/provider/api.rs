//! HTTP client for the passage-text edge function.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration as StdDuration;

use crate::bible::VerseSpan;
use crate::config::Config;
use crate::error::FetchError;
use crate::provider::types::{decode, TextRequest};
use crate::services::TextProvider;

/// Client for the passage-text edge function
///
/// Every call is a single POST; there is no retry and no caching, so a failed
/// request surfaces immediately to the reader.
#[derive(Clone)]
pub struct TextApiClient {
    endpoint: Option<String>,
    api_key: Option<String>,
    translation: String,
    client: Client,
}

impl TextApiClient {
    /// Create a new text client from config
    pub fn new(config: &Config) -> Self {
        Self {
            endpoint: config.api_url.clone(),
            api_key: config.api_key.clone(),
            translation: config.translation.clone(),
            client: Client::builder()
                .timeout(StdDuration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Post a request to the edge function and decode the passage text
    async fn post(&self, request: &TextRequest<'_>) -> Result<String, FetchError> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return Err(FetchError::not_configured());
        };

        let mut builder = self.client.post(endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.header("apikey", key).bearer_auth(key);
        }

        tracing::debug!(
            "POST {} book={} chapter={} verses={:?}-{:?}",
            endpoint,
            request.book,
            request.chapter,
            request.verse_start,
            request.verse_end
        );

        let resp = builder
            .send()
            .await
            .map_err(|e| FetchError::new(transport_message(&e)))?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| {
            FetchError::with_status(format!("Failed to read response: {e}"), status)
        })?;

        decode(status, &body)
    }
}

#[async_trait]
impl TextProvider for TextApiClient {
    async fn fetch_chapter(&self, book: &str, chapter: u32) -> Result<String, FetchError> {
        self.post(&TextRequest::chapter(book, chapter, &self.translation)).await
    }

    async fn fetch_verses(
        &self,
        book: &str,
        chapter: u32,
        verses: VerseSpan,
    ) -> Result<String, FetchError> {
        self.post(&TextRequest::verses(book, chapter, verses, &self.translation)).await
    }

    fn name(&self) -> &'static str {
        "TextApiClient"
    }
}

/// Reader-facing wording for transport failures
fn transport_message(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "The request timed out. The text provider might be slow right now.".to_string()
    } else if e.is_connect() {
        "Could not reach the text provider. Check your internet connection.".to_string()
    } else {
        format!("Request to text provider failed: {e}")
    }
}
