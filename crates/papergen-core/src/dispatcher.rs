//! Request dispatch to the generation endpoint

use crate::config::Config;
use crate::error::{PaperError, PaperResult};
use crate::prompt::Prompt;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::Serialize;
use std::pin::Pin;

/// Response body as a stream of raw chunks
pub type ByteStream = Pin<Box<dyn Stream<Item = PaperResult<Vec<u8>>> + Send>>;

/// Anything that can turn a prompt into a byte stream
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChunkSource: Send + Sync {
    /// Issue one request for `prompt`.
    ///
    /// Returns `Ok(None)` when the request succeeded but there is no body to
    /// read.
    async fn open(&self, prompt: &Prompt) -> PaperResult<Option<ByteStream>>;
}

/// JSON body posted to the endpoint
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a Prompt,
}

/// HTTP dispatcher posting prompts to the backend proxy.
///
/// One request per call; no retry and no backoff.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
    endpoint: String,
}

impl Dispatcher {
    /// Create a dispatcher with a default HTTP client
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    /// Create a dispatcher reusing an existing HTTP client
    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Create a dispatcher from configuration
    pub fn from_config(config: &Config) -> PaperResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| PaperError::config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(config.endpoint.clone(), client))
    }

    /// Endpoint the prompt is posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChunkSource for Dispatcher {
    async fn open(&self, prompt: &Prompt) -> PaperResult<Option<ByteStream>> {
        tracing::debug!(
            endpoint = %self.endpoint,
            prompt_len = prompt.as_str().len(),
            "sending generation request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&GenerateRequest { prompt })
            .send()
            .await
            .map_err(|e| {
                PaperError::transport(format!("request to {} failed: {}", self.endpoint, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "generation endpoint returned an error");
            return Err(PaperError::http(status));
        }

        if status == reqwest::StatusCode::NO_CONTENT || response.content_length() == Some(0) {
            tracing::debug!(status = status.as_u16(), "response has no body");
            return Ok(None);
        }

        let stream = response.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| PaperError::transport(format!("stream read error: {}", e)))
        });

        Ok(Some(Box::pin(stream)))
    }
}
