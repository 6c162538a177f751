use std::io;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use tokio_util::io::StreamReader;
use tracing::{debug, warn};

use super::sse_payloads;
use crate::application::{ChunkStream, CompletionTransport};
use crate::domain::{CompletionRequest, DomainError};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_VAR: &str = "GROQ_BASE_URL";
/// Environment variable selecting the model sent with each request.
pub const MODEL_VAR: &str = "GROQ_MODEL";
const COMPLETIONS_PATH: &str = "/chat/completions";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP transport for Groq's OpenAI-compatible chat completions endpoint (and
/// any other server speaking the same protocol).
///
/// Sends the request with `stream: true` and turns the `text/event-stream`
/// response into a stream of raw `data:` payloads. Only the connection is
/// bounded by a timeout; a long reply is never cut short.
///
/// **Base URL**: defaults to `https://api.groq.com/openai/v1`. Override with
/// `GROQ_BASE_URL` to target another compatible server.
pub struct GroqTransport {
    client: reqwest::Client,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl GroqTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .build()
                .unwrap_or_default(),
            url,
        }
    }

    /// Base URL from `GROQ_BASE_URL`, falling back to the public Groq API.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionTransport for GroqTransport {
    async fn open_stream(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<ChunkStream, DomainError> {
        debug!("GroqTransport: POST {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .header(ACCEPT, "text/event-stream")
            .json(request)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("GroqTransport: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GroqTransport: API returned {status}: {body}");
            return Err(DomainError::transport(format!(
                "GroqTransport: API returned {status}"
            )));
        }

        let body = response
            .bytes_stream()
            .map(|r| r.map_err(|e| io::Error::new(io::ErrorKind::Other, e)));

        Ok(sse_payloads(StreamReader::new(Box::pin(body))))
    }
}
