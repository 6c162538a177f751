use std::sync::Arc;
use std::time::Instant;

use futures_util::StreamExt;
use tracing::{debug, info, warn};

use crate::application::{CompletionTransport, CredentialSource};
use crate::domain::{
    normalize_within, CompletionRequest, DecodingConfig, DomainError, HistoryLimit, StreamChunk,
    Turn, DEFAULT_MODEL, DONE_SENTINEL,
};

/// Obtains one assistant reply for a conversation.
///
/// Every call normalizes the supplied turns, streams a completion through the
/// configured transport and concatenates the fragments in arrival order. The
/// client keeps no memory between calls.
pub struct CompletionClient {
    transport: Arc<dyn CompletionTransport>,
    credentials: Arc<dyn CredentialSource>,
    model: String,
    history_limit: HistoryLimit,
    decoding: DecodingConfig,
}

impl CompletionClient {
    pub fn new(
        transport: Arc<dyn CompletionTransport>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            transport,
            credentials,
            model: DEFAULT_MODEL.to_string(),
            history_limit: HistoryLimit::default(),
            decoding: DecodingConfig::default(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_history_limit(mut self, limit: HistoryLimit) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_decoding(mut self, decoding: DecodingConfig) -> Self {
        self.decoding = decoding;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn history_limit(&self) -> HistoryLimit {
        self.history_limit
    }

    pub async fn get_response(&self, turns: &[Turn]) -> Result<String, DomainError> {
        self.get_response_streaming(turns, |_| {}).await
    }

    /// Same as [`CompletionClient::get_response`], handing each fragment to
    /// `on_fragment` as soon as it arrives.
    ///
    /// On failure any text already passed to `on_fragment` is discarded; the
    /// caller gets the error, never a truncated reply.
    pub async fn get_response_streaming<F>(
        &self,
        turns: &[Turn],
        mut on_fragment: F,
    ) -> Result<String, DomainError>
    where
        F: FnMut(&str),
    {
        let api_key = self
            .credentials
            .api_key()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| DomainError::configuration(self.credentials.missing_hint()))?;

        let history = normalize_within(turns, self.history_limit);
        let request = CompletionRequest::new(&self.model, history, self.decoding.clone());

        let decoding = request.decoding();
        info!(
            "Requesting completion from {} ({} turns, temperature={}, top_p={}, max_tokens={}, effort={})",
            self.model,
            request.messages().len(),
            decoding.temperature(),
            decoding.top_p(),
            decoding.max_completion_tokens(),
            decoding.reasoning_effort().as_str()
        );
        let start_time = Instant::now();

        let mut stream = self.transport.open_stream(&api_key, &request).await?;

        let mut reply = String::new();
        let mut fragments = 0usize;
        let mut skipped = 0usize;

        while let Some(item) = stream.next().await {
            let raw = match item {
                Ok(raw) => raw,
                Err(e) if e.is_malformed_chunk() => {
                    debug!("Skipping chunk: {e}");
                    skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!(
                        "Completion stream failed after {} fragments; discarding {} bytes",
                        fragments,
                        reply.len()
                    );
                    return Err(e);
                }
            };

            if raw.trim() == DONE_SENTINEL {
                break;
            }

            let chunk = match StreamChunk::parse(&raw) {
                Ok(chunk) => chunk,
                Err(e) => {
                    debug!("Skipping chunk: {e}");
                    skipped += 1;
                    continue;
                }
            };

            if let Some(message) = chunk.endpoint_error() {
                return Err(DomainError::transport(message));
            }

            if let Some(fragment) = chunk.fragment() {
                on_fragment(fragment);
                reply.push_str(fragment);
                fragments += 1;
            }
        }

        info!(
            "Completion finished in {:.2?}: {} fragments, {} skipped, {} bytes",
            start_time.elapsed(),
            fragments,
            skipped,
            reply.len()
        );

        Ok(reply)
    }
}
