use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::stream;
use tracing::debug;

use crate::application::{ChunkStream, CompletionTransport};
use crate::domain::{CompletionRequest, DomainError, Role};

/// One scripted stream element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEvent {
    /// A well-formed chunk carrying this text.
    Fragment(String),
    /// A payload passed through verbatim, e.g. something malformed.
    Raw(String),
    /// An element the transport could not decode; skipped by the client.
    Malformed(String),
    /// A transport failure at this point in the stream.
    Fail(String),
}

impl MockEvent {
    pub fn fragment(text: impl Into<String>) -> Self {
        Self::Fragment(text.into())
    }

    pub fn raw(payload: impl Into<String>) -> Self {
        Self::Raw(payload.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn fail(msg: impl Into<String>) -> Self {
        Self::Fail(msg.into())
    }

    fn into_item(self) -> Result<String, DomainError> {
        match self {
            MockEvent::Fragment(text) => Ok(encode_fragment(&text)),
            MockEvent::Raw(payload) => Ok(payload),
            MockEvent::Malformed(msg) => Err(DomainError::malformed_chunk(msg)),
            MockEvent::Fail(msg) => Err(DomainError::transport(msg)),
        }
    }
}

enum Behavior {
    Script(Vec<MockEvent>),
    Echo,
    Refuse(String),
}

/// In-process stand-in for the completion endpoint.
///
/// Counts calls and keeps the last request so callers can assert on what
/// would have been sent.
pub struct MockTransport {
    behavior: Behavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockTransport {
    /// Replays `events` on every call.
    pub fn scripted(events: Vec<MockEvent>) -> Self {
        Self::with_behavior(Behavior::Script(events))
    }

    /// Streams each fragment as its own well-formed chunk.
    pub fn fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::scripted(fragments.into_iter().map(MockEvent::fragment).collect())
    }

    /// Replies by repeating the latest user turn back, word by word.
    pub fn echo() -> Self {
        Self::with_behavior(Behavior::Echo)
    }

    /// Fails every call before any chunk is produced.
    pub fn refusing(msg: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Refuse(msg.into()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    fn echo_events(request: &CompletionRequest) -> Vec<MockEvent> {
        let question = request
            .messages()
            .iter()
            .rev()
            .find(|t| t.role() == Role::User)
            .map(|t| t.content())
            .unwrap_or_default();

        format!("You asked about: {question}")
            .split_inclusive(' ')
            .map(MockEvent::fragment)
            .collect()
    }
}

#[async_trait]
impl CompletionTransport for MockTransport {
    async fn open_stream(
        &self,
        _api_key: &str,
        request: &CompletionRequest,
    ) -> Result<ChunkStream, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }

        let events = match &self.behavior {
            Behavior::Script(events) => events.clone(),
            Behavior::Echo => Self::echo_events(request),
            Behavior::Refuse(msg) => return Err(DomainError::transport(msg.clone())),
        };

        debug!("Mock transport streaming {} events", events.len());

        let items: Vec<Result<String, DomainError>> =
            events.into_iter().map(MockEvent::into_item).collect();
        Ok(Box::pin(stream::iter(items)))
    }
}

/// Encode `text` the way the endpoint frames a content delta.
pub fn encode_fragment(text: &str) -> String {
    serde_json::json!({
        "object": "chat.completion.chunk",
        "choices": [{ "index": 0, "delta": { "content": text } }],
    })
    .to_string()
}
