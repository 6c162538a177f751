use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

use crate::domain::{CompletionRequest, DomainError};

/// Raw chunk payloads in arrival order. Single pass, not restartable.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, DomainError>> + Send>>;

/// Opens a streamed completion against a remote endpoint.
///
/// Implementors own the HTTP session and wire framing. Each stream item is the
/// undecoded payload of one chunk; decoding and skipping happen in the caller.
/// A transport-level failure, either while opening or mid-stream, is reported
/// as [`DomainError::Transport`].
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn open_stream(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<ChunkStream, DomainError>;
}
