use serde::Deserialize;
use serde_json::Value;

use crate::domain::DomainError;

/// Payload the endpoint sends after the last chunk.
pub const DONE_SENTINEL: &str = "[DONE]";

/// One decoded element of a streamed completion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Option<ChunkDelta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

impl StreamChunk {
    /// Decode a raw `data:` payload.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::malformed_chunk(format!("{e}: {raw}")))
    }

    /// Text carried by `choices[0].delta.content`, if any.
    pub fn fragment(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.as_ref())
            .and_then(|d| d.content.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Message of an error object the endpoint emitted in place of a chunk.
    pub fn endpoint_error(&self) -> Option<String> {
        let error = self.error.as_ref()?;
        if let Some(message) = error.get("message").and_then(Value::as_str) {
            return Some(message.to_string());
        }
        if let Some(message) = error.as_str() {
            return Some(message.to_string());
        }
        Some("endpoint reported an error during streaming".to_string())
    }
}
