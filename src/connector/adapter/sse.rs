use futures_util::{stream, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_stream::wrappers::SplitStream;

use crate::application::ChunkStream;
use crate::domain::DomainError;

/// Data lines collected for the event currently being read.
#[derive(Default)]
struct PendingEvent {
    data: Vec<String>,
    malformed: Option<String>,
    has_data: bool,
}

impl PendingEvent {
    fn push_data(&mut self, raw: &[u8]) {
        self.has_data = true;
        match std::str::from_utf8(raw) {
            Ok(text) => self.data.push(text.to_string()),
            Err(e) => {
                self.malformed
                    .get_or_insert_with(|| format!("data line is not valid UTF-8: {e}"));
            }
        }
    }

    fn take(&mut self) -> Option<Result<String, DomainError>> {
        if !self.has_data {
            return None;
        }
        let event = std::mem::take(self);
        Some(match event.malformed {
            Some(msg) => Err(DomainError::malformed_chunk(msg)),
            None => Ok(event.data.join("\n")),
        })
    }
}

/// Split a `text/event-stream` body into the payloads of its `data:` fields.
///
/// Lines are framed on raw bytes, so an event that is not valid UTF-8 comes
/// out as [`DomainError::MalformedChunk`] and the events after it still
/// arrive. A read failure ends the stream with [`DomainError::Transport`].
pub fn sse_payloads<R>(reader: R) -> ChunkStream
where
    R: AsyncBufRead + Send + Unpin + 'static,
{
    let lines = SplitStream::new(reader.split(b'\n'));

    let payloads = stream::unfold(
        Some((lines, PendingEvent::default())),
        |state| async move {
            let (mut lines, mut pending) = state?;
            loop {
                match lines.next().await {
                    Some(Ok(line)) => {
                        if let Some(item) = feed_line(&mut pending, &line) {
                            return Some((item, Some((lines, pending))));
                        }
                    }
                    Some(Err(e)) => {
                        let err = DomainError::transport(format!("stream interrupted: {e}"));
                        return Some((Err(err), None));
                    }
                    // Servers may close without the final blank line.
                    None => return pending.take().map(|item| (item, None)),
                }
            }
        },
    );

    Box::pin(payloads)
}

/// Returns a finished event when `line` is the blank line ending one.
fn feed_line(pending: &mut PendingEvent, line: &[u8]) -> Option<Result<String, DomainError>> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.is_empty() {
        return pending.take();
    }

    // Comments and the event/id/retry fields carry nothing we use.
    if let Some(value) = line.strip_prefix(b"data:") {
        let value = value.strip_prefix(b" ").unwrap_or(value);
        pending.push_data(value);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect(body: &'static [u8]) -> Vec<Result<String, DomainError>> {
        sse_payloads(body).collect().await
    }

    fn payloads(items: Vec<Result<String, DomainError>>) -> Vec<String> {
        items.into_iter().map(|item| item.unwrap()).collect()
    }

    #[tokio::test]
    async fn test_splits_events() {
        let items = collect(b"data: {\"a\":1}\n\ndata: [DONE]\n\n").await;
        assert_eq!(payloads(items), vec!["{\"a\":1}", "[DONE]"]);
    }

    #[tokio::test]
    async fn test_ignores_comments_and_other_fields() {
        let body = b": keep-alive\n\nevent: chunk\nid: 7\ndata: x\r\n\r\nretry: 10\n\n";
        let items = collect(body).await;
        assert_eq!(payloads(items), vec!["x"]);
    }

    #[tokio::test]
    async fn test_joins_multi_line_data() {
        let items = collect(b"data: first\ndata:second\n\n").await;
        assert_eq!(payloads(items), vec!["first\nsecond"]);
    }

    #[tokio::test]
    async fn test_emits_trailing_event_without_blank_line() {
        let items = collect(b"data: a\n\ndata: b").await;
        assert_eq!(payloads(items), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_event_does_not_hide_later_events() {
        let items = collect(b"data: He\n\ndata: \xff\xfe\n\ndata: llo\n\n").await;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_deref().unwrap(), "He");
        assert!(items[1].as_ref().unwrap_err().is_malformed_chunk());
        assert_eq!(items[2].as_deref().unwrap(), "llo");
    }
}
