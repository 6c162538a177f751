use tracing::{debug, warn};

use crate::application::CompletionClient;
use crate::domain::{normalize_within, Conversation, DomainError, Turn};

/// One interactive chat: owns the running conversation and commits a turn
/// only once its reply has fully arrived.
///
/// The stored conversation is kept within the client's history limit, so it
/// never grows past what a request could carry.
pub struct ChatSession {
    client: CompletionClient,
    conversation: Conversation,
}

impl ChatSession {
    pub fn new(client: CompletionClient) -> Self {
        Self {
            client,
            conversation: Conversation::seeded(),
        }
    }

    pub async fn send(&mut self, user_text: &str) -> Result<String, DomainError> {
        self.send_streaming(user_text, |_| {}).await
    }

    /// Ask the assistant and stream its reply through `on_fragment`.
    ///
    /// The conversation gains the user turn and the reply together; if the
    /// call fails it is left exactly as it was.
    pub async fn send_streaming<F>(
        &mut self,
        user_text: &str,
        on_fragment: F,
    ) -> Result<String, DomainError>
    where
        F: FnMut(&str),
    {
        let user_text = user_text.trim();
        if user_text.is_empty() {
            return Err(DomainError::invalid_input("message is empty"));
        }

        let mut candidate = self.conversation.turns().to_vec();
        candidate.push(Turn::user(user_text));

        match self.client.get_response_streaming(&candidate, on_fragment).await {
            Ok(reply) => {
                self.conversation.push_user(user_text);
                self.conversation.push_assistant(reply.clone());
                let bounded =
                    normalize_within(self.conversation.turns(), self.client.history_limit());
                self.conversation.replace(bounded);
                debug!("Conversation now holds {} turns", self.conversation.len());
                Ok(reply)
            }
            Err(e) => {
                warn!("Turn failed, conversation left unchanged: {e}");
                Err(e)
            }
        }
    }

    /// Turns to render, oldest first. The instruction is never shown.
    pub fn transcript(&self) -> impl Iterator<Item = &Turn> {
        self.conversation.visible_turns()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// The client answering this session.
    pub fn client(&self) -> &CompletionClient {
        &self.client
    }

    pub fn reset(&mut self) {
        self.conversation = Conversation::seeded();
    }
}
