use serde::{Deserialize, Serialize};

use super::Turn;

/// The running transcript of a session, in insertion order.
///
/// Only user and assistant turns can be appended; the leading instruction is
/// managed by normalization, so no instruction can end up past position 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// A conversation that already starts with the canonical instruction.
    pub fn seeded() -> Self {
        Self {
            turns: vec![Turn::canonical_instruction()],
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    /// Replace the whole transcript with an already-normalized one.
    pub fn replace(&mut self, turns: Vec<Turn>) {
        self.turns = turns;
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Turns a user should see: everything except the instruction.
    pub fn visible_turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(|t| !t.is_instruction())
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
