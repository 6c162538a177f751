use serde::{Deserialize, Serialize};

use super::CANONICAL_INSTRUCTION;

/// Speaker of a turn. `Instruction` goes over the wire as `"system"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[serde(rename = "system")]
    Instruction,
    User,
    Assistant,
}

impl Role {
    /// Label used when rendering a transcript.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Instruction => "instruction",
            Role::User => "you",
            Role::Assistant => "assistant",
        }
    }
}

/// One message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn instruction(content: impl Into<String>) -> Self {
        Self::new(Role::Instruction, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn canonical_instruction() -> Self {
        Self::instruction(CANONICAL_INSTRUCTION)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_instruction(&self) -> bool {
        self.role == Role::Instruction
    }

    pub fn is_canonical_instruction(&self) -> bool {
        self.is_instruction() && self.content == CANONICAL_INSTRUCTION
    }
}
