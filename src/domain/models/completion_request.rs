use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Turn;
use crate::domain::DomainError;

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b";

/// Effort hint for reasoning models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningEffort {
    Low,
    #[default]
    Medium,
    High,
}

impl ReasoningEffort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningEffort::Low => "low",
            ReasoningEffort::Medium => "medium",
            ReasoningEffort::High => "high",
        }
    }
}

impl FromStr for ReasoningEffort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(ReasoningEffort::Low),
            "medium" => Ok(ReasoningEffort::Medium),
            "high" => Ok(ReasoningEffort::High),
            other => Err(DomainError::configuration(format!(
                "unknown reasoning effort '{other}' (expected low, medium or high)"
            ))),
        }
    }
}

/// Fixed sampling parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodingConfig {
    temperature: f32,
    top_p: f32,
    max_completion_tokens: u32,
    reasoning_effort: ReasoningEffort,
}

impl DecodingConfig {
    pub fn new(
        temperature: f32,
        top_p: f32,
        max_completion_tokens: u32,
        reasoning_effort: ReasoningEffort,
    ) -> Self {
        Self {
            temperature,
            top_p,
            max_completion_tokens,
            reasoning_effort,
        }
    }

    pub fn with_reasoning_effort(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = effort;
        self
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn top_p(&self) -> f32 {
        self.top_p
    }

    pub fn max_completion_tokens(&self) -> u32 {
        self.max_completion_tokens
    }

    pub fn reasoning_effort(&self) -> ReasoningEffort {
        self.reasoning_effort
    }
}

impl Default for DecodingConfig {
    fn default() -> Self {
        Self::new(1.0, 1.0, 8192, ReasoningEffort::Medium)
    }
}

/// Body of a streamed `/chat/completions` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    model: String,
    messages: Vec<Turn>,
    #[serde(flatten)]
    decoding: DecodingConfig,
    stream: bool,
    stop: Option<Vec<String>>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Turn>, decoding: DecodingConfig) -> Self {
        Self {
            model: model.into(),
            messages,
            decoding,
            stream: true,
            stop: None,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[Turn] {
        &self.messages
    }

    pub fn decoding(&self) -> &DecodingConfig {
        &self.decoding
    }

    pub fn is_stream(&self) -> bool {
        self.stream
    }
}
