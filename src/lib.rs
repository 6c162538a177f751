pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    ChatSession, ChunkStream, CompletionClient, CompletionTransport, CredentialSource,
};

pub use connector::{
    encode_fragment, EnvCredentials, GroqTransport, MockEvent, MockTransport, StaticCredentials,
    API_KEY_VAR, BASE_URL_VAR, DEFAULT_BASE_URL, MODEL_VAR,
};

pub use domain::{
    normalize, normalize_within, CompletionRequest, Conversation, DecodingConfig, DomainError,
    HistoryLimit, ReasoningEffort, Role, StreamChunk, Turn, CANONICAL_INSTRUCTION,
    DEFAULT_MAX_TURNS, DEFAULT_MODEL, DONE_SENTINEL,
};
