//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Completion transport (Groq over HTTP/SSE, plus an in-process mock)
//! - Credential lookup (process environment or a fixed key)

pub mod adapter;

pub use adapter::*;
