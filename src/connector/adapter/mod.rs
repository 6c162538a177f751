mod credentials;
mod groq_transport;
mod mock_transport;
mod sse;

pub use credentials::*;
pub use groq_transport::*;
pub use mock_transport::*;
pub use sse::*;
