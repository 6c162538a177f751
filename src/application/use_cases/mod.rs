mod chat_session;
mod completion_client;

pub use chat_session::*;
pub use completion_client::*;
