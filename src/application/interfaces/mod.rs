mod completion_transport;
mod credential_source;

pub use completion_transport::*;
pub use credential_source::*;
