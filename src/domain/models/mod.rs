mod completion_request;
mod conversation;
mod instruction;
mod stream_chunk;
mod turn;

pub use completion_request::*;
pub use conversation::*;
pub use instruction::*;
pub use stream_chunk::*;
pub use turn::*;
