//! Chat client: local session state plus a WebSocket transport.

pub mod session;
pub mod transport;

pub use session::{ChatSession, EchoPolicy};
pub use transport::{ChatClient, Received, endpoint_url};
