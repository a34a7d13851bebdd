//! Broadcast hub: one dispatcher task fanning every message out to every
//! connection, the sender included.
//!
//! ```text
//! ws connection ─┐                       ┌─> outbound queue ─> ws connection
//! ws connection ─┼─> HubEvent queue ─> Hub ─> outbound queue ─> ws connection
//! ws connection ─┘                       └─> outbound queue ─> ws connection
//! ```

pub mod dispatcher;
pub mod event;
pub mod handle;

pub use dispatcher::Hub;
pub use event::HubEvent;
pub use handle::HubHandle;
