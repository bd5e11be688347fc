//! Common utilities for long-running collector processes

mod heartbeat;
mod shutdown;

pub use heartbeat::Heartbeat;
pub use shutdown::ShutdownManager;
