//! Typed display events and the append-only log that holds them.

pub mod entry;
pub mod log;

pub use entry::{Message, MessageKind, Notification};
pub use log::MessageLog;
