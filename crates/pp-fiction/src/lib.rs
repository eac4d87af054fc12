//! Interactive session engine for The Pythonic Path.
//!
//! Turns free-text player commands into state transitions and a typed
//! message log. Follow-up messages (a location heading after discovery, the
//! verdict on an answer) are queued on a logical clock, so a front end
//! decides how fast they appear and tests can fire them instantly.

/// Session configuration.
pub mod config;
/// Conversation cursors.
pub mod dialogue;
/// Error types for the session engine.
pub mod error;
/// Answer checking and reward computation.
pub mod evaluator;
/// Inline markup spans.
pub mod markup;
/// Messages, notifications and the message log.
pub mod message;
/// Report and scene text.
pub mod narrator;
/// Command parsing and id suggestions.
pub mod parser;
/// Deferred event queue.
pub mod schedule;
/// Interactive session management.
pub mod session;

pub use config::{Delays, SessionConfig};
pub use error::{FictionError, FictionResult};
pub use message::{Message, MessageKind, MessageLog, Notification};
pub use parser::{Command, parse_command};
pub use session::Session;
