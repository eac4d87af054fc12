//! Command parsing and id suggestions.

mod command;
mod resolver;

pub use command::{Command, parse_command};
pub use resolver::closest;
