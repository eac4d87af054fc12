//! Text generation for reports and staged scenes.
//!
//! Every function here is read-only and returns the messages to append, in
//! order. Nothing is logged directly.

mod reports;
mod scenes;

pub use reports::{concepts, help, inventory, look, status};
pub use scenes::{
    challenge_detail, challenge_intro, dialogue_line, intro_journey, response_prompt, welcome,
};
