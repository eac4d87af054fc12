//! Configuration for a play session.

use pp_core::TextSpeed;

/// Base delays of deferred messages, in milliseconds at normal speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    /// Heading and description after discovering a new area.
    pub first_visit: u64,
    /// Question, template or hint after a challenge begins.
    pub challenge_detail: u64,
    /// Outcome of a cast that solves a challenge.
    pub cast_resolution: u64,
    /// Response options after an NPC speaks.
    pub talk_options: u64,
    /// NPC line after the player picks a response.
    pub dialogue_reply: u64,
    /// Verdict after an answer or submission.
    pub answer_verdict: u64,
    /// Second intro paragraph.
    pub intro_journey: u64,
    /// Location description at the end of the intro.
    pub intro_look: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            first_visit: 1000,
            challenge_detail: 1000,
            cast_resolution: 1500,
            talk_options: 1000,
            dialogue_reply: 500,
            answer_verdict: 800,
            intro_journey: 3000,
            intro_look: 5000,
        }
    }
}

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base delays before speed scaling.
    pub delays: Delays,
    /// Text speed the session starts with.
    pub text_speed: TextSpeed,
    /// Override of the catalog's start location.
    pub start_location: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            delays: Delays::default(),
            text_speed: TextSpeed::Normal,
            start_location: None,
        }
    }
}

impl SessionConfig {
    /// Replace the base delays.
    pub fn with_delays(mut self, delays: Delays) -> Self {
        self.delays = delays;
        self
    }

    /// Set the initial text speed.
    pub fn with_text_speed(mut self, speed: TextSpeed) -> Self {
        self.text_speed = speed;
        self
    }

    /// Start somewhere other than the catalog's start location.
    pub fn with_start_location(mut self, location: impl Into<String>) -> Self {
        self.start_location = Some(location.into());
        self
    }
}
