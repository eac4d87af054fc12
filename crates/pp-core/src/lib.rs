//! Core types for The Pythonic Path: the content catalog, game state, and
//! the reducer that moves one state to the next.
//!
//! This crate knows nothing about text commands or message logs. A front end
//! loads a [`Catalog`], creates a [`GameState`], and feeds [`Action`]s through
//! [`reduce`].

/// State transitions and the reducer.
pub mod action;
/// Static content: locations, challenges, NPCs, concepts, spells.
pub mod catalog;
/// Error types for catalog loading.
pub mod error;
/// Player, inventory, progress and settings.
pub mod state;

/// Re-export the reducer and its actions.
pub use action::{Action, Setting, reduce};
/// Re-export the catalog.
pub use catalog::Catalog;
/// Re-export error types.
pub use error::{CatalogError, CatalogResult};
/// Re-export state types.
pub use state::{GameProgress, GameStage, GameState, HelpMode, Settings, TextSpeed};
