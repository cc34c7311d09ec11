//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and provides
//! the line editor used for the score-entry prompt. Independent of any
//! rendering code.

pub mod map;
pub mod name_entry;

pub use tetris_ladder_types as types;

pub use map::{handle_key_event, is_ranking_cycle, should_quit};
pub use name_entry::{NameEdit, NameEntry, NAME_MAX_CHARS};
