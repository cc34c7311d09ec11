//! Persistent leaderboard
//!
//! Finished games are stored as records in a single JSON array file
//! (`scores.json` by default):
//!
//! ```json
//! [
//!   {
//!     "timestamp": "2024-05-01T21:14:03.512345",
//!     "name": "kim",
//!     "mode": "Normal",
//!     "level": 3,
//!     "score": 2400,
//!     "lines": 21
//!   }
//! ]
//! ```
//!
//! - [`Leaderboard::append`] validates the name and rewrites the whole file
//! - [`Leaderboard::top_n`] ranks by score, optionally per mode
//! - a missing or damaged file loads as an empty history; single unreadable
//!   entries are skipped and kept in the file

pub mod error;
pub mod record;
pub mod store;

pub use tetris_ladder_core as core;
pub use tetris_ladder_types as types;

pub use error::LeaderboardError;
pub use record::Record;
pub use store::{Leaderboard, DEFAULT_PATH, DEFAULT_TOP_N};
