//! Tetris Ladder (workspace facade crate).
//!
//! The game lives in dedicated crates under `crates/`; this package
//! re-exports them as `tetris_ladder::{core,engine,input,leaderboard,term,types}`
//! and owns the binary's configuration.

pub mod config;

pub use tetris_ladder_core as core;
pub use tetris_ladder_engine as engine;
pub use tetris_ladder_input as input;
pub use tetris_ladder_leaderboard as leaderboard;
pub use tetris_ladder_term as term;
pub use tetris_ladder_types as types;
