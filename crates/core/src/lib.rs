//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and state machine. It has **zero
//! dependencies** on timers, terminals, or files:
//!
//! - **Deterministic**: a seeded or scripted [`PieceSource`] reproduces a game
//! - **Testable**: every rule is a plain function or method call
//! - **Portable**: drive it from a terminal, a test, or a benchmark
//!
//! # Module Structure
//!
//! - [`board`]: game grid with collision queries and row clearing
//! - [`pieces`]: the seven tetromino shapes, rotation states and colors
//! - [`piece`]: the active falling piece and [`can_place`]
//! - [`rng`]: piece sources (seeded uniform random, scripted sequence)
//! - [`scoring`]: line-clear points, level progression, gravity speed
//! - [`game_state`]: phase machine, actions, gravity tick, locking
//! - [`snapshot`]: read-only copies for renderers
//!
//! # Example
//!
//! ```
//! use tetris_ladder_core::{GameState, SessionConfig};
//! use tetris_ladder_core::types::{GameAction, Mode, Phase};
//!
//! let mut game = GameState::new(SessionConfig::new(Mode::Normal, 1), 12345);
//! game.apply_action(GameAction::Start);
//! assert_eq!(game.phase(), Phase::Running);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//! assert_eq!(game.board().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! Gravity is one row per [`GameState::tick`]. The caller owns the clock and
//! ticks once per [`GameState::drop_interval`] while the phase is running.

pub mod board;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_ladder_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameResult, GameState, LockEvent, SessionConfig, TickOutcome};
pub use piece::{can_place, Tetromino};
pub use pieces::{get_shape, Shape};
pub use rng::{PieceSource, RandomPieces, SequencePieces, SimpleRng};
pub use scoring::{Progress, ScoreResult};
pub use snapshot::{GameSnapshot, PieceSnapshot};
