//! Session driver - timing, serialization, and event logging around the core
//!
//! The core [`GameState`](core::GameState) has no clock. This crate adds one:
//!
//! - [`scheduler`]: a single cancellable gravity deadline with stale-tick
//!   rejection
//! - [`session`]: the [`Session`] that owns the game and keeps the scheduler
//!   in line with the phase (running = one pending tick, otherwise none)
//! - [`driver`]: the async loop multiplexing input and ticks on one task
//!   ([`run_session`] for action-only callers), and the [`Presenter`] seam
//! - [`event_log`]: optional JSON-lines log of session events
//!
//! # Example
//!
//! ```no_run
//! use tetris_ladder_engine::{run_session, Presenter, Session};
//! use tetris_ladder_engine::core::{GameResult, GameSnapshot, GameState, SessionConfig};
//! use tetris_ladder_engine::types::{GameAction, Mode};
//!
//! struct Print;
//!
//! impl Presenter for Print {
//!     fn present(&mut self, s: &GameSnapshot) {
//!         println!("score={} level={}", s.score, s.level);
//!     }
//!     fn game_over(&mut self, r: &GameResult) {
//!         println!("final score {}", r.score);
//!     }
//! }
//!
//! # async fn demo() {
//! let (tx, rx) = tokio::sync::mpsc::channel(16);
//! let session = Session::new(GameState::new(SessionConfig::new(Mode::Easy, 1), 7));
//! tx.send(GameAction::Start).await.unwrap();
//! drop(tx);
//! let _session = run_session(session, rx, &mut Print).await;
//! # }
//! ```

pub mod driver;
pub mod event_log;
pub mod scheduler;
pub mod session;

pub use tetris_ladder_core as core;
pub use tetris_ladder_types as types;

pub use driver::{run_session, wait_for, Presenter};
pub use event_log::{EventLog, SessionEvent};
pub use scheduler::{TickScheduler, TickToken};
pub use session::Session;
