//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is diffed and flushed to the terminal.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: board, next piece, stats, ranking panel, phase overlays
//! - [`renderer`]: crossterm output with changed-run diffing
//! - [`table`]: plain-text ranking table for non-interactive output

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod table;

pub use tetris_ladder_core as core;
pub use tetris_ladder_leaderboard as leaderboard;
pub use tetris_ladder_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, NamePrompt, Panels, RankingPanel, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use table::ranking_table;
