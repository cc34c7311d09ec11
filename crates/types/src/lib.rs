//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! Everything here is plain data, usable from the engine, the leaderboard,
//! and the terminal front-end alike.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (a session may pick others at construction):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn anchor**: (`width / 2 - 1`, 0), rotation 0
//!
//! # Speed and Progression
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LINES_PER_LEVEL` | 10 | Cleared lines needed per level step |
//! | `POINTS_PER_LINE` | 100 | Multiplied by lines cleared and the current level |
//! | `SPEEDUP_PER_LEVEL_MS` | 50 | Drop interval reduction per level gained |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Floor for the drop interval |
//!
//! Base drop interval per [`Mode`]:
//!
//! | Mode | Interval |
//! |------|----------|
//! | Easy | 800ms |
//! | Normal | 500ms |
//! | Hard | 300ms |
//!
//! # Examples
//!
//! ```
//! use tetris_ladder_types::{GameAction, Mode, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(Mode::from_str("hard"), Some(Mode::Hard));
//! assert_eq!(Mode::Hard.base_drop_ms(), 300);
//!
//! assert!(GameAction::HardDrop.is_movement());
//! assert_eq!(PieceKind::ALL.len(), 7);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u16 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u16 = 20;

/// Lowest selectable starting level
pub const MIN_START_LEVEL: u32 = 1;

/// Highest selectable starting level
pub const MAX_START_LEVEL: u32 = 30;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Base points per cleared line (multiplied by the level)
pub const POINTS_PER_LINE: u32 = 100;

/// Drop interval reduction per level above the starting level
pub const SPEEDUP_PER_LEVEL_MS: u32 = 50;

/// Absolute minimum drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Difficulty mode, fixed for the whole session.
///
/// Serialized with the capitalized names used by the leaderboard file
/// (`"Easy"`, `"Normal"`, `"Hard"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Easy, Mode::Normal, Mode::Hard];

    /// Drop interval at the starting level, in milliseconds.
    pub fn base_drop_ms(&self) -> u32 {
        match self {
            Mode::Easy => 800,
            Mode::Normal => 500,
            Mode::Hard => 300,
        }
    }

    /// Parse mode from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_ladder_types::Mode;
    ///
    /// assert_eq!(Mode::from_str("Easy"), Some(Mode::Easy));
    /// assert_eq!(Mode::from_str("NORMAL"), Some(Mode::Normal));
    /// assert_eq!(Mode::from_str("insane"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Mode::Easy),
            "normal" => Some(Mode::Normal),
            "hard" => Some(Mode::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Easy => "Easy",
            Mode::Normal => "Normal",
            Mode::Hard => "Hard",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven tetromino piece kinds, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];
}

/// 24-bit color identifier stored in settled board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Settled block of that color
///
/// Occupancy is simply `cell.is_some()`.
pub type Cell = Option<Color>;

/// Lifecycle phase of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Board is empty and no piece has spawned yet.
    #[default]
    Idle,
    Running,
    Paused,
    /// Terminal until `Restart`.
    GameOver,
}

/// Input events the engine accepts.
///
/// Each is a payload-free signal; the presentation layer decides which
/// device gesture produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (never locks)
    SoftDrop,
    /// Advance to the next rotation state
    RotateCw,
    /// Drop to the lowest legal row and lock immediately
    HardDrop,
    /// Toggle between running and paused
    Pause,
    /// Begin a game from idle, or resume from pause
    Start,
    /// Discard the session and return to idle with a fresh board
    Restart,
}

impl GameAction {
    /// True for the actions that move or rotate the active piece.
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft
                | GameAction::MoveRight
                | GameAction::SoftDrop
                | GameAction::RotateCw
                | GameAction::HardDrop
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_base_speeds() {
        assert_eq!(Mode::Easy.base_drop_ms(), 800);
        assert_eq!(Mode::Normal.base_drop_ms(), 500);
        assert_eq!(Mode::Hard.base_drop_ms(), 300);
    }

    #[test]
    fn mode_serializes_with_capitalized_names() {
        assert_eq!(serde_json::to_string(&Mode::Easy).unwrap(), "\"Easy\"");
        let m: Mode = serde_json::from_str("\"Hard\"").unwrap();
        assert_eq!(m, Mode::Hard);
        assert!(serde_json::from_str::<Mode>("\"hard\"").is_err());
    }


    #[test]
    fn progression_constants() {
        assert_eq!(LINES_PER_LEVEL, 10);
        assert_eq!(POINTS_PER_LINE, 100);
        assert_eq!(SPEEDUP_PER_LEVEL_MS, 50);
        assert_eq!(DROP_INTERVAL_MIN_MS, 100);
        assert_eq!((MIN_START_LEVEL, MAX_START_LEVEL), (1, 30));
    }
}
