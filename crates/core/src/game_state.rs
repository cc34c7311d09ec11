//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, piece
//! source, and scoring. It owns the phase machine (idle, running, paused,
//! game over), applies input actions, advances gravity one row per tick, and
//! handles locking, line clears, and game-over detection.
//!
//! Timing lives outside: callers invoke [`GameState::tick`] once per
//! [`GameState::drop_interval`] while the game is running.

use std::time::Duration;

use crate::board::Board;
use crate::piece::Tetromino;
use crate::rng::{PieceSource, RandomPieces};
use crate::scoring::Progress;
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::*;

/// Session settings, fixed for the lifetime of a [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: Mode,
    pub start_level: u32,
    pub width: u16,
    pub height: u16,
}

impl SessionConfig {
    /// `start_level` is clamped into the selectable range.
    pub fn new(mode: Mode, start_level: u32) -> Self {
        Self {
            mode,
            start_level: start_level.clamp(MIN_START_LEVEL, MAX_START_LEVEL),
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
        }
    }

    /// Boards smaller than 4x4 cannot hold every piece; sizes are raised to that.
    pub fn with_board_size(mut self, width: u16, height: u16) -> Self {
        self.width = width.max(4);
        self.height = height.max(4);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(Mode::Normal, MIN_START_LEVEL)
    }
}

/// Final totals exposed once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub mode: Mode,
}

/// Emitted after a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub cleared: u32,
    pub score_gained: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub level_changed: bool,
    pub game_over: bool,
}

/// Result of one gravity tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing happened.
    Idle,
    /// The active piece moved down one row.
    Moved,
    Locked(LockEvent),
}

/// Complete game state
pub struct GameState {
    config: SessionConfig,
    board: Board,
    active: Option<Tetromino>,
    next: Option<PieceKind>,
    source: Box<dyn PieceSource>,
    progress: Progress,
    phase: Phase,
    /// Last lock event (consumed by observers).
    last_lock: Option<LockEvent>,
    result: Option<GameResult>,
    /// Monotonic id for spawned pieces.
    piece_id: u32,
}

impl GameState {
    /// Create a new game drawing uniformly random pieces from `seed`
    pub fn new(config: SessionConfig, seed: u32) -> Self {
        Self::with_source(config, Box::new(RandomPieces::new(seed)))
    }

    pub fn with_source(config: SessionConfig, source: Box<dyn PieceSource>) -> Self {
        let board = Board::with_size(config.width, config.height);
        Self::with_board(config, board, source)
    }

    /// Start from a prepared board; its dimensions override the config's.
    pub fn with_board(
        mut config: SessionConfig,
        board: Board,
        source: Box<dyn PieceSource>,
    ) -> Self {
        config.width = board.width();
        config.height = board.height();
        Self {
            config,
            board,
            active: None,
            next: None,
            source,
            progress: Progress::new(config.start_level),
            phase: Phase::Idle,
            last_lock: None,
            result: None,
            piece_id: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn next(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Final totals, present only after the game is over.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Current gravity interval
    pub fn drop_interval(&self) -> Duration {
        self.progress.drop_interval(self.config.mode)
    }

    /// Take and clear the last lock event.
    pub fn take_last_lock(&mut self) -> Option<LockEvent> {
        self.last_lock.take()
    }

    /// Landing row of the active piece
    pub fn ghost_y(&self) -> Option<i16> {
        self.active.map(|piece| piece.landing_y(&self.board))
    }

    /// Begin from idle, or resume from pause.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Running;
                self.next = Some(self.source.next_kind());
                self.spawn_next();
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                true
            }
            Phase::Running | Phase::GameOver => false,
        }
    }

    /// Toggle running/paused. No effect before start or after game over.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                true
            }
            Phase::Idle | Phase::GameOver => false,
        }
    }

    /// Discard the session: fresh board and totals, back to idle.
    pub fn restart(&mut self) {
        self.board = Board::with_size(self.config.width, self.config.height);
        self.active = None;
        self.next = None;
        self.progress = Progress::new(self.config.start_level);
        self.phase = Phase::Idle;
        self.last_lock = None;
        self.result = None;
    }

    /// Promote the next piece to active and draw a new next piece.
    ///
    /// Returns false (and ends the game) when the promoted piece does not fit.
    fn spawn_next(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.source.next_kind(),
        };
        let piece = Tetromino::spawn(kind, self.board.width());
        self.active = Some(piece);
        self.next = Some(self.source.next_kind());
        self.piece_id = self.piece_id.wrapping_add(1);

        if !piece.fits(&self.board) {
            self.end_game();
            return false;
        }
        true
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        self.result = Some(GameResult {
            score: self.progress.score,
            level: self.progress.level,
            lines: self.progress.lines,
            mode: self.config.mode,
        });
    }

    /// Try to move the active piece; a blocked move changes nothing.
    pub(crate) fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.shifted(dx, dy);
        if candidate.fits(&self.board) {
            self.active = Some(candidate);
            return true;
        }
        false
    }

    /// Try to advance the rotation state in place (no wall kicks)
    pub(crate) fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.rotated();
        if candidate == active {
            return false;
        }
        if candidate.fits(&self.board) {
            self.active = Some(candidate);
            return true;
        }
        false
    }

    /// Drop to the landing row and lock immediately
    pub(crate) fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let landing = active.landing_y(&self.board);
        self.active = Some(Tetromino {
            y: landing,
            ..active
        });
        self.lock_piece();
        true
    }

    /// Lock the active piece onto the board, clear rows, score, and spawn
    fn lock_piece(&mut self) -> Option<LockEvent> {
        let active = self.active.take()?;

        self.board
            .settle(&active.shape(), active.x, active.y, active.color());

        let cleared = self.board.clear_full_rows() as u32;
        let result = self.progress.record_clear(cleared);

        let spawned = self.spawn_next();

        let event = LockEvent {
            cleared,
            score_gained: result.gained,
            score: self.progress.score,
            level: self.progress.level,
            lines: self.progress.lines,
            level_changed: result.level_changed,
            game_over: !spawned,
        };
        self.last_lock = Some(event);
        Some(event)
    }

    /// One gravity step: move down a row, or lock when blocked.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Idle;
        }

        if self.try_move(0, 1) {
            return TickOutcome::Moved;
        }

        match self.lock_piece() {
            Some(event) => TickOutcome::Locked(event),
            None => TickOutcome::Idle,
        }
    }

    /// Apply a game action, returning whether anything changed.
    ///
    /// Movement is only honored while running.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if action.is_movement() && self.phase != Phase::Running {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::RotateCw => self.try_rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Start => self.start(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.active = self.active.map(PieceSnapshot::from);
        out.ghost_y = if self.phase == Phase::GameOver {
            None
        } else {
            self.ghost_y()
        };
        out.next = self.next.map(PieceSnapshot::preview);
        out.phase = self.phase;
        out.mode = self.config.mode;
        out.start_level = self.config.start_level;
        out.score = self.progress.score;
        out.level = self.progress.level;
        out.lines = self.progress.lines;
        out.drop_interval_ms = self.drop_interval().as_millis() as u32;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(SessionConfig::default(), 1)
    }
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("active", &self.active)
            .field("next", &self.next)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}
