use arrayvec::ArrayVec;

use crate::pieces::{self, Shape, MINOS};
use crate::piece::Tetromino;
use crate::types::{Cell, Color, Mode, Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i16,
    pub y: i16,
    pub color: Color,
    pub shape: Shape,
}

impl PieceSnapshot {
    /// Preview of a not-yet-placed piece: rotation 0, anchor at the origin.
    pub fn preview(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: 0,
            y: 0,
            color: pieces::color(kind),
            shape: pieces::get_shape(kind, 0),
        }
    }

    /// Absolute board coordinates of every mino
    pub fn cells(&self) -> ArrayVec<(i16, i16), MINOS> {
        self.shape
            .minos()
            .take(MINOS)
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }
}

impl From<Tetromino> for PieceSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            color: value.color(),
            shape: value.shape(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major settled cells
    pub board: Vec<Cell>,
    pub active: Option<PieceSnapshot>,
    pub ghost_y: Option<i16>,
    pub next: Option<PieceSnapshot>,
    pub phase: Phase,
    pub mode: Mode,
    pub start_level: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = BOARD_WIDTH;
        self.height = BOARD_HEIGHT;
        self.board.clear();
        self.board
            .resize(BOARD_WIDTH as usize * BOARD_HEIGHT as usize, None);
        self.active = None;
        self.ghost_y = None;
        self.next = None;
        self.phase = Phase::Idle;
        self.mode = Mode::default();
        self.start_level = 1;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = 0;
    }

    pub fn cell(&self, x: u16, y: u16) -> Cell {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.board[y as usize * self.width as usize + x as usize]
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            width: 0,
            height: 0,
            board: Vec::new(),
            active: None,
            ghost_y: None,
            next: None,
            phase: Phase::Idle,
            mode: Mode::default(),
            start_level: 1,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
        };
        s.clear();
        s
    }
}
