//! Active piece module - the falling tetromino and movement legality
//!
//! A [`Tetromino`] is plain data: kind, rotation index and the top-left
//! anchor of its current shape matrix. Candidate moves are computed as new
//! values and only committed by the caller when [`can_place`] accepts them.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::pieces::{self, Shape, MINOS};
use crate::types::{Color, PieceKind};

/// Check whether `shape` anchored at (x, y) fits on the board.
///
/// Every occupied cell must lie inside the side walls and above the floor,
/// and must not overlap a settled cell. Cells above the top edge (y < 0)
/// are always permitted.
pub fn can_place(board: &Board, shape: &Shape, x: i16, y: i16) -> bool {
    shape.minos().all(|(dx, dy)| {
        let px = x + dx;
        let py = y + dy;
        if px < 0 || px >= board.width() as i16 || py >= board.height() as i16 {
            return false;
        }
        py < 0 || !board.is_occupied(px, py)
    })
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i16,
    pub y: i16,
}

impl Tetromino {
    /// Create a new tetromino at the spawn anchor for a board of `board_width`
    pub fn spawn(kind: PieceKind, board_width: u16) -> Self {
        Self {
            kind,
            rotation: 0,
            x: spawn_x(board_width),
            y: 0,
        }
    }

    /// Get the shape for the current rotation
    pub fn shape(&self) -> Shape {
        pieces::get_shape(self.kind, self.rotation)
    }

    pub fn color(&self) -> Color {
        pieces::color(self.kind)
    }

    /// Absolute board coordinates of every mino
    pub fn cells(&self) -> ArrayVec<(i16, i16), MINOS> {
        self.shape()
            .minos()
            .take(MINOS)
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Same piece shifted by (dx, dy)
    pub fn shifted(&self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece at the next rotation state, anchor unchanged
    pub fn rotated(&self) -> Self {
        Self {
            rotation: pieces::next_rotation(self.kind, self.rotation),
            ..*self
        }
    }

    /// Check if all minos fit on the board
    pub fn fits(&self, board: &Board) -> bool {
        can_place(board, &self.shape(), self.x, self.y)
    }

    /// Lowest reachable anchor row by dropping straight down
    pub fn landing_y(&self, board: &Board) -> i16 {
        let mut probe = *self;
        while probe.shifted(0, 1).fits(board) {
            probe.y += 1;
        }
        probe.y
    }
}

/// Horizontal spawn anchor: `floor(width / 2) - 1`
pub fn spawn_x(board_width: u16) -> i16 {
    (board_width / 2) as i16 - 1
}
