//! Pieces module - tetromino catalog
//!
//! Static rotation states and colors for the seven tetrominoes. Each rotation
//! state is a small 0/1 matrix anchored at its top-left corner; rotating a
//! piece swaps the matrix and keeps the anchor (no wall kicks).

use crate::types::{Color, PieceKind};

/// Offset of a single mino relative to the piece anchor (column, row)
pub type MinoOffset = (i16, i16);

/// Number of minos in every catalog shape
pub const MINOS: usize = 4;

/// One rotation state: an immutable occupancy matrix, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    rows: &'static [&'static [u8]],
}

impl Shape {
    pub const fn new(rows: &'static [&'static [u8]]) -> Self {
        Self { rows }
    }

    pub fn width(&self) -> u16 {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0) as u16
    }

    pub fn height(&self) -> u16 {
        self.rows.len() as u16
    }

    /// Out-of-matrix positions read as empty.
    pub fn is_filled(&self, col: u16, row: u16) -> bool {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .is_some_and(|&v| v != 0)
    }

    /// Occupied offsets in row-major order.
    pub fn minos(&self) -> impl Iterator<Item = MinoOffset> + '_ {
        self.rows.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0)
                .map(move |(dx, _)| (dx as i16, dy as i16))
        })
    }
}

const I_STATES: [Shape; 2] = [
    Shape::new(&[&[1, 1, 1, 1]]),
    Shape::new(&[&[1], &[1], &[1], &[1]]),
];

const O_STATES: [Shape; 1] = [Shape::new(&[&[1, 1], &[1, 1]])];

const T_STATES: [Shape; 4] = [
    Shape::new(&[&[0, 1, 0], &[1, 1, 1]]),
    Shape::new(&[&[1, 0], &[1, 1], &[1, 0]]),
    Shape::new(&[&[1, 1, 1], &[0, 1, 0]]),
    Shape::new(&[&[0, 1], &[1, 1], &[0, 1]]),
];

const S_STATES: [Shape; 2] = [
    Shape::new(&[&[0, 1, 1], &[1, 1, 0]]),
    Shape::new(&[&[1, 0], &[1, 1], &[0, 1]]),
];

const Z_STATES: [Shape; 2] = [
    Shape::new(&[&[1, 1, 0], &[0, 1, 1]]),
    Shape::new(&[&[0, 1], &[1, 1], &[1, 0]]),
];

const J_STATES: [Shape; 4] = [
    Shape::new(&[&[1, 0, 0], &[1, 1, 1]]),
    Shape::new(&[&[1, 1], &[1, 0], &[1, 0]]),
    Shape::new(&[&[1, 1, 1], &[0, 0, 1]]),
    Shape::new(&[&[0, 1], &[0, 1], &[1, 1]]),
];

const L_STATES: [Shape; 4] = [
    Shape::new(&[&[0, 0, 1], &[1, 1, 1]]),
    Shape::new(&[&[1, 0], &[1, 0], &[1, 1]]),
    Shape::new(&[&[1, 1, 1], &[1, 0, 0]]),
    Shape::new(&[&[1, 1], &[0, 1], &[0, 1]]),
];

/// All rotation states for a piece kind, in clockwise order.
pub fn rotation_states(kind: PieceKind) -> &'static [Shape] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
    }
}

/// Number of distinct rotation states (1, 2 or 4).
pub fn rotation_count(kind: PieceKind) -> u8 {
    rotation_states(kind).len() as u8
}

/// Shape for a rotation index; the index wraps modulo the state count.
pub fn get_shape(kind: PieceKind, rotation: u8) -> Shape {
    let states = rotation_states(kind);
    states[rotation as usize % states.len()]
}

/// Rotation index after one clockwise step.
pub fn next_rotation(kind: PieceKind, rotation: u8) -> u8 {
    (rotation + 1) % rotation_count(kind)
}

/// Render color for a piece kind.
pub fn color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::rgb(0, 0, 255),
        PieceKind::O => Color::rgb(0, 255, 0),
        PieceKind::T => Color::rgb(255, 0, 0),
        PieceKind::S => Color::rgb(255, 255, 0),
        PieceKind::Z => Color::rgb(255, 0, 255),
        PieceKind::J => Color::rgb(0, 255, 255),
        PieceKind::L => Color::rgb(255, 165, 0),
    }
}
