//! Translation between visual cells and board squares.
//!
//! Visual cells are `(row, col)` with `row` 0 at the top and `col` 0 at the
//! left. Flipping the board rotates it by 180°: both the rank axis and the
//! file axis invert, so with black at the bottom the top-left cell is `h1`.
//! Rendering, labels and mouse hit-testing all go through [`square_at`] and
//! [`visual_position_of`]; nothing else may derive square identity from a
//! cell.

use chess::{PieceColor, Square};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    WhiteAtBottom,
    BlackAtBottom,
}

impl Orientation {
    /// Orientation that puts `side`'s pieces nearest the bottom.
    pub fn for_side(side: PieceColor) -> Self {
        match side {
            PieceColor::White => Self::WhiteAtBottom,
            PieceColor::Black => Self::BlackAtBottom,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::WhiteAtBottom => Self::BlackAtBottom,
            Self::BlackAtBottom => Self::WhiteAtBottom,
        }
    }
}

/// Square shown at visual cell `(row, col)`.
///
/// # Panics
///
/// Panics if `row` or `col` is not in `0..8`.
pub fn square_at(row: usize, col: usize, orientation: Orientation) -> Square {
    assert!(row < 8 && col < 8, "visual cell out of range: ({row}, {col})");
    let (row, col) = (row as u8, col as u8);
    match orientation {
        Orientation::WhiteAtBottom => Square::new(col, 7 - row),
        Orientation::BlackAtBottom => Square::new(7 - col, row),
    }
}

/// Visual cell `(row, col)` at which `square` is drawn.
pub fn visual_position_of(square: Square, orientation: Orientation) -> (usize, usize) {
    let (file, rank) = (square.file() as usize, square.rank() as usize);
    match orientation {
        Orientation::WhiteAtBottom => (7 - rank, file),
        Orientation::BlackAtBottom => (rank, 7 - file),
    }
}

/// Rank label for visual row `row`, e.g. `'8'` for the top row with white at
/// the bottom.
pub fn rank_label(row: usize, orientation: Orientation) -> char {
    square_at(row, 0, orientation).rank_char()
}

/// File label for visual column `col`.
pub fn file_label(col: usize, orientation: Orientation) -> char {
    square_at(0, col, orientation).file_char()
}
