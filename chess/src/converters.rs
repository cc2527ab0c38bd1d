//! Conversions between project coordinates and cozy-chess coordinates.

use crate::square::Square;

pub(crate) fn to_cozy_square(square: Square) -> cozy_chess::Square {
    cozy_chess::Square::new(
        cozy_chess::File::index(square.file() as usize),
        cozy_chess::Rank::index(square.rank() as usize),
    )
}

pub(crate) fn from_cozy_square(square: cozy_chess::Square) -> Square {
    Square::new(square.file() as u8, square.rank() as u8)
}
