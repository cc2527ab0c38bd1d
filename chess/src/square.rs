//! Board coordinates owned by the project.
//!
//! A [`Square`] is a file (`a`..`h`) and a rank (`1`..`8`). Its identity never
//! depends on which side the board is viewed from; visual placement is a
//! separate concern handled by the board widget.

use std::fmt;
use std::str::FromStr;

/// A square on the board, indexed `a1 = 0` through `h8 = 63`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Build a square from zero-based file and rank indices.
    ///
    /// # Panics
    ///
    /// Panics if `file` or `rank` is not in `0..8`.
    pub fn new(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8, "square out of range: file={file} rank={rank}");
        Self(rank * 8 + file)
    }

    /// Fallible variant of [`Square::new`].
    pub fn from_coords(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then(|| Self(rank * 8 + file))
    }

    /// Build a square from its `0..64` index.
    pub fn from_index(index: u8) -> Option<Self> {
        (index < 64).then_some(Self(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Zero-based file (`a` = 0).
    pub fn file(self) -> u8 {
        self.0 % 8
    }

    /// Zero-based rank (`1` = 0).
    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file()) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.rank()) as char
    }

    /// All 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid square: {0:?}")]
pub struct SquareParseError(pub String);

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareParseError(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase().wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::from_coords(file, rank).ok_or_else(|| SquareParseError(s.to_string()))
    }
}

/// A set of squares backed by a 64-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: Self = Self(0);

    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.index();
    }

    pub fn contains(self, square: Square) -> bool {
        self.0 & (1u64 << square.index()) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterates a [`SquareSet`] in ascending index order.
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Square(index))
    }
}
