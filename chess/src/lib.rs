//! Chess domain layer for the board widget.
//!
//! Owns the project's coordinate and piece types and the [`RulesOracle`]
//! capability the widget consults for every legality question. cozy-chess is
//! an implementation detail behind [`CozyOracle`].

mod converters;
pub mod fen;
pub mod oracle;
mod san;
pub mod square;
pub mod types;

pub use fen::FenError;
pub use oracle::{AppliedMove, CozyOracle, LegalMove, OracleError, RulesOracle};
pub use square::{Square, SquareParseError, SquareSet};
pub use types::{Piece, PieceColor, PieceKind};
