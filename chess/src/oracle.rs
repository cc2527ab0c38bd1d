//! The rules oracle: every legality question the board asks goes through here.
//!
//! [`RulesOracle`] is the seam between the board widget and whatever chess
//! rules implementation backs it. [`CozyOracle`] is the production
//! implementation over `cozy_chess::Board`.

use cozy_chess::{Board, Move, Piece as CozyPiece};

use crate::converters::{from_cozy_square, to_cozy_square};
use crate::fen::{self, FenError};
use crate::san::format_san;
use crate::square::Square;
use crate::types::{Piece, PieceColor, PieceKind};

/// A legal move as the board sees it.
///
/// Castling is always expressed by the king's destination (`e1g1`), so a
/// destination never coincides with one of the mover's own pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegalMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

/// Result of applying a move: the successor position and the move's SAN.
#[derive(Debug, Clone)]
pub struct AppliedMove<P> {
    pub position: P,
    pub san: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("Illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },
}

/// Parse, query and apply operations over FEN positions.
pub trait RulesOracle {
    type Position: Clone;

    fn parse(&self, fen: &str) -> Result<Self::Position, FenError>;

    fn to_fen(&self, position: &Self::Position) -> String;

    fn piece_at(&self, position: &Self::Position, square: Square) -> Option<Piece>;

    fn side_to_move(&self, position: &Self::Position) -> PieceColor;

    /// Legal moves of the side to move that start on `from`.
    fn legal_moves_from(&self, position: &Self::Position, from: Square) -> Vec<LegalMove>;

    fn apply(
        &self,
        position: &Self::Position,
        mv: LegalMove,
    ) -> Result<AppliedMove<Self::Position>, OracleError>;

    /// The same placement with `color` to move, or `None` if that position is
    /// not valid (for instance because the side not to move would be in check).
    fn with_side_to_move(&self, position: &Self::Position, color: PieceColor)
        -> Option<Self::Position>;
}

/// [`RulesOracle`] backed by cozy-chess.
#[derive(Debug, Clone, Copy, Default)]
pub struct CozyOracle;

impl CozyOracle {
    pub fn new() -> Self {
        Self
    }

    fn raw_moves_from(board: &Board, from: Square) -> Vec<Move> {
        let from = to_cozy_square(from);
        let mut moves = Vec::new();
        board.generate_moves(|mvs| {
            if mvs.from == from {
                moves.extend(mvs);
            }
            false
        });
        moves
    }

    /// cozy-chess encodes castling as the king capturing its own rook.
    fn is_castling(board: &Board, mv: Move) -> bool {
        board.piece_on(mv.from) == Some(CozyPiece::King)
            && board.colors(board.side_to_move()).has(mv.to)
    }

    fn to_legal_move(board: &Board, mv: Move) -> LegalMove {
        let from = from_cozy_square(mv.from);
        let mut to = from_cozy_square(mv.to);
        if Self::is_castling(board, mv) {
            let king_file = if to.file() > from.file() { 6 } else { 2 };
            to = Square::new(king_file, from.rank());
        }
        LegalMove {
            from,
            to,
            promotion: mv.promotion.map(PieceKind::from),
        }
    }
}

impl RulesOracle for CozyOracle {
    type Position = Board;

    fn parse(&self, fen: &str) -> Result<Board, FenError> {
        let normalized = fen::normalize_fen(fen)?;
        normalized.parse::<Board>().map_err(|e| FenError::Invalid {
            fen: normalized.clone(),
            reason: format!("{:?}", e),
        })
    }

    fn to_fen(&self, position: &Board) -> String {
        position.to_string()
    }

    fn piece_at(&self, position: &Board, square: Square) -> Option<Piece> {
        let square = to_cozy_square(square);
        let kind = position.piece_on(square)?;
        let color = position.color_on(square)?;
        Some(Piece::new(kind.into(), color.into()))
    }

    fn side_to_move(&self, position: &Board) -> PieceColor {
        position.side_to_move().into()
    }

    fn legal_moves_from(&self, position: &Board, from: Square) -> Vec<LegalMove> {
        Self::raw_moves_from(position, from)
            .into_iter()
            .map(|mv| Self::to_legal_move(position, mv))
            .collect()
    }

    fn apply(&self, position: &Board, mv: LegalMove) -> Result<AppliedMove<Board>, OracleError> {
        let raw = Self::raw_moves_from(position, mv.from)
            .into_iter()
            .find(|candidate| Self::to_legal_move(position, *candidate) == mv)
            .ok_or(OracleError::IllegalMove {
                from: mv.from,
                to: mv.to,
            })?;

        let san = format_san(position, raw);
        let mut next = position.clone();
        next.play_unchecked(raw);
        tracing::debug!(%san, fen = %next, "Oracle applied move");
        Ok(AppliedMove {
            position: next,
            san,
        })
    }

    fn with_side_to_move(&self, position: &Board, color: PieceColor) -> Option<Board> {
        if self.side_to_move(position) == color {
            return Some(position.clone());
        }
        let swapped = fen::with_side_to_move(&position.to_string(), color).ok()?;
        self.parse(&swapped).ok()
    }
}
