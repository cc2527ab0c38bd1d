//! The authoritative position shown by the board.
//!
//! [`PositionState`] holds no chess knowledge: every query goes through the
//! injected [`RulesOracle`]. The held position is only ever replaced whole,
//! and only by one the oracle parsed or produced.

use std::borrow::Cow;

use chess::{FenError, Piece, PieceColor, PieceKind, RulesOracle, Square, SquareSet};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Which pieces a click may pick up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnGating {
    /// Only pieces of the side to move (live play).
    #[default]
    SideToMove,
    /// Any piece, whoever is to move (local practice).
    AnyPiece,
}

/// A successfully applied local move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Standard short-form notation, e.g. `Nf3`, `O-O`, `e8=Q`.
    pub notation: String,
    /// Position after the move.
    pub fen: String,
    /// Piece promoted to, if the move promoted.
    pub promotion: Option<PieceKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("Position rejected: {0}")]
    Parse(#[from] FenError),
    #[error("Illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },
}

pub struct PositionState<O: RulesOracle> {
    oracle: O,
    position: O::Position,
    fen: String,
}

impl<O: RulesOracle> PositionState<O> {
    pub fn new(oracle: O, fen: &str) -> Result<Self, PositionError> {
        let position = oracle.parse(fen)?;
        let fen = oracle.to_fen(&position);
        Ok(Self {
            oracle,
            position,
            fen,
        })
    }

    /// Replace the position. On failure the previous position is kept.
    pub fn load(&mut self, fen: &str) -> Result<(), PositionError> {
        match self.oracle.parse(fen) {
            Ok(position) => {
                self.fen = self.oracle.to_fen(&position);
                self.position = position;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unparseable position, keeping last good one");
                Err(e.into())
            }
        }
    }

    /// Current position as FEN.
    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.oracle.piece_at(&self.position, square)
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.oracle.side_to_move(&self.position)
    }

    /// Whether a click may pick up the piece on `square` under `gating`.
    pub fn is_movable(&self, square: Square, gating: TurnGating) -> bool {
        match self.piece_at(square) {
            None => false,
            Some(piece) => gating == TurnGating::AnyPiece || piece.color == self.side_to_move(),
        }
    }

    /// Squares the piece on `square` may move to. Empty if there is no piece
    /// or, under [`TurnGating::SideToMove`], if it belongs to the side not to
    /// move.
    pub fn legal_destinations(&self, square: Square, gating: TurnGating) -> SquareSet {
        match self.position_for(square, gating) {
            Some(position) => self
                .oracle
                .legal_moves_from(&position, square)
                .into_iter()
                .map(|mv| mv.to)
                .collect(),
            None => SquareSet::EMPTY,
        }
    }

    /// Apply `from → to`. A promotion without an explicit choice promotes to
    /// a queen. On error the position is unchanged.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
        gating: TurnGating,
    ) -> Result<MoveResult, PositionError> {
        let illegal = PositionError::IllegalMove { from, to };
        let base = self.position_for(from, gating).ok_or(illegal.clone())?;

        let candidates: Vec<_> = self
            .oracle
            .legal_moves_from(&base, from)
            .into_iter()
            .filter(|mv| mv.to == to)
            .collect();
        let is_promotion = candidates.iter().any(|mv| mv.promotion.is_some());
        let wanted = if is_promotion {
            Some(promotion.unwrap_or(PieceKind::Queen))
        } else {
            None
        };
        let mv = candidates
            .into_iter()
            .find(|mv| mv.promotion == wanted)
            .ok_or(illegal.clone())?;

        let applied = self.oracle.apply(&base, mv).map_err(|e| {
            tracing::warn!(error = %e, "Oracle rejected move");
            illegal
        })?;
        drop(base);

        self.fen = self.oracle.to_fen(&applied.position);
        self.position = applied.position;
        tracing::info!(notation = %applied.san, fen = %self.fen, "Applied local move");
        Ok(MoveResult {
            notation: applied.san,
            fen: self.fen.clone(),
            promotion: mv.promotion,
        })
    }

    /// The position legal moves of the piece on `square` are computed in:
    /// the current one, or under [`TurnGating::AnyPiece`] the current one
    /// with the piece's side to move.
    fn position_for(&self, square: Square, gating: TurnGating) -> Option<Cow<'_, O::Position>> {
        let piece = self.piece_at(square)?;
        if piece.color == self.side_to_move() {
            return Some(Cow::Borrowed(&self.position));
        }
        match gating {
            TurnGating::SideToMove => None,
            TurnGating::AnyPiece => self
                .oracle
                .with_side_to_move(&self.position, piece.color)
                .map(Cow::Owned),
        }
    }
}
