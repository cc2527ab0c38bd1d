//! Helpers shared by the integration tests.

#![allow(dead_code)]

use chess::{
    AppliedMove, CozyOracle, FenError, LegalMove, OracleError, Piece, PieceColor, RulesOracle,
    Square,
};

pub fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

/// Delegates to cozy-chess but refuses to apply any move, as an oracle
/// backed by a remote authority might.
#[derive(Clone, Copy, Default)]
pub struct RefusingOracle(CozyOracle);

impl RulesOracle for RefusingOracle {
    type Position = <CozyOracle as RulesOracle>::Position;

    fn parse(&self, fen: &str) -> Result<Self::Position, FenError> {
        self.0.parse(fen)
    }

    fn to_fen(&self, position: &Self::Position) -> String {
        self.0.to_fen(position)
    }

    fn piece_at(&self, position: &Self::Position, square: Square) -> Option<Piece> {
        self.0.piece_at(position, square)
    }

    fn side_to_move(&self, position: &Self::Position) -> PieceColor {
        self.0.side_to_move(position)
    }

    fn legal_moves_from(&self, position: &Self::Position, from: Square) -> Vec<LegalMove> {
        self.0.legal_moves_from(position, from)
    }

    fn apply(
        &self,
        _position: &Self::Position,
        mv: LegalMove,
    ) -> Result<AppliedMove<Self::Position>, OracleError> {
        Err(OracleError::IllegalMove {
            from: mv.from,
            to: mv.to,
        })
    }

    fn with_side_to_move(
        &self,
        position: &Self::Position,
        color: PieceColor,
    ) -> Option<Self::Position> {
        self.0.with_side_to_move(position, color)
    }
}
