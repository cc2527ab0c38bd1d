//! FEN handling shared by every oracle implementation.
//!
//! Positions arrive either as full six-field FEN or as the four-field
//! serialization (placement, turn, castling, en passant) used by the game
//! server; both are normalized to six fields before parsing.

use crate::types::PieceColor;

/// Normalize a position string to six-field FEN.
pub fn normalize_fen(fen: &str) -> Result<String, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    match fields.len() {
        0 => Err(FenError::Empty),
        4 => Ok(format!("{} 0 1", fields.join(" "))),
        6 => Ok(fields.join(" ")),
        n => Err(FenError::FieldCount(n)),
    }
}

/// Rewrite the active colour of a FEN string, clearing the en passant field.
pub fn with_side_to_move(fen: &str, color: PieceColor) -> Result<String, FenError> {
    let normalized = normalize_fen(fen)?;
    let mut fields: Vec<String> = normalized.split(' ').map(str::to_string).collect();
    fields[1] = color.fen_char().to_string();
    fields[3] = "-".to_string();
    Ok(fields.join(" "))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("Empty FEN string")]
    Empty,
    #[error("Expected 4 or 6 FEN fields, found {0}")]
    FieldCount(usize),
    #[error("Invalid FEN '{fen}': {reason}")]
    Invalid { fen: String, reason: String },
}
