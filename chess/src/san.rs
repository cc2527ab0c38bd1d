use cozy_chess::{Board, GameStatus, Move, Piece};

use crate::converters::from_cozy_square;
use crate::types::PieceKind;

/// Format a legal move as Standard Algebraic Notation.
///
/// `mv` must be in cozy-chess form, i.e. castling is encoded as the king
/// moving onto its own rook.
pub(crate) fn format_san(board: &Board, mv: Move) -> String {
    let mover = board.side_to_move();
    let piece = match board.piece_on(mv.from) {
        Some(piece) => piece,
        None => return format!("{}{}", from_cozy_square(mv.from), from_cozy_square(mv.to)),
    };

    let mut san = if piece == Piece::King && board.colors(mover).has(mv.to) {
        if (mv.to.file() as u8) > (mv.from.file() as u8) {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        }
    } else {
        format_body(board, mv, piece)
    };

    let mut after = board.clone();
    after.play_unchecked(mv);
    if after.status() == GameStatus::Won {
        san.push('#');
    } else if !after.checkers().is_empty() {
        san.push('+');
    }
    san
}

fn format_body(board: &Board, mv: Move, piece: Piece) -> String {
    let from = from_cozy_square(mv.from);
    let to = from_cozy_square(mv.to);
    let opponent = !board.side_to_move();
    // A pawn changing file onto an empty square is an en passant capture.
    let is_capture =
        board.colors(opponent).has(mv.to) || (piece == Piece::Pawn && from.file() != to.file());

    let mut san = String::new();
    if piece == Piece::Pawn {
        if is_capture {
            san.push(from.file_char());
        }
    } else {
        san.push(PieceKind::from(piece).to_char_upper());
        san.push_str(&disambiguation(board, mv, piece));
    }
    if is_capture {
        san.push('x');
    }
    san.push_str(&to.to_string());
    if let Some(promotion) = mv.promotion {
        san.push('=');
        san.push(PieceKind::from(promotion).to_char_upper());
    }
    san
}

fn disambiguation(board: &Board, mv: Move, piece: Piece) -> String {
    let mut rivals = Vec::new();
    board.generate_moves(|moves| {
        if moves.piece == piece && moves.from != mv.from && moves.to.has(mv.to) {
            rivals.push(moves.from);
        }
        false
    });

    if rivals.is_empty() {
        return String::new();
    }

    let from = from_cozy_square(mv.from);
    let shares_file = rivals.iter().any(|sq| sq.file() == mv.from.file());
    let shares_rank = rivals.iter().any(|sq| sq.rank() == mv.from.rank());
    match (shares_file, shares_rank) {
        (false, _) => from.file_char().to_string(),
        (true, false) => from.rank_char().to_string(),
        (true, true) => from.to_string(),
    }
}
