//! Click/hover handling for the board.
//!
//! Transition table for a click on `square` (first matching row wins):
//!
//! | state           | click                               | result                    |
//! |-----------------|-------------------------------------|---------------------------|
//! | any             | input disabled                      | ignored                   |
//! | `Idle`          | movable piece                       | `PieceSelected(square)`   |
//! | `Idle`          | anything else                       | `Idle`                    |
//! | `PieceSelected` | the selected square                 | `Idle` (toggle off)       |
//! | `PieceSelected` | a legal destination                 | apply move, `Idle`        |
//! | `PieceSelected` | another movable piece               | `PieceSelected(square)`   |
//! | `PieceSelected` | anything else                       | `Idle`                    |
//!
//! A position supplied from outside always returns the board to `Idle`.

use chess::{PieceKind, RulesOracle, Square};

use super::position::{MoveResult, PositionError, PositionState, TurnGating};
use super::selection::{InteractionPhase, SelectionState, SquareHighlight};

/// Per-deployment board behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Only the side to move may pick up pieces. Disable for local practice.
    pub enforce_turn_ownership: bool,
}

impl BoardConfig {
    pub fn gating(self) -> TurnGating {
        if self.enforce_turn_ownership {
            TurnGating::SideToMove
        } else {
            TurnGating::AnyPiece
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            enforce_turn_ownership: true,
        }
    }
}

/// What a click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Input was disabled; nothing changed.
    Ignored,
    /// Idle click on a square without a movable piece.
    NoOp,
    Selected(Square),
    Deselected,
    /// Selection dropped by clicking elsewhere.
    Cleared,
    Moved(MoveResult),
    /// The oracle refused the move; position unchanged.
    Rejected(PositionError),
}

type MoveCallback = Box<dyn FnMut(&str)>;

pub struct BoardController<O: RulesOracle> {
    position: PositionState<O>,
    selection: SelectionState,
    config: BoardConfig,
    promotion_choice: Option<PieceKind>,
    notice: Option<String>,
    on_move: Option<MoveCallback>,
}

impl<O: RulesOracle> BoardController<O> {
    pub fn new(position: PositionState<O>, config: BoardConfig) -> Self {
        Self {
            position,
            selection: SelectionState::default(),
            config,
            promotion_choice: None,
            notice: None,
            on_move: None,
        }
    }

    /// Register the callback receiving the notation of every applied local
    /// move. Called exactly once per move.
    pub fn with_on_move(mut self, on_move: impl FnMut(&str) + 'static) -> Self {
        self.on_move = Some(Box::new(on_move));
        self
    }

    pub fn position(&self) -> &PositionState<O> {
        &self.position
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn phase(&self) -> InteractionPhase {
        self.selection.phase()
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn set_config(&mut self, config: BoardConfig) {
        self.config = config;
        self.selection.reset();
    }

    /// Transient message about the last rejected move.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn promotion_choice(&self) -> Option<PieceKind> {
        self.promotion_choice
    }

    /// Piece to promote to on the next promoting move. `None` means queen.
    /// Non-promotable kinds are ignored.
    pub fn set_promotion_choice(&mut self, kind: Option<PieceKind>) {
        self.promotion_choice = kind.filter(|k| k.is_promotion_target());
    }

    /// Replace the position from outside (e.g. the opponent moved).
    ///
    /// Selection is dropped before the new position is parsed, so a stale
    /// destination set never survives, even if the new position is rejected.
    pub fn set_position(&mut self, fen: &str) -> Result<(), PositionError> {
        self.selection.reset();
        self.notice = None;
        self.position.load(fen)
    }

    pub fn click(&mut self, square: Square, input_enabled: bool) -> ClickOutcome {
        if !input_enabled {
            tracing::debug!(%square, "Click ignored, input disabled");
            return ClickOutcome::Ignored;
        }
        self.notice = None;
        let gating = self.config.gating();

        let outcome = match self.selection.selected() {
            None if self.position.is_movable(square, gating) => self.select(square),
            None => ClickOutcome::NoOp,
            Some(selected) if selected == square => {
                self.selection.reset();
                ClickOutcome::Deselected
            }
            Some(selected) if self.selection.legal_destinations().contains(square) => {
                self.complete_move(selected, square)
            }
            Some(_) if self.position.is_movable(square, gating) => self.select(square),
            Some(_) => {
                self.selection.reset();
                ClickOutcome::Cleared
            }
        };
        tracing::debug!(%square, ?outcome, "Board click");
        outcome
    }

    /// Pointer entered `square`.
    pub fn hover(&mut self, square: Square) {
        self.selection.set_hovered(Some(square));
    }

    /// Pointer left the board.
    pub fn leave(&mut self) {
        self.selection.set_hovered(None);
    }

    pub fn highlight(&self, square: Square) -> SquareHighlight {
        self.selection.highlight(square)
    }

    fn select(&mut self, square: Square) -> ClickOutcome {
        let destinations = self
            .position
            .legal_destinations(square, self.config.gating());
        self.selection.select(square, destinations);
        ClickOutcome::Selected(square)
    }

    fn complete_move(&mut self, from: Square, to: Square) -> ClickOutcome {
        let result =
            self.position
                .apply_move(from, to, self.promotion_choice, self.config.gating());
        self.selection.reset();
        match result {
            Ok(mv) => {
                if mv.promotion.is_some() {
                    self.promotion_choice = None;
                }
                if let Some(on_move) = self.on_move.as_mut() {
                    on_move(&mv.notation);
                }
                ClickOutcome::Moved(mv)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Move rejected by rules oracle");
                self.notice = Some(e.to_string());
                ClickOutcome::Rejected(e)
            }
        }
    }
}
