use chess::{Square, SquareSet};

/// Primary interaction phase. Hover is tracked alongside and never gates a
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase {
    Idle,
    PieceSelected,
}

/// Transient UI state of the board.
///
/// Invariant: `legal_destinations` is empty whenever `selected` is `None`,
/// and otherwise was computed against the position currently held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<Square>,
    legal_destinations: SquareSet,
    hovered: Option<Square>,
}

impl SelectionState {
    pub fn phase(&self) -> InteractionPhase {
        if self.selected.is_some() {
            InteractionPhase::PieceSelected
        } else {
            InteractionPhase::Idle
        }
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn legal_destinations(&self) -> SquareSet {
        self.legal_destinations
    }

    pub fn hovered(&self) -> Option<Square> {
        self.hovered
    }

    pub(crate) fn select(&mut self, square: Square, destinations: SquareSet) {
        self.selected = Some(square);
        self.legal_destinations = destinations;
    }

    /// Drop selection and hover.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn set_hovered(&mut self, square: Option<Square>) {
        self.hovered = square;
    }

    pub fn highlight(&self, square: Square) -> SquareHighlight {
        if self.selected == Some(square) {
            SquareHighlight::Selected
        } else if self.legal_destinations.contains(square) {
            if self.hovered == Some(square) {
                SquareHighlight::LegalMoveHovered
            } else {
                SquareHighlight::LegalMove
            }
        } else {
            SquareHighlight::None
        }
    }
}

/// How a square is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareHighlight {
    Selected,
    LegalMove,
    LegalMoveHovered,
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_is_idle_and_empty() {
        let state = SelectionState::default();
        assert_eq!(state.phase(), InteractionPhase::Idle);
        assert!(state.legal_destinations().is_empty());
        assert_eq!(state.hovered(), None);
    }

    #[test]
    fn test_highlight_prefers_selection_then_hovered_destination() {
        let mut state = SelectionState::default();
        state.select(sq("e2"), [sq("e3"), sq("e4")].into_iter().collect());
        state.set_hovered(Some(sq("e4")));

        assert_eq!(state.phase(), InteractionPhase::PieceSelected);
        assert_eq!(state.highlight(sq("e2")), SquareHighlight::Selected);
        assert_eq!(state.highlight(sq("e3")), SquareHighlight::LegalMove);
        assert_eq!(state.highlight(sq("e4")), SquareHighlight::LegalMoveHovered);
        assert_eq!(state.highlight(sq("d4")), SquareHighlight::None);
    }

    #[test]
    fn test_hover_over_non_destination_is_cosmetic_only() {
        let mut state = SelectionState::default();
        state.set_hovered(Some(sq("a1")));
        assert_eq!(state.phase(), InteractionPhase::Idle);
        assert_eq!(state.highlight(sq("a1")), SquareHighlight::None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = SelectionState::default();
        state.select(sq("g1"), [sq("f3")].into_iter().collect());
        state.set_hovered(Some(sq("f3")));
        state.reset();
        assert_eq!(state, SelectionState::default());
    }
}
