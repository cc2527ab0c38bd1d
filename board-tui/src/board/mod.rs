//! The board interaction component.
//!
//! - [`orientation`] maps visual cells to squares and back.
//! - [`position`] holds the authoritative position behind a rules oracle.
//! - [`selection`] is the transient selection/hover state.
//! - [`controller`] drives selection and moves from click and hover events.

pub mod controller;
pub mod orientation;
pub mod position;
pub mod selection;

pub use controller::{BoardConfig, BoardController, ClickOutcome};
pub use orientation::{square_at, visual_position_of, Orientation};
pub use position::{MoveResult, PositionError, PositionState, TurnGating, STARTING_FEN};
pub use selection::{InteractionPhase, SelectionState, SquareHighlight};
