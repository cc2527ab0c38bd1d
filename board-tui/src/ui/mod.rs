//! Terminal rendering and the event loop that owns the board.

pub mod app;
pub mod layout;
pub mod theme;
pub mod widgets;

pub use app::{run_app, App, AppOptions};
pub use layout::BoardLayout;
pub use theme::{Theme, ThemeName};
