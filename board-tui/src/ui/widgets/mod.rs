pub mod board;
pub mod side_panel;

pub use board::BoardWidget;
pub use side_panel::SidePanel;
