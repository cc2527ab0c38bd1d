//! Interactive chess board component for the terminal.
//!
//! [`board`] is the component itself: orientation mapping, the position
//! held behind a rules oracle, and the click/hover state machine. [`ui`]
//! draws it with ratatui and wires it to crossterm input and the real-time
//! channel. [`context`] and [`config`] are the process-wide plumbing.

pub mod board;
pub mod config;
pub mod context;
pub mod ui;
