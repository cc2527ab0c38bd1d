//! Real-time channel to the game server
//!
//! Models the live event feed as an explicit connection state machine with
//! a data-driven backoff schedule and a subscribe/unsubscribe contract. The
//! transport is pluggable; this crate ships a file replay transport and a
//! scripted mock.
//!
//! # Example
//!
//! ```no_run
//! use chess_client::{BackoffSchedule, Channel, ChannelEvent, ReplayTransport};
//! use std::time::{Duration, Instant};
//!
//! let transport = ReplayTransport::new("game.fen", Duration::from_secs(1));
//! let mut channel = Channel::new(transport, BackoffSchedule::default());
//! channel.subscribe(|event| {
//!     if let ChannelEvent::PositionChanged { fen } = event {
//!         println!("new position: {fen}");
//!     }
//! });
//! channel.connect(Instant::now());
//! channel.poll(Instant::now());
//! ```

mod backoff;
mod connection;
mod error;
mod event;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod replay;
mod traits;

pub use backoff::BackoffSchedule;
pub use connection::{Channel, ConnectionState, SubscriptionId};
pub use error::{ChannelError, ChannelResult};
pub use event::ChannelEvent;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCall, MockTransport};
pub use replay::ReplayTransport;
pub use traits::Transport;
