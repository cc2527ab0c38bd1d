//! Transport abstraction the channel drives

use std::time::Instant;

use crate::error::ChannelResult;
use crate::event::ChannelEvent;

/// A source of channel events.
/// Implemented by [`crate::ReplayTransport`] and, in tests, `MockTransport`.
pub trait Transport {
    /// Open the underlying connection.
    fn connect(&mut self) -> ChannelResult<()>;

    /// Fetch the next pending event without blocking. `now` is the
    /// caller's clock, so time-driven transports can be tested without
    /// sleeping.
    ///
    /// `Ok(None)` means nothing is pending; an error drops the connection and
    /// puts the channel into reconnect.
    fn poll(&mut self, now: Instant) -> ChannelResult<Option<ChannelEvent>>;

    /// Close the connection. Must be safe to call when not connected.
    fn close(&mut self);
}
