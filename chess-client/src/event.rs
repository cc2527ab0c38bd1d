use crate::connection::ConnectionState;

/// Events delivered to channel subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// The authoritative position changed remotely (e.g. the opponent moved).
    PositionChanged { fen: String },
    /// Free-form notice pushed by the server.
    Notice(String),
    /// The channel itself changed state.
    StateChanged(ConnectionState),
}
