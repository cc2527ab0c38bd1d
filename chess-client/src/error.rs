//! Error types for the real-time channel

use thiserror::Error;

pub type ChannelResult<T> = Result<T, ChannelError>;

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Channel is not connected")]
    NotConnected,

    #[error("Transport closed by remote")]
    Closed,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
