//! File-backed transport that replays positions as if a remote peer sent them.
//!
//! One FEN per line; blank lines and lines starting with `#` are skipped.
//! Useful for driving the board without a server.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::error::{ChannelError, ChannelResult};
use crate::event::ChannelEvent;
use crate::traits::Transport;

pub struct ReplayTransport {
    path: PathBuf,
    interval: Duration,
    pending: VecDeque<String>,
    last_emit: Option<Instant>,
    connected: bool,
}

impl ReplayTransport {
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            interval,
            pending: VecDeque::new(),
            last_emit: None,
            connected: false,
        }
    }

    /// Positions not yet delivered.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl Transport for ReplayTransport {
    fn connect(&mut self) -> ChannelResult<()> {
        let contents = std::fs::read_to_string(&self.path)?;
        self.pending = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        self.last_emit = None;
        self.connected = true;
        tracing::info!(
            path = %self.path.display(),
            positions = self.pending.len(),
            "Replay transport loaded"
        );
        Ok(())
    }

    fn poll(&mut self, now: Instant) -> ChannelResult<Option<ChannelEvent>> {
        if !self.connected {
            return Err(ChannelError::NotConnected);
        }
        if self
            .last_emit
            .is_some_and(|last| now.duration_since(last) < self.interval)
        {
            return Ok(None);
        }
        match self.pending.pop_front() {
            Some(fen) => {
                self.last_emit = Some(now);
                Ok(Some(ChannelEvent::PositionChanged { fen }))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.connected = false;
    }
}
