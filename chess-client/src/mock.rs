//! Scripted Transport implementation for testing

use crate::error::{ChannelError, ChannelResult};
use crate::event::ChannelEvent;
use crate::traits::Transport;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Mock transport - only compiled in test mode or with mock feature.
///
/// Clones share the same script, so a test can keep a handle after moving
/// the transport into a [`crate::Channel`].
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<MockScript>>,
}

#[derive(Default)]
struct MockScript {
    connect_failures: VecDeque<String>,
    polls: VecDeque<MockPoll>,
    calls: Vec<MockCall>,
}

enum MockPoll {
    Event(ChannelEvent),
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Connect,
    Poll,
    Close,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `connect` fail. Unscripted connects succeed.
    pub fn push_connect_failure(&self, reason: &str) {
        self.script
            .lock()
            .unwrap()
            .connect_failures
            .push_back(reason.to_string());
    }

    pub fn push_event(&self, event: ChannelEvent) {
        self.script
            .lock()
            .unwrap()
            .polls
            .push_back(MockPoll::Event(event));
    }

    pub fn push_poll_failure(&self, reason: &str) {
        self.script
            .lock()
            .unwrap()
            .polls
            .push_back(MockPoll::Failure(reason.to_string()));
    }

    /// Calls made so far, excluding empty polls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.script.lock().unwrap().calls.clone()
    }
}

impl Transport for MockTransport {
    fn connect(&mut self) -> ChannelResult<()> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(MockCall::Connect);
        match script.connect_failures.pop_front() {
            Some(reason) => Err(ChannelError::Transport(reason)),
            None => Ok(()),
        }
    }

    fn poll(&mut self, _now: Instant) -> ChannelResult<Option<ChannelEvent>> {
        let mut script = self.script.lock().unwrap();
        match script.polls.pop_front() {
            Some(MockPoll::Event(event)) => {
                script.calls.push(MockCall::Poll);
                Ok(Some(event))
            }
            Some(MockPoll::Failure(reason)) => {
                script.calls.push(MockCall::Poll);
                Err(ChannelError::Transport(reason))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.script.lock().unwrap().calls.push(MockCall::Close);
    }
}
