//! Connection state machine for the real-time channel.
//!
//! ```text
//! Disconnected ──connect──▶ Connecting ──ok──▶ Connected
//!                               │                 │ transport error
//!                               │ error           ▼
//!                               └──────────▶ Reconnecting { attempt, retry_at }
//!                                                 │ retry_at reached
//!                                                 └──▶ Connecting
//! ```
//!
//! Time is passed in by the caller, so every transition is driven by
//! [`Channel::connect`], [`Channel::poll`] or [`Channel::disconnect`] and can
//! be tested without sleeping.

use std::time::Instant;

use crate::backoff::BackoffSchedule;
use crate::event::ChannelEvent;
use crate::traits::Transport;

/// Upper bound on events drained by a single [`Channel::poll`].
const MAX_EVENTS_PER_POLL: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32, retry_at: Instant },
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Reconnecting { .. } => "reconnecting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&ChannelEvent)>;

/// A reconnecting event channel with a subscribe/unsubscribe contract.
pub struct Channel<T: Transport> {
    transport: T,
    state: ConnectionState,
    backoff: BackoffSchedule,
    subscribers: Vec<(SubscriptionId, Handler)>,
    next_subscription: u64,
}

impl<T: Transport> Channel<T> {
    pub fn new(transport: T, backoff: BackoffSchedule) -> Self {
        Self {
            transport,
            state: ConnectionState::Disconnected,
            backoff,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Register a handler for every event the channel delivers.
    pub fn subscribe(&mut self, handler: impl FnMut(&ChannelEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Start connecting. No-op while already connecting or connected.
    pub fn connect(&mut self, now: Instant) {
        match self.state {
            ConnectionState::Connecting | ConnectionState::Connected => {}
            ConnectionState::Disconnected | ConnectionState::Reconnecting { .. } => {
                self.try_connect(0, now)
            }
        }
    }

    /// Close the transport and stop retrying.
    pub fn disconnect(&mut self) {
        self.transport.close();
        self.set_state(ConnectionState::Disconnected);
    }

    /// Drive the state machine: retry when a backoff has elapsed, otherwise
    /// drain pending events. Returns the number of transport events delivered.
    pub fn poll(&mut self, now: Instant) -> usize {
        match self.state {
            ConnectionState::Reconnecting { attempt, retry_at } if now >= retry_at => {
                self.try_connect(attempt, now);
                0
            }
            ConnectionState::Connected => self.drain(now),
            _ => 0,
        }
    }

    fn drain(&mut self, now: Instant) -> usize {
        let mut delivered = 0;
        while delivered < MAX_EVENTS_PER_POLL {
            match self.transport.poll(now) {
                Ok(Some(event)) => {
                    self.dispatch(&event);
                    delivered += 1;
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Channel transport failed, scheduling reconnect");
                    self.transport.close();
                    self.schedule_retry(1, now);
                    break;
                }
            }
        }
        delivered
    }

    fn try_connect(&mut self, attempt: u32, now: Instant) {
        self.set_state(ConnectionState::Connecting);
        match self.transport.connect() {
            Ok(()) => self.set_state(ConnectionState::Connected),
            Err(e) => {
                tracing::warn!(attempt, error = %e, "Channel connect failed");
                self.schedule_retry(attempt + 1, now);
            }
        }
    }

    fn schedule_retry(&mut self, attempt: u32, now: Instant) {
        match self.backoff.delay_for(attempt) {
            Some(delay) => self.set_state(ConnectionState::Reconnecting {
                attempt,
                retry_at: now + delay,
            }),
            None => {
                tracing::warn!(attempt, "Channel giving up after exhausting reconnect attempts");
                self.set_state(ConnectionState::Disconnected);
            }
        }
    }

    fn set_state(&mut self, state: ConnectionState) {
        if self.state == state {
            return;
        }
        tracing::info!(from = self.state.label(), to = state.label(), "Channel state changed");
        self.state = state.clone();
        self.dispatch(&ChannelEvent::StateChanged(state));
    }

    fn dispatch(&mut self, event: &ChannelEvent) {
        for (_, handler) in self.subscribers.iter_mut() {
            handler(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockCall, MockTransport};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn recorder(channel: &mut Channel<MockTransport>) -> (SubscriptionId, Rc<RefCell<Vec<ChannelEvent>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = channel.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        (id, seen)
    }

    fn fast_backoff() -> BackoffSchedule {
        BackoffSchedule::new(
            vec![Duration::from_millis(100), Duration::from_millis(200)],
            Some(3),
        )
    }

    #[test]
    fn test_connect_reaches_connected() {
        let mut channel = Channel::new(MockTransport::new(), fast_backoff());
        let (_, seen) = recorder(&mut channel);

        channel.connect(Instant::now());

        assert_eq!(channel.state(), &ConnectionState::Connected);
        assert_eq!(
            *seen.borrow(),
            vec![
                ChannelEvent::StateChanged(ConnectionState::Connecting),
                ChannelEvent::StateChanged(ConnectionState::Connected),
            ]
        );
    }

    #[test]
    fn test_failed_connect_waits_for_backoff() {
        let transport = MockTransport::new();
        transport.push_connect_failure("refused");
        let mut channel = Channel::new(transport, fast_backoff());
        let start = Instant::now();

        channel.connect(start);
        assert_eq!(
            channel.state(),
            &ConnectionState::Reconnecting {
                attempt: 1,
                retry_at: start + Duration::from_millis(100)
            }
        );

        channel.poll(start + Duration::from_millis(50));
        assert!(matches!(channel.state(), ConnectionState::Reconnecting { .. }));

        channel.poll(start + Duration::from_millis(100));
        assert_eq!(channel.state(), &ConnectionState::Connected);
    }

    #[test]
    fn test_backoff_grows_with_attempts_then_gives_up() {
        let transport = MockTransport::new();
        for _ in 0..4 {
            transport.push_connect_failure("refused");
        }
        let mut channel = Channel::new(transport, fast_backoff());
        let start = Instant::now();

        channel.connect(start);
        let t1 = start + Duration::from_millis(100);
        channel.poll(t1);
        assert_eq!(
            channel.state(),
            &ConnectionState::Reconnecting {
                attempt: 2,
                retry_at: t1 + Duration::from_millis(200)
            }
        );

        let t2 = t1 + Duration::from_millis(200);
        channel.poll(t2);
        assert!(matches!(
            channel.state(),
            ConnectionState::Reconnecting { attempt: 3, .. }
        ));

        channel.poll(t2 + Duration::from_secs(1));
        assert_eq!(channel.state(), &ConnectionState::Disconnected);
    }

    #[test]
    fn test_events_reach_subscribers_until_unsubscribed() {
        let transport = MockTransport::new();
        transport.push_event(ChannelEvent::PositionChanged {
            fen: "8/8/8/8/8/8/8/K6k w - -".to_string(),
        });
        let handle = transport.clone();
        let mut channel = Channel::new(transport, fast_backoff());
        let (id, seen) = recorder(&mut channel);
        let now = Instant::now();

        channel.connect(now);
        assert_eq!(channel.poll(now), 1);
        assert!(seen
            .borrow()
            .contains(&ChannelEvent::PositionChanged {
                fen: "8/8/8/8/8/8/8/K6k w - -".to_string()
            }));

        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        let count_before = seen.borrow().len();
        handle.push_event(ChannelEvent::Notice("hello".to_string()));
        assert_eq!(channel.poll(now), 1);
        assert_eq!(seen.borrow().len(), count_before);
    }

    #[test]
    fn test_transport_error_while_connected_reconnects() {
        let transport = MockTransport::new();
        transport.push_poll_failure("reset by peer");
        let handle = transport.clone();
        let mut channel = Channel::new(transport, fast_backoff());
        let now = Instant::now();

        channel.connect(now);
        channel.poll(now);

        assert_eq!(
            channel.state(),
            &ConnectionState::Reconnecting {
                attempt: 1,
                retry_at: now + Duration::from_millis(100)
            }
        );
        assert!(handle.calls().contains(&MockCall::Close));
    }

    #[test]
    fn test_disconnect_stops_retrying() {
        let transport = MockTransport::new();
        transport.push_connect_failure("refused");
        let mut channel = Channel::new(transport, fast_backoff());
        let now = Instant::now();

        channel.connect(now);
        channel.disconnect();
        channel.poll(now + Duration::from_secs(10));

        assert_eq!(channel.state(), &ConnectionState::Disconnected);
        assert_eq!(
            channel.transport().calls(),
            vec![MockCall::Connect, MockCall::Close]
        );
    }
}
