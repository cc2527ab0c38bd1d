//! Process-wide state created at start-up and passed explicitly to the app.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chess::PieceColor;

pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 5;
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Who is looking at the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub name: String,
    /// Side the viewer plays, if any. Spectators have none.
    pub side: Option<PieceColor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub expires_at: Instant,
}

/// Bounded queue of transient messages. When full, the oldest is dropped.
#[derive(Debug, Clone)]
pub struct Notifications {
    queue: VecDeque<Notification>,
    capacity: usize,
    ttl: Duration,
}

impl Notifications {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            ttl,
        }
    }

    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>, now: Instant) {
        if self.queue.len() == self.capacity {
            self.queue.pop_front();
        }
        self.queue.push_back(Notification {
            level,
            message: message.into(),
            expires_at: now + self.ttl,
        });
    }

    /// Live notifications, oldest first.
    pub fn active(&self, now: Instant) -> impl Iterator<Item = &Notification> {
        self.queue.iter().filter(move |n| n.expires_at > now)
    }

    /// Drop expired notifications. Returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.queue.len();
        self.queue.retain(|n| n.expires_at > now);
        before - self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_CAPACITY, DEFAULT_NOTIFICATION_TTL)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub viewer: Option<Viewer>,
    pub notifications: Notifications,
}

impl AppContext {
    pub fn new(viewer: Option<Viewer>) -> Self {
        Self {
            viewer,
            notifications: Notifications::default(),
        }
    }

    pub fn logout(&mut self) {
        if let Some(viewer) = self.viewer.take() {
            tracing::info!(viewer = %viewer.name, "Viewer logged out");
        }
        self.notifications.clear();
    }
}
