use std::time::{Duration, Instant};

pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Danger,
}

/// A transient toast shown at the top of the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push_at(message, NotificationKind::Success, Instant::now());
    }

    pub fn danger(&mut self, message: impl Into<String>) {
        self.push_at(message, NotificationKind::Danger, Instant::now());
    }

    pub fn push_at(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        let message = message.into();
        match kind {
            NotificationKind::Success => tracing::info!(text = %message, "notification shown"),
            NotificationKind::Danger => tracing::warn!(text = %message, "notification shown"),
        }
        self.items.push(Notification {
            message,
            kind,
            expires_at: now + NOTIFICATION_DURATION,
        });
    }

    /// Drops expired notifications.
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|n| n.expires_at > now);
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
