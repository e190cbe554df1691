//! Transient notifications (toasts)

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notification stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn success(text: impl Into<String>) -> Self {
        Self::at(NotificationKind::Success, text, Instant::now())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::at(NotificationKind::Error, text, Instant::now())
    }

    pub fn at(kind: NotificationKind, text: impl Into<String>, created_at: Instant) -> Self {
        Self {
            kind,
            text: text.into(),
            created_at,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= NOTIFICATION_TTL
    }
}

/// Oldest first
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    items: VecDeque<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.items.push_back(notification);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(Notification::success(text));
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(Notification::error(text));
    }

    /// Drop everything older than the TTL
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|item| !item.is_expired(now));
    }

    /// Remove and return every pending notification, oldest first
    pub fn take_all(&mut self) -> Vec<Notification> {
        self.items.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_after_ttl() {
        let start = Instant::now();
        let mut notifications = Notifications::new();
        notifications.push(Notification::at(NotificationKind::Error, "Failed to move card", start));
        notifications.push(Notification::at(
            NotificationKind::Success,
            "Card created",
            start + Duration::from_secs(3),
        ));

        notifications.prune(start + Duration::from_secs(2));
        assert_eq!(notifications.len(), 2);

        notifications.prune(start + NOTIFICATION_TTL);
        let texts: Vec<_> = notifications.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["Card created"]);
    }
}
