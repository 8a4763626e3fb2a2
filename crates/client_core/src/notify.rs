//! Transient success/error notifications with a fixed auto-dismiss delay.

use std::{
    fmt,
    time::{Duration, Instant},
};

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    /// Operation label for errors, e.g. "Error updating property".
    pub title: Option<String>,
    pub message: String,
    pub raised_at: Instant,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{title}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug)]
pub struct NotificationCenter {
    ttl: Duration,
    active: Vec<Notification>,
    unseen: usize,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            active: Vec::new(),
            unseen: 0,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Success, None, message.into());
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(NotificationKind::Error, Some(title.into()), message.into());
    }

    fn push(&mut self, kind: NotificationKind, title: Option<String>, message: String) {
        self.active.push(Notification {
            kind,
            title,
            message,
            raised_at: Instant::now(),
        });
        self.unseen += 1;
    }

    /// Drops every notification whose delay has elapsed and returns how many were dismissed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.active.len();
        let ttl = self.ttl;
        self.active.retain(|n| now.saturating_duration_since(n.raised_at) < ttl);
        let dismissed = before - self.active.len();
        self.unseen = self.unseen.min(self.active.len());
        dismissed
    }

    /// Notifications raised since the last call, oldest first.
    pub fn drain_new(&mut self) -> Vec<Notification> {
        let start = self.active.len() - self.unseen;
        self.unseen = 0;
        self.active[start..].to_vec()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.active.last()
    }

    pub fn all(&self) -> &[Notification] {
        &self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_expire_after_ttl() {
        let mut center = NotificationCenter::new(Duration::from_secs(3));
        center.success("Property added successfully!");
        let raised = center.all()[0].raised_at;

        assert_eq!(center.prune(raised + Duration::from_secs(2)), 0);
        assert_eq!(center.all().len(), 1);

        assert_eq!(center.prune(raised + Duration::from_secs(3)), 1);
        assert!(center.all().is_empty());
    }

    #[test]
    fn drain_new_returns_each_notification_once() {
        let mut center = NotificationCenter::default();
        center.success("first");
        center.error("Error getting properties", "boom");

        let fresh = center.drain_new();
        assert_eq!(fresh.len(), 2);
        assert_eq!(fresh[1].to_string(), "Error getting properties: boom");
        assert!(center.drain_new().is_empty());

        center.success("third");
        let fresh = center.drain_new();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].message, "third");
    }
}
