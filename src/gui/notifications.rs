//! Notification system for the GUI
//!
//! Keeps a bounded notification history and decides when the toast is expanded.

use crate::notifier::Notifier;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Oldest entries are dropped beyond this many
const MAX_NOTIFICATIONS: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Failure,
}

/// A notification entry with message and timestamp
#[derive(Clone, Debug)]
pub struct NotificationEntry {
    pub message: String,
    pub level: NotificationLevel,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl NotificationEntry {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            timestamp: chrono::Local::now(),
        }
    }

    pub fn time_ago(&self) -> String {
        Self::format_age(chrono::Local::now().signed_duration_since(self.timestamp))
            .unwrap_or_else(|| self.timestamp.format("%m/%d %H:%M").to_string())
    }

    /// Relative label for ages under a day
    fn format_age(age: chrono::Duration) -> Option<String> {
        if age.num_seconds() < 60 {
            Some("just now".to_string())
        } else if age.num_minutes() < 60 {
            Some(format!("{}m ago", age.num_minutes()))
        } else if age.num_hours() < 24 {
            Some(format!("{}h ago", age.num_hours()))
        } else {
            None
        }
    }
}

/// Notification history plus toast timing, used as the view's [`Notifier`]
pub struct NotificationCenter {
    entries: VecDeque<NotificationEntry>,
    toast_duration: Duration,
    toast_until: Option<Instant>,
}

impl NotificationCenter {
    pub fn new(toast_duration: Duration) -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_NOTIFICATIONS),
            toast_duration,
            toast_until: None,
        }
    }

    fn push(&mut self, level: NotificationLevel, message: &str) {
        self.entries.push_back(NotificationEntry::new(level, message));
        while self.entries.len() > MAX_NOTIFICATIONS {
            self.entries.pop_front();
        }
        self.toast_until = Some(Instant::now() + self.toast_duration);
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &NotificationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&NotificationEntry> {
        self.entries.back()
    }

    /// Latest entry while its toast is still showing at `now`
    pub fn active_toast(&self, now: Instant) -> Option<&NotificationEntry> {
        match self.toast_until {
            Some(until) if now < until => self.latest(),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.toast_until = None;
    }
}

impl Notifier for NotificationCenter {
    fn notify_success(&mut self, message: &str) {
        self.push(NotificationLevel::Success, message);
    }

    fn notify_failure(&mut self, message: &str) {
        self.push(NotificationLevel::Failure, message);
    }
}
