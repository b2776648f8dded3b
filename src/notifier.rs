//! Notification capability injected into the transactions view

/// Receives the user-facing outcome messages of delete operations
pub trait Notifier {
    fn notify_success(&mut self, message: &str);
    fn notify_failure(&mut self, message: &str);
}
