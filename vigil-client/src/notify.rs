//! Notification port
//!
//! The wizard surfaces every outcome, success or failure, through this
//! injected port. Notices are fire-and-forget: they never influence the
//! state machine, only what the operator sees.

use std::sync::{Arc, Mutex};

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// One user-visible notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Notice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Error,
        }
    }
}

/// Side-effect port for user-visible notices
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that forwards notices to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Info => tracing::info!(title = %notice.title, "{}", notice.body),
            Severity::Error => tracing::warn!(title = %notice.title, "{}", notice.body),
        }
    }
}

/// Notifier that records notices in memory
///
/// Clones share one buffer, so a test can hand the wizard a clone and
/// assert on exactly what the operator was told.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all notices received so far
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    /// Title of the most recent notice, if any
    pub fn last_title(&self) -> Option<String> {
        self.notices
            .lock()
            .unwrap()
            .last()
            .map(|n| n.title.clone())
    }

    pub fn clear(&self) {
        self.notices.lock().unwrap().clear();
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notice::info("QR Code Scanned", "Please verify your mobile number"));
        notifier.notify(Notice::error("Connection Error", "Unable to reach the duty store"));

        let notices = notifier.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].severity, Severity::Info);
        assert_eq!(notices[1].severity, Severity::Error);
        assert_eq!(notifier.last_title().as_deref(), Some("Connection Error"));

        notifier.clear();
        assert!(notifier.notices().is_empty());
    }
}
