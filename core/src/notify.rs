//! Transient user notifications.
//!
//! Controllers receive a `Notifier` at construction and never reach for a
//! shared registry. How a notification is shown is up to the host.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

/// How long a notification stays up unless dismissed.
pub const AUTO_HIDE: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub auto_hide: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            auto_hide: AUTO_HIDE,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}

pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Writes notifications to the log; for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Error => tracing::error!(message = %notification.message, "notification"),
            Severity::Warning => tracing::warn!(message = %notification.message, "notification"),
            Severity::Success | Severity::Info => {
                tracing::info!(message = %notification.message, "notification")
            }
        }
    }
}

/// Keeps every notification in order of arrival.
#[derive(Debug, Default)]
pub struct Inbox {
    received: RefCell<Vec<Notification>>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Notification> {
        self.received.take()
    }

    pub fn last(&self) -> Option<Notification> {
        self.received.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.received.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.received.borrow().is_empty()
    }
}

impl Notifier for Inbox {
    fn notify(&self, notification: Notification) {
        self.received.borrow_mut().push(notification);
    }
}
