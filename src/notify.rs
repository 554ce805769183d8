//! Notification collaborator contract.
//!
//! The engine reports every mutation's outcome through the `Notifier`
//! trait; presentation (snackbars, toasts) lives outside the core.
//! `NotificationCenter` is the in-process implementation: a persistent,
//! observable list with explicit removal and timer-based auto-dismiss.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// A displayed or pending notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    /// When set, the notification removes itself after this long.
    pub duration: Option<Duration>,
}

/// Observable-effects contract the core calls on mutation success/failure.
pub trait Notifier: Send + Sync {
    fn toast(&self, message: &str, severity: Severity, duration: Duration);
}

/// Notifier that drops everything; for headless use and tests.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn toast(&self, _message: &str, _severity: Severity, _duration: Duration) {}
}

struct CenterInner {
    items: RwLock<Vec<Notification>>,
    changes: watch::Sender<Vec<Notification>>,
    next_id: AtomicU64,
}

/// Persistent notification list with broadcast on every change.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<CenterInner>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(Vec::new());
        NotificationCenter {
            inner: Arc::new(CenterInner {
                items: RwLock::new(Vec::new()),
                changes,
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Add a notification; returns its id for explicit removal. When
    /// `duration` is set, a timer removes it automatically.
    pub fn add(
        &self,
        message: impl Into<String>,
        severity: Severity,
        duration: Option<Duration>,
    ) -> String {
        let id = format!("n{}", self.inner.next_id.fetch_add(1, Ordering::SeqCst));
        let notification = Notification {
            id: id.clone(),
            message: message.into(),
            severity,
            timestamp: Utc::now(),
            duration,
        };
        {
            let mut items = self.inner.items.write();
            items.push(notification);
            self.inner.changes.send_replace(items.clone());
        }
        if let Some(duration) = duration {
            let center = self.clone();
            let dismiss_id = id.clone();
            tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                center.remove(&dismiss_id);
            });
        }
        id
    }

    /// Remove a notification by id; unknown ids are a no-op.
    pub fn remove(&self, id: &str) {
        let mut items = self.inner.items.write();
        let before = items.len();
        items.retain(|n| n.id != id);
        if items.len() != before {
            self.inner.changes.send_replace(items.clone());
        }
    }

    pub fn list(&self) -> Vec<Notification> {
        self.inner.items.read().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.inner.changes.subscribe()
    }
}

impl Notifier for NotificationCenter {
    fn toast(&self, message: &str, severity: Severity, duration: Duration) {
        self.add(message, severity, Some(duration));
    }
}
