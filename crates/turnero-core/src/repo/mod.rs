//! Caching repositories over the backend store.
//!
//! Each repository owns the local cache of one collection, mediates every
//! remote read/write, and surfaces the collection, a loading flag, and the
//! last error message. The one consistency rule is confirm-then-reflect: a
//! mutation touches the cache only after the store confirms it, so the cache
//! never holds unconfirmed state. Failures keep the last-known-good cache
//! and come back as sentinels (`None`, `false`, empty vec) plus a
//! notification; callers never handle errors themselves.
//!
//! Command methods take `&mut self` and run to completion, which makes
//! single-flight per record structural: a second command on a record cannot
//! start before the first finishes.

mod patients;
mod turns;

pub use patients::PatientRepository;
pub use turns::TurnRepository;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A transient user-facing notification (the UI renders these as toasts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self {
            title: "Error".into(),
            body: body.into(),
            severity: Severity::Error,
        }
    }
}

/// Sink for user-facing notifications, injected into the repositories.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Notifier that forwards to the `tracing` log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => {
                tracing::info!(title = %notification.title, "{}", notification.body)
            }
            Severity::Error => {
                tracing::error!(title = %notification.title, "{}", notification.body)
            }
        }
    }
}

/// Notifier that drops everything.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: Notification) {}
}
