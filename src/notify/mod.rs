//! Dismissible alarm notifications.
//!
//! This module provides the visual half of the alarm core:
//!
//! - A coordinator that shows one dismissible alert per timer expiry
//! - An at-most-once dismissal callback shared by both dismissal triggers
//! - Graceful degradation when the notification server is unavailable
//!
//! The coordinator never references the playback side. Its caller hands it
//! the stop callback, typically `move || controller.stop()`, and the two
//! flows converge on that single idempotent path.
//!
//! The real backend speaks the XDG desktop-notification protocol and is
//! compiled on `cfg(all(unix, not(target_os = "macos")))`; elsewhere the
//! coordinator constructs inert, which is the same degradation as a missing
//! server.

mod coordinator;
#[cfg(all(unix, not(target_os = "macos")))]
mod desktop;
mod error;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub use coordinator::{DismissGuard, NotificationCoordinator};
#[cfg(all(unix, not(target_os = "macos")))]
pub use desktop::DesktopBackend;
pub use error::NotifyError;

/// Content of one dismissible alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Headline shown by the notification server.
    pub title: String,
    /// Body text below the headline.
    pub message: String,
    /// Label of the single stop-alarm action button.
    pub action_label: String,
}

impl Alert {
    /// Creates an alert with the standard stop-alarm action.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            action_label: "アラームを停止".to_string(),
        }
    }
}

/// Presents alerts for the coordinator.
pub trait AlertBackend: Send + Sync {
    /// Presents `alert` and arranges for `on_dismiss` to fire on the first
    /// dismissal-class event. Must not block the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert could not be presented; the guard is
    /// dropped unfired in that case.
    fn present(&self, alert: &Alert, on_dismiss: DismissGuard) -> Result<(), NotifyError>;
}

/// Mock alert backend for tests.
///
/// Records presented alerts and exposes their guards so tests can fire
/// dismissal triggers in any order.
#[derive(Default)]
pub struct MockAlertBackend {
    shown: Mutex<Vec<(Alert, DismissGuard)>>,
    should_fail: AtomicBool,
}

impl MockAlertBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `present` calls fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of alerts presented so far.
    #[must_use]
    pub fn shown_count(&self) -> usize {
        self.shown.lock().unwrap().len()
    }

    /// The most recently presented alert.
    #[must_use]
    pub fn last_alert(&self) -> Option<Alert> {
        self.shown.lock().unwrap().last().map(|(alert, _)| alert.clone())
    }

    /// The guard of the `index`-th presented alert.
    #[must_use]
    pub fn guard(&self, index: usize) -> Option<DismissGuard> {
        self.shown
            .lock()
            .unwrap()
            .get(index)
            .map(|(_, guard)| guard.clone())
    }
}

impl AlertBackend for MockAlertBackend {
    fn present(&self, alert: &Alert, on_dismiss: DismissGuard) -> Result<(), NotifyError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotifyError::ShowFailed("mock failure".to_string()));
        }
        self.shown.lock().unwrap().push((alert.clone(), on_dismiss));
        Ok(())
    }
}
