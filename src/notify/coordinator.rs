//! Dismissible alert coordination.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use super::{Alert, AlertBackend};

// ============================================================================
// DismissGuard
// ============================================================================

/// Once-only invocation contract for a shown alert.
///
/// Both dismissal triggers (explicit close and action activation) share one
/// guard; the compare-and-set on `fired` decides which of them runs the
/// callback. The loser observes the swap failure and discards its event —
/// two independent boolean checks could both pass before either sets the
/// flag, which is exactly the race this guard closes.
#[derive(Clone)]
pub struct DismissGuard {
    inner: Arc<GuardInner>,
}

struct GuardInner {
    fired: AtomicBool,
    callback: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl DismissGuard {
    /// Wraps a callback into a fresh guard.
    #[must_use]
    pub fn new(callback: impl FnOnce() + Send + 'static) -> Self {
        Self {
            inner: Arc::new(GuardInner {
                fired: AtomicBool::new(false),
                callback: Mutex::new(Some(Box::new(callback))),
            }),
        }
    }

    /// Runs the callback unless another trigger ran it before.
    pub fn fire(&self) {
        if self
            .inner
            .fired
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("dismiss callback already fired, event discarded");
            return;
        }
        if let Some(callback) = self.inner.callback.lock().unwrap().take() {
            callback();
        }
    }

    /// Returns true once a trigger has fired.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.inner.fired.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for DismissGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DismissGuard")
            .field("fired", &self.has_fired())
            .finish()
    }
}

// ============================================================================
// NotificationCoordinator
// ============================================================================

/// Shows dismissible alerts whose dismissal fires a callback at most once.
///
/// The backend is an optional capability resolved once at construction.
/// When it is unavailable the coordinator stays inert for its whole
/// lifetime: every [`show`](Self::show) is a silent no-op and nothing is
/// ever raised to the caller.
pub struct NotificationCoordinator {
    backend: Option<Arc<dyn AlertBackend>>,
}

impl NotificationCoordinator {
    /// Creates a coordinator over the platform notification server.
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: default_backend(),
        }
    }

    /// Creates a coordinator over a specific backend.
    #[must_use]
    pub fn with_backend(backend: Arc<dyn AlertBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Creates a permanently inert coordinator.
    #[must_use]
    pub fn inert() -> Self {
        Self { backend: None }
    }

    /// Returns true when a backend was available at construction.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Presents a dismissible alert with a single "stop alarm" action.
    ///
    /// `on_dismiss` fires at most once, for the first of explicit dismissal
    /// or action activation; the second event is discarded. Without a
    /// backend, or when presentation fails, this is a silent no-op and the
    /// callback is never invoked.
    pub fn show(&self, title: &str, message: &str, on_dismiss: impl FnOnce() + Send + 'static) {
        let Some(backend) = &self.backend else {
            debug!("notification backend unavailable, alert not shown");
            return;
        };

        let alert = Alert::new(title, message);
        let guard = DismissGuard::new(on_dismiss);
        if let Err(e) = backend.present(&alert, guard) {
            warn!("通知を表示できませんでした: {}", e);
        }
    }
}

impl Default for NotificationCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NotificationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCoordinator")
            .field("available", &self.is_available())
            .finish()
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn default_backend() -> Option<Arc<dyn AlertBackend>> {
    match super::DesktopBackend::probe() {
        Ok(backend) => Some(Arc::new(backend)),
        Err(e) => {
            warn!("通知サーバが見つかりません。通知機能は無効です: {}", e);
            None
        }
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn default_backend() -> Option<Arc<dyn AlertBackend>> {
    warn!("このプラットフォームには通知バックエンドがありません。通知機能は無効です");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MockAlertBackend;
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    #[test]
    fn test_guard_fires_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let guard = DismissGuard::new({
            let count = Arc::clone(&count);
            move || {
                count.fetch_add(1, Ordering::SeqCst);
            }
        });

        assert!(!guard.has_fired());
        guard.fire();
        guard.fire();

        assert!(guard.has_fired());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_fires_once_across_threads() {
        let count = Arc::new(AtomicUsize::new(0));
        let guard = DismissGuard::new({
            let count = Arc::clone(&count);
            move || {
                count.fetch_add(1, Ordering::SeqCst);
            }
        });

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let guard = guard.clone();
                thread::spawn(move || guard.fire())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_show_presents_alert() {
        let backend = Arc::new(MockAlertBackend::new());
        let coordinator = NotificationCoordinator::with_backend(backend.clone());

        coordinator.show("タイマー終了", "お疲れさまでした", || {});

        assert_eq!(backend.shown_count(), 1);
        let alert = backend.last_alert().unwrap();
        assert_eq!(alert.title, "タイマー終了");
        assert_eq!(alert.message, "お疲れさまでした");
        assert!(!alert.action_label.is_empty());
    }

    #[test]
    fn test_inert_coordinator_never_invokes_callback() {
        let coordinator = NotificationCoordinator::inert();
        assert!(!coordinator.is_available());

        let invoked = Arc::new(AtomicBool::new(false));
        coordinator.show("title", "message", {
            let invoked = Arc::clone(&invoked);
            move || invoked.store(true, Ordering::SeqCst)
        });

        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[test]
    fn test_show_swallows_backend_failure() {
        let backend = Arc::new(MockAlertBackend::new());
        backend.set_should_fail(true);
        let coordinator = NotificationCoordinator::with_backend(backend.clone());

        let invoked = Arc::new(AtomicBool::new(false));
        coordinator.show("title", "message", {
            let invoked = Arc::clone(&invoked);
            move || invoked.store(true, Ordering::SeqCst)
        });

        assert_eq!(backend.shown_count(), 0);
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[test]
    fn test_dismissal_triggers_callback_through_backend() {
        let backend = Arc::new(MockAlertBackend::new());
        let coordinator = NotificationCoordinator::with_backend(backend.clone());

        let invoked = Arc::new(AtomicUsize::new(0));
        coordinator.show("title", "message", {
            let invoked = Arc::clone(&invoked);
            move || {
                invoked.fetch_add(1, Ordering::SeqCst);
            }
        });

        let guard = backend.guard(0).unwrap();
        guard.fire(); // explicit dismissal
        guard.fire(); // action activation arriving second

        assert_eq!(invoked.load(Ordering::SeqCst), 1);
    }
}
