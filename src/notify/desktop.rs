//! Desktop notification backend over the XDG protocol.

use std::thread;

use notify_rust::Notification;
use tracing::{debug, warn};

use super::{Alert, AlertBackend, DismissGuard, NotifyError};

/// Application name reported to the notification server.
const APP_NAME: &str = "timerbell";

/// Identifier of the stop-alarm action button.
const STOP_ACTION: &str = "stop-alarm";

/// Backend over the desktop notification server.
///
/// Availability is probed once in [`probe`](Self::probe); a coordinator
/// constructed without it stays inert. Each alert lives on its own wait
/// thread, which shows the notification and then blocks until the server
/// reports either `ActionInvoked` (the stop button) or `NotificationClosed`
/// (explicit dismissal); the guard fires for whichever comes first. The
/// server connection never leaves that thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopBackend;

impl DesktopBackend {
    /// Probes the notification server.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Unavailable`] when no server answers.
    pub fn probe() -> Result<Self, NotifyError> {
        let info = notify_rust::get_server_information()
            .map_err(|e| NotifyError::Unavailable(e.to_string()))?;
        debug!("notification server: {} {}", info.name, info.version);
        Ok(Self)
    }
}

impl AlertBackend for DesktopBackend {
    fn present(&self, alert: &Alert, on_dismiss: DismissGuard) -> Result<(), NotifyError> {
        let mut notification = Notification::new();
        notification
            .appname(APP_NAME)
            .summary(&alert.title)
            .body(&alert.message)
            .action(STOP_ACTION, &alert.action_label);

        thread::Builder::new()
            .name("alert-dismiss".to_string())
            .spawn(move || match notification.show() {
                Ok(handle) => {
                    // Returns for ActionInvoked and NotificationClosed alike.
                    handle.wait_for_action(move |action| {
                        debug!("alert event: {}", action);
                        on_dismiss.fire();
                    });
                }
                Err(e) => warn!("通知を表示できませんでした: {}", e),
            })
            .map_err(|e| NotifyError::ShowFailed(e.to_string()))?;

        Ok(())
    }
}
