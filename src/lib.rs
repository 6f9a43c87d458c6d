//! Timerbell Library
//!
//! Alarm coordination for timer utilities. When a countdown owned by an
//! external timer manager reaches zero, this crate:
//! - plays an alarm clip in a loop, bounded by a duration, on its own thread
//! - shows a dismissible notification whose dismissal silences the alarm
//!   immediately, however much playback time remains
//!
//! The two halves are independent. The playback controller never sees the
//! notification layer; the coordinator reaches the controller only through
//! the callback its caller wires in:
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use timerbell::{AlarmController, NotificationCoordinator};
//!
//! let controller = Arc::new(AlarmController::new("sounds"));
//! let coordinator = NotificationCoordinator::new();
//!
//! // A countdown reached zero:
//! controller.start("default.wav", Duration::from_secs(10));
//! let stop = Arc::clone(&controller);
//! coordinator.show("タイマー終了", "3分のタイマーが終了しました", move || stop.stop());
//! ```
//!
//! Either the duration deadline or the dismissal ends the audible alarm;
//! both converge on the same idempotent stop path, and no failure mode in
//! either half ever raises to the caller.

pub mod alarm;
pub mod cli;
pub mod notify;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use alarm::{AlarmController, TEARDOWN_TIMEOUT};
pub use notify::{
    Alert, AlertBackend, DismissGuard, MockAlertBackend, NotificationCoordinator, NotifyError,
};
#[cfg(all(unix, not(target_os = "macos")))]
pub use notify::DesktopBackend;
pub use sound::{
    MockBackend, RenderBackend, RenderEngine, RenderSlot, RodioBackend, SoundError, SoundLibrary,
    DEFAULT_CLIP,
};
pub use types::{AlarmConfig, MAX_DURATION_SECONDS, MIN_DURATION_SECONDS};
