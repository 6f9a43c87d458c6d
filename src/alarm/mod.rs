//! Alarm playback lifecycle.
//!
//! [`AlarmController`] owns "play clip X repeatedly until duration D elapses
//! or cancellation is requested." It is a leaf component: the notification
//! layer never appears here, and the two only meet through the stop callback
//! an external caller wires between them.

mod controller;

pub use controller::{AlarmController, TEARDOWN_TIMEOUT};
