//! CLI surface of the timerbell binary.
//!
//! The binary is the stand-in for the external timer-management
//! collaborator: per expiry it calls the controller once and the
//! coordinator once, wiring the notification's dismissal to the
//! controller's stop.

pub mod commands;
pub mod display;

pub use commands::{Cli, Commands, ListArgs, RingArgs};
pub use display::Display;
