//! Alarm sound system.
//!
//! This module provides the audio half of the alarm core:
//!
//! - Clip discovery over a configured directory, with a guaranteed fallback
//! - Blocking, force-stoppable clip rendering
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundLibrary   │ ← clip names, fallback resolution
//! └──────────────────┘
//! ┌──────────────────┐     ┌──────────────────┐
//! │  RenderBackend   │────▶│   RenderEngine   │ ← one blocking render
//! │  (device seam)   │     └────────┬─────────┘
//! └──────────────────┘              │ installs interrupter
//!                                   ▼
//!                          ┌──────────────────┐
//!                          │    RenderSlot    │ ← shared with stop paths
//!                          └──────────────────┘
//! ```
//!
//! The backend seam has a rodio implementation for real playback and a mock
//! that renders by interruptible sleeping, so every timing property of the
//! alarm loop is testable without audio hardware.

mod error;
mod library;
mod render;

pub use error::SoundError;
pub use library::{SoundLibrary, DEFAULT_CLIP};
pub use render::{MockBackend, RenderBackend, RenderEngine, RenderSlot, RodioBackend};
