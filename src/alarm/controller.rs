//! Alarm playback session lifecycle.
//!
//! A session is one bounded episode of looped playback: render the clip,
//! pause briefly, repeat until the deadline passes or a stop request
//! arrives. The controller guarantees at most one session at a time and
//! tears the previous one down, bounded, before starting the next.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, TryRecvError};
use tracing::{debug, warn};

use crate::sound::{RenderBackend, RenderSlot, RodioBackend, SoundLibrary};

/// Longest time `start`/`stop` wait for the playback thread to finish.
pub const TEARDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// Pause between two renders of the clip.
const RENDER_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// PlaybackSession
// ============================================================================

/// One bounded episode of looped playback. At most one exists per controller.
struct PlaybackSession {
    /// Cooperative stop flag, level-triggered, shared with the loop thread.
    cancel: Arc<AtomicBool>,
    /// Shared handle to the render in progress.
    slot: RenderSlot,
    /// Closed when the playback thread exits.
    done: Receiver<()>,
}

// ============================================================================
// AlarmController
// ============================================================================

/// Controls looped alarm playback with a bounded duration.
///
/// `start` replaces any running session after a synchronous, bounded
/// teardown; `stop` is idempotent and equally bounded. Neither returns an
/// error: a missing clip, a failing audio device, or a render fault all
/// degrade to a silent alarm.
pub struct AlarmController {
    library: SoundLibrary,
    backend: Arc<dyn RenderBackend>,
    session: Mutex<Option<PlaybackSession>>,
}

impl AlarmController {
    /// Creates a controller playing through the default audio device.
    #[must_use]
    pub fn new(sounds_dir: impl Into<PathBuf>) -> Self {
        Self::with_backend(sounds_dir, Arc::new(RodioBackend))
    }

    /// Creates a controller with a custom render backend.
    #[must_use]
    pub fn with_backend(sounds_dir: impl Into<PathBuf>, backend: Arc<dyn RenderBackend>) -> Self {
        Self {
            library: SoundLibrary::new(sounds_dir),
            backend,
            session: Mutex::new(None),
        }
    }

    /// Returns the available clip file names, sorted. Never empty.
    ///
    /// Pure read; playback state is untouched.
    #[must_use]
    pub fn available_clips(&self) -> Vec<String> {
        self.library.available_clips()
    }

    /// Starts a new playback session, replacing any running one.
    ///
    /// Any previous session is torn down first: cancellation is signaled,
    /// the render in progress is force-stopped, and the playback thread is
    /// awaited for at most [`TEARDOWN_TIMEOUT`]. The clip resolves through
    /// the library's fallback chain; when neither the requested clip nor
    /// `default.wav` exists this is a no-op. The new session loops until
    /// `duration` elapses or [`stop`](Self::stop) is called.
    pub fn start(&self, clip: &str, duration: Duration) {
        let mut session = self.session.lock().unwrap();
        teardown(session.take());

        let Some(clip_path) = self.library.resolve(clip) else {
            debug!("no playable clip for '{}', alarm stays silent", clip);
            return;
        };

        let cancel = Arc::new(AtomicBool::new(false));
        let slot = RenderSlot::new();
        let (done_tx, done_rx) = bounded(1);
        let deadline = Instant::now() + duration;

        let backend = Arc::clone(&self.backend);
        let loop_cancel = Arc::clone(&cancel);
        let loop_slot = slot.clone();
        let spawned = thread::Builder::new()
            .name("alarm-playback".to_string())
            .spawn(move || {
                playback_loop(backend.as_ref(), &clip_path, deadline, &loop_cancel, &loop_slot);
                let _ = done_tx.send(());
            });

        match spawned {
            Ok(_) => {
                *session = Some(PlaybackSession {
                    cancel,
                    slot,
                    done: done_rx,
                });
            }
            Err(e) => warn!("アラーム再生スレッドを起動できませんでした: {}", e),
        }
    }

    /// Stops the current session, if any.
    ///
    /// Idempotent: with no session this is a no-op, and concurrent calls
    /// are serialized so the second observes nothing left to do. Returns
    /// once audio is silent, waiting at most [`TEARDOWN_TIMEOUT`] for the
    /// playback thread itself.
    pub fn stop(&self) {
        let mut session = self.session.lock().unwrap();
        teardown(session.take());
    }

    /// Returns true while the current session's playback thread is running.
    #[must_use]
    pub fn is_ringing(&self) -> bool {
        let session = self.session.lock().unwrap();
        match session.as_ref() {
            Some(s) => matches!(s.done.try_recv(), Err(TryRecvError::Empty)),
            None => false,
        }
    }
}

impl Drop for AlarmController {
    fn drop(&mut self) {
        if let Ok(session) = self.session.get_mut() {
            teardown(session.take());
        }
    }
}

impl std::fmt::Debug for AlarmController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmController")
            .field("library", &self.library)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Teardown and loop body
// ============================================================================

/// Cancels a session and waits, bounded, for its thread to finish.
///
/// The wait observing a timeout is an accepted degradation: the render has
/// already been force-stopped, so the straggler thread can only be sleeping
/// its way to the next cancellation check.
fn teardown(session: Option<PlaybackSession>) {
    let Some(session) = session else { return };

    session.cancel.store(true, Ordering::SeqCst);
    session.slot.interrupt();

    match session.done.recv_timeout(TEARDOWN_TIMEOUT) {
        Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
        Err(RecvTimeoutError::Timeout) => {
            warn!(
                "再生スレッドが{}秒以内に終了しませんでした",
                TEARDOWN_TIMEOUT.as_secs()
            );
        }
    }
}

/// Body of the playback thread.
///
/// Render, check cancellation, pause, check the deadline, repeat. A render
/// fault ends the session; from the caller's point of view it looks like a
/// natural deadline expiry.
fn playback_loop(
    backend: &dyn RenderBackend,
    clip_path: &Path,
    deadline: Instant,
    cancel: &AtomicBool,
    slot: &RenderSlot,
) {
    let mut engine = match backend.open() {
        Ok(engine) => engine,
        Err(e) => {
            warn!("オーディオデバイスを開けませんでした: {}", e);
            return;
        }
    };

    debug!("alarm loop started, clip: {}", clip_path.display());

    while Instant::now() < deadline && !cancel.load(Ordering::SeqCst) {
        if let Err(e) = engine.render(clip_path, slot) {
            debug!("render fault ends the session: {}", e);
            break;
        }
        if cancel.load(Ordering::SeqCst) {
            break;
        }
        thread::sleep(RENDER_INTERVAL);
    }

    debug!("alarm loop finished");
}
