//! Blocking clip rendering and the shared render-interrupt slot.
//!
//! A render is one full synchronous playback of a clip. The playback loop
//! only checks cancellation between renders, so stopping mid-clip needs an
//! imperative halt on the resource itself; [`RenderSlot`] carries that halt
//! between the loop thread and the stop paths.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::debug;

use super::error::SoundError;

// ============================================================================
// RenderSlot
// ============================================================================

/// Shared handle to the render in progress.
///
/// Exactly one slot is shared between a playback loop and its stop paths.
/// Interruption is level-triggered: once [`interrupt`](Self::interrupt) has
/// been called, an interrupter installed later runs immediately, so a stop
/// request cannot fall between "signal" and "blocking render" and get lost.
#[derive(Clone, Default)]
pub struct RenderSlot {
    inner: Arc<Mutex<SlotState>>,
}

#[derive(Default)]
struct SlotState {
    interrupted: bool,
    halt: Option<Box<dyn FnOnce() + Send>>,
}

impl RenderSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the interrupter for the render about to block.
    ///
    /// If the slot was already interrupted, the interrupter runs at once
    /// instead of being stored.
    pub fn install(&self, halt: impl FnOnce() + Send + 'static) {
        let mut state = self.inner.lock().unwrap();
        if state.interrupted {
            drop(state);
            halt();
        } else {
            state.halt = Some(Box::new(halt));
        }
    }

    /// Discards the interrupter after a render finished on its own.
    pub fn clear(&self) {
        self.inner.lock().unwrap().halt = None;
    }

    /// Halts the render in progress and marks the slot interrupted.
    ///
    /// Idempotent; safe to call with nothing installed.
    pub fn interrupt(&self) {
        let halt = {
            let mut state = self.inner.lock().unwrap();
            state.interrupted = true;
            state.halt.take()
        };
        if let Some(halt) = halt {
            halt();
        }
    }

    /// Returns true once [`interrupt`](Self::interrupt) has been called.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.inner.lock().unwrap().interrupted
    }
}

impl std::fmt::Debug for RenderSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.lock().unwrap();
        f.debug_struct("RenderSlot")
            .field("interrupted", &state.interrupted)
            .field("installed", &state.halt.is_some())
            .finish()
    }
}

// ============================================================================
// Render seam
// ============================================================================

/// Opens render engines on the playback thread.
///
/// The rodio output stream is not `Send`, so the audio device is opened
/// where the loop runs rather than held in a shared player struct.
pub trait RenderBackend: Send + Sync + 'static {
    /// Opens a render engine.
    ///
    /// # Errors
    ///
    /// Returns an error if no audio output device is available.
    fn open(&self) -> Result<Box<dyn RenderEngine>, SoundError>;
}

/// Renders clips one at a time, blocking.
pub trait RenderEngine {
    /// Renders one full clip, blocking until it finishes or the slot
    /// interrupts it.
    ///
    /// The engine installs its interrupter into `slot` before blocking and
    /// clears it afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the clip cannot be opened, decoded, or played.
    /// An interrupted render is not an error.
    fn render(&mut self, path: &Path, slot: &RenderSlot) -> Result<(), SoundError>;
}

// ============================================================================
// Rodio implementation
// ============================================================================

/// Render backend over the default audio output device.
#[derive(Debug, Clone, Copy, Default)]
pub struct RodioBackend;

impl RenderBackend for RodioBackend {
    fn open(&self) -> Result<Box<dyn RenderEngine>, SoundError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("audio output stream initialized");

        Ok(Box::new(RodioEngine {
            _stream: stream,
            handle,
        }))
    }
}

/// One open audio output device.
struct RodioEngine {
    /// Must be kept alive for playback to continue.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl RenderEngine for RodioEngine {
    fn render(&mut self, path: &Path, slot: &RenderSlot) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;
        let sink = Arc::new(
            Sink::try_new(&self.handle).map_err(|e| SoundError::StreamError(e.to_string()))?,
        );

        // Install after append: rodio's append resumes a stopped sink.
        sink.append(decoder);
        slot.install({
            let sink = Arc::clone(&sink);
            move || sink.stop()
        });

        sink.sleep_until_end();
        slot.clear();
        Ok(())
    }
}

// ============================================================================
// Mock implementation
// ============================================================================

/// Mock render backend for tests.
///
/// "Renders" by sleeping in 5 ms steps until the configured clip length
/// elapses or the slot interrupts, and records every call.
#[derive(Debug, Clone)]
pub struct MockBackend {
    clip_length: Duration,
    opens: Arc<AtomicUsize>,
    renders: Arc<AtomicUsize>,
    rendered_paths: Arc<Mutex<Vec<PathBuf>>>,
    fail_open: Arc<AtomicBool>,
    fail_render: Arc<AtomicBool>,
}

impl MockBackend {
    /// Creates a mock backend whose renders take `clip_length`.
    #[must_use]
    pub fn new(clip_length: Duration) -> Self {
        Self {
            clip_length,
            opens: Arc::new(AtomicUsize::new(0)),
            renders: Arc::new(AtomicUsize::new(0)),
            rendered_paths: Arc::new(Mutex::new(Vec::new())),
            fail_open: Arc::new(AtomicBool::new(false)),
            fail_render: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Makes subsequent `open` calls fail.
    pub fn set_fail_open(&self, fail: bool) {
        self.fail_open.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent `render` calls fail.
    pub fn set_fail_render(&self, fail: bool) {
        self.fail_render.store(fail, Ordering::SeqCst);
    }

    /// Number of engines opened so far.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// Number of completed renders so far (interrupted renders included).
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    /// Paths rendered so far, in order.
    #[must_use]
    pub fn rendered_paths(&self) -> Vec<PathBuf> {
        self.rendered_paths.lock().unwrap().clone()
    }
}

impl RenderBackend for MockBackend {
    fn open(&self) -> Result<Box<dyn RenderEngine>, SoundError> {
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(SoundError::DeviceNotAvailable("mock failure".to_string()));
        }
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockEngine {
            backend: self.clone(),
        }))
    }
}

struct MockEngine {
    backend: MockBackend,
}

impl RenderEngine for MockEngine {
    fn render(&mut self, path: &Path, slot: &RenderSlot) -> Result<(), SoundError> {
        if self.backend.fail_render.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("mock failure".to_string()));
        }

        let halted = Arc::new(AtomicBool::new(false));
        slot.install({
            let halted = Arc::clone(&halted);
            move || halted.store(true, Ordering::SeqCst)
        });

        let deadline = Instant::now() + self.backend.clip_length;
        while Instant::now() < deadline && !halted.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(5));
        }

        slot.clear();
        self.backend
            .rendered_paths
            .lock()
            .unwrap()
            .push(path.to_path_buf());
        self.backend.renders.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_install_and_interrupt() {
        let slot = RenderSlot::new();
        let halted = Arc::new(AtomicBool::new(false));

        slot.install({
            let halted = Arc::clone(&halted);
            move || halted.store(true, Ordering::SeqCst)
        });
        assert!(!halted.load(Ordering::SeqCst));

        slot.interrupt();
        assert!(halted.load(Ordering::SeqCst));
        assert!(slot.is_interrupted());
    }

    #[test]
    fn test_slot_interrupt_is_sticky() {
        let slot = RenderSlot::new();
        slot.interrupt();

        // An interrupter installed after the mark must run immediately.
        let halted = Arc::new(AtomicBool::new(false));
        slot.install({
            let halted = Arc::clone(&halted);
            move || halted.store(true, Ordering::SeqCst)
        });
        assert!(halted.load(Ordering::SeqCst));
    }

    #[test]
    fn test_slot_interrupt_idempotent() {
        let slot = RenderSlot::new();
        slot.interrupt();
        slot.interrupt();
        assert!(slot.is_interrupted());
    }

    #[test]
    fn test_slot_clear_discards_interrupter() {
        let slot = RenderSlot::new();
        let halted = Arc::new(AtomicBool::new(false));

        slot.install({
            let halted = Arc::clone(&halted);
            move || halted.store(true, Ordering::SeqCst)
        });
        slot.clear();
        slot.interrupt();

        assert!(!halted.load(Ordering::SeqCst));
    }

    #[test]
    fn test_mock_render_runs_for_clip_length() {
        let backend = MockBackend::new(Duration::from_millis(50));
        let mut engine = backend.open().unwrap();
        let slot = RenderSlot::new();

        let started = Instant::now();
        engine.render(Path::new("alarm.wav"), &slot).unwrap();

        assert!(started.elapsed() >= Duration::from_millis(45));
        assert_eq!(backend.render_count(), 1);
        assert_eq!(backend.rendered_paths(), vec![PathBuf::from("alarm.wav")]);
    }

    #[test]
    fn test_mock_render_interrupts_quickly() {
        let backend = MockBackend::new(Duration::from_secs(10));
        let slot = RenderSlot::new();

        // Engines are opened on the thread that renders, like the playback
        // loop does; boxed engines are not required to be Send.
        let render_backend = backend.clone();
        let render_slot = slot.clone();
        let handle = thread::spawn(move || {
            let mut engine = render_backend.open().unwrap();
            let started = Instant::now();
            engine.render(Path::new("alarm.wav"), &render_slot).unwrap();
            started.elapsed()
        });

        thread::sleep(Duration::from_millis(30));
        slot.interrupt();

        let elapsed = handle.join().unwrap();
        assert!(elapsed < Duration::from_secs(1), "render took {:?}", elapsed);
    }

    #[test]
    fn test_mock_open_failure() {
        let backend = MockBackend::new(Duration::from_millis(10));
        backend.set_fail_open(true);

        let result = backend.open();
        assert!(result.is_err());
        assert_eq!(backend.open_count(), 0);
    }

    #[test]
    fn test_mock_render_failure() {
        let backend = MockBackend::new(Duration::from_millis(10));
        let mut engine = backend.open().unwrap();
        backend.set_fail_render(true);

        let slot = RenderSlot::new();
        let result = engine.render(Path::new("alarm.wav"), &slot);
        assert!(result.is_err());
        assert_eq!(backend.render_count(), 0);
    }

    #[test]
    fn test_rodio_backend_open_no_panic() {
        // May fail in environments without audio hardware; only the absence
        // of a panic is asserted.
        let _ = RodioBackend.open();
    }
}
