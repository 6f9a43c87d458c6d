//! Alarm clip discovery and fallback resolution.
//!
//! The library is a read-only view over a configured directory of `.wav`
//! clips. It holds no state besides the directory path; every query rescans
//! the filesystem.

use std::path::{Path, PathBuf};

use tracing::debug;

/// File name of the guaranteed fallback clip.
pub const DEFAULT_CLIP: &str = "default.wav";

/// Extension matched during clip discovery.
const CLIP_EXTENSION: &str = "wav";

/// Read-only view over the configured sounds directory.
#[derive(Debug, Clone)]
pub struct SoundLibrary {
    sounds_dir: PathBuf,
}

impl SoundLibrary {
    /// Creates a library over `sounds_dir`. The directory does not have to
    /// exist; an absent directory degrades to the default clip identifier.
    #[must_use]
    pub fn new(sounds_dir: impl Into<PathBuf>) -> Self {
        Self {
            sounds_dir: sounds_dir.into(),
        }
    }

    /// Returns the directory this library scans.
    #[must_use]
    pub fn sounds_dir(&self) -> &Path {
        &self.sounds_dir
    }

    /// Returns the available clip file names, sorted lexicographically.
    ///
    /// Never empty: when the directory is missing or contains no `.wav`
    /// files, the result is exactly `["default.wav"]`.
    #[must_use]
    pub fn available_clips(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.sounds_dir) else {
            return vec![DEFAULT_CLIP.to_string()];
        };

        let mut clips: Vec<String> = entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                let ext = path.extension()?.to_string_lossy().to_lowercase();
                if ext != CLIP_EXTENSION {
                    return None;
                }
                Some(path.file_name()?.to_string_lossy().into_owned())
            })
            .collect();

        if clips.is_empty() {
            return vec![DEFAULT_CLIP.to_string()];
        }

        clips.sort();
        clips
    }

    /// Resolves a requested clip to a playable path.
    ///
    /// Fallback chain: the requested clip → `default.wav` → `None`. The
    /// chain carries no signal about which step matched; a typo'd clip name
    /// and an empty library are indistinguishable to the caller.
    ///
    /// An absolute requested path that exists on disk is honored as-is,
    /// which is how a custom clip path override reaches playback.
    #[must_use]
    pub fn resolve(&self, clip: &str) -> Option<PathBuf> {
        let requested = Path::new(clip);
        if requested.is_absolute() {
            if requested.is_file() {
                return Some(requested.to_path_buf());
            }
        } else {
            let path = self.sounds_dir.join(clip);
            if path.is_file() {
                return Some(path);
            }
        }

        let fallback = self.sounds_dir.join(DEFAULT_CLIP);
        if fallback.is_file() {
            debug!("clip '{}' not found, falling back to {}", clip, DEFAULT_CLIP);
            return Some(fallback);
        }

        debug!(
            "no playable clip for '{}' in {}",
            clip,
            self.sounds_dir.display()
        );
        None
    }
}
