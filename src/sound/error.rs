//! Sound system error types.
//!
//! These errors exist at the render seam only. The alarm controller swallows
//! every one of them: a failing device or a broken clip file degrades to a
//! silent alarm, never to an error surfaced to the caller.

use thiserror::Error;

/// Errors that can occur while rendering an alarm clip.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio output device is not available (e.g., no sound hardware).
    #[error("オーディオデバイスが利用できません: {0}")]
    DeviceNotAvailable(String),

    /// Clip file was not found at the resolved path.
    #[error("サウンドファイルが見つかりません: {0}")]
    FileNotFound(String),

    /// Failed to decode the clip file.
    #[error("サウンドファイルのデコードに失敗しました: {0}")]
    DecodeError(String),

    /// Failed to create the playback sink on the output stream.
    #[error("オーディオストリームの作成に失敗しました: {0}")]
    StreamError(String),

    /// Generic playback failure.
    #[error("サウンド再生エラー: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error is related to the clip file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }
}
