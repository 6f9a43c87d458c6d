//! Notification system error types.
//!
//! Like the sound errors, these never cross the coordinator's public API:
//! an unavailable server or a failed presentation degrades to "no
//! notification shown."

use thiserror::Error;

/// Errors that can occur in the notification system.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The notification server is not reachable.
    #[error("通知サーバに接続できません: {0}")]
    Unavailable(String),

    /// Failed to present the alert.
    #[error("通知の表示に失敗しました: {0}")]
    ShowFailed(String),

    /// The platform has no notification backend.
    #[error("このプラットフォームでは通知を利用できません")]
    Unsupported,
}

impl NotifyError {
    /// Returns true if this error means no backend will ever be available.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Unsupported)
    }
}
