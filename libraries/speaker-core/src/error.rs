//! Error types for the control core

use crate::types::ModeId;
use thiserror::Error;

/// Control-core errors
#[derive(Debug, Error)]
pub enum Error {
    /// Target mode declined entry via its guard
    #[error("mode {0} declined entry")]
    GuardRejected(ModeId),

    /// The active mode failed to release its resources
    #[error("failed to leave mode {mode}: {reason}")]
    ExitFailed { mode: ModeId, reason: String },

    /// The target mode failed to acquire its resources
    #[error("failed to enter mode {mode}: {reason}")]
    EnterFailed { mode: ModeId, reason: String },

    /// A mode switch was requested while another is in flight
    #[error("mode switch already in progress")]
    Reentrant,

    /// Persisted startup options are unavailable or malformed
    #[error("failed to load startup options: {0}")]
    LoadFailed(String),

    /// Persisted startup options could not be written
    #[error("failed to save startup options: {0}")]
    SaveFailed(String),

    /// The event bus was full and the event was not accepted
    #[error("event bus full")]
    QueueOverflow,

    /// The consumer side of the event bus is gone
    #[error("event bus closed")]
    BusClosed,

    /// Domain failure reported by a mode callback
    #[error("{0}")]
    Mode(String),
}

impl Error {
    /// Shorthand for a mode callback failure
    pub fn mode(reason: impl Into<String>) -> Self {
        Self::Mode(reason.into())
    }
}

/// Result type for control-core operations
pub type Result<T> = std::result::Result<T, Error>;
