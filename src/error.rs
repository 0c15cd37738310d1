//! Error types for stream-temp.
//!
//! Errors are split into two categories:
//! - **Rejected operations** ([`StreamTempError`]): A requested operation
//!   could not be performed; prior state is left unchanged.
//! - **Recoverable sink failures** ([`SinkError`]): Surfaced via
//!   [`StreamEvent::SinkError`](crate::StreamEvent::SinkError) and retried.

/// Errors returned from pipeline operations and session setup.
///
/// No operation is fatal to the process. A returned error means the
/// operation was rejected and the window, capacity, and active unit are
/// exactly as they were before the call.
#[derive(Debug, thiserror::Error)]
pub enum StreamTempError {
    /// A non-positive window capacity was requested.
    ///
    /// The buffer rejects this rather than silently clamping; the control
    /// surface is expected to floor relative adjustments at 1.
    #[error("invalid capacity: must be at least 1, got {requested}")]
    InvalidCapacity {
        /// The capacity that was requested.
        requested: usize,
    },

    /// No sinks were configured before starting.
    #[error("no sinks configured - add at least one sink")]
    NoSinksConfigured,

    /// A sink failed during initialization.
    #[error("sink '{sink_name}' failed to start: {reason}")]
    SinkStartFailed {
        /// Name of the sink that failed.
        sink_name: String,
        /// Why the sink failed to start.
        reason: String,
    },

    /// The session's control loop has shut down and can no longer accept
    /// commands.
    #[error("session closed")]
    SessionClosed,
}

/// Errors that can occur within a [`Sink`](crate::Sink) implementation.
///
/// Sink errors are recoverable - the dispatcher emits a
/// [`StreamEvent::SinkError`] and retries the write with backoff.
///
/// [`StreamEvent::SinkError`]: crate::StreamEvent::SinkError
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// A write operation failed.
    #[error("write failed: {reason}")]
    WriteFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// The receiving channel was closed.
    #[error("channel closed")]
    ChannelClosed,

    /// Custom error for user-implemented sinks.
    #[error("{0}")]
    Custom(String),
}

impl SinkError {
    /// Creates a custom sink error with the given message.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Creates a write failed error with the given reason.
    pub fn write_failed(reason: impl Into<String>) -> Self {
        Self::WriteFailed {
            reason: reason.into(),
        }
    }
}
