//! Sink trait and implementations for snapshot destinations.
//!
//! A [`Sink`] is any destination that can receive window snapshots. The
//! crate provides one built-in sink:
//!
//! - [`ChannelSink`]: Sends snapshots to a tokio mpsc channel
//!
//! You can implement the [`Sink`] trait for custom destinations like a
//! chart renderer or a metrics exporter.

mod channel;

pub use channel::ChannelSink;

use async_trait::async_trait;

use crate::{SinkError, WindowSnapshot};

/// A destination for window snapshots.
///
/// Sinks receive a fresh snapshot from the dispatcher after every
/// completed buffer mutation. A rendering surface diffs or redraws on
/// each one; nothing in the snapshot requires buffer-internal knowledge.
///
/// # Implementation Notes
///
/// - Methods take `&self` - use interior mutability (`Mutex`, `RwLock`) if needed
/// - All methods are async and run on the tokio runtime
/// - `on_start` is called before any snapshots flow; open resources here
/// - `on_stop` is called during graceful shutdown; clean up here
/// - `write` may be retried after errors; ensure idempotence per snapshot
///
/// # Example
///
/// ```
/// use stream_temp::{Sink, SinkError, WindowSnapshot};
/// use async_trait::async_trait;
///
/// struct PrintSink {
///     name: String,
/// }
///
/// #[async_trait]
/// impl Sink for PrintSink {
///     fn name(&self) -> &str {
///         &self.name
///     }
///
///     async fn write(&self, snapshot: &WindowSnapshot) -> Result<(), SinkError> {
///         for (label, value) in snapshot.labels().iter().zip(snapshot.values()) {
///             println!("{label}: {value:.1}{}", snapshot.unit());
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Sink: Send + Sync {
    /// Human-readable name for logging and error messages.
    fn name(&self) -> &str;

    /// Called once before streaming begins.
    ///
    /// Use this to open connections or allocate resources. Errors here
    /// are fatal and will prevent the stream from starting.
    ///
    /// Default implementation does nothing.
    async fn on_start(&self) -> Result<(), SinkError> {
        Ok(())
    }

    /// Write one window snapshot.
    ///
    /// This is the main method, called for each snapshot the pipeline
    /// publishes. Errors are recoverable - the dispatcher emits a
    /// [`StreamEvent::SinkError`] and retries based on
    /// [`StreamConfig`] settings.
    ///
    /// [`StreamEvent::SinkError`]: crate::StreamEvent::SinkError
    /// [`StreamConfig`]: crate::StreamConfig
    async fn write(&self, snapshot: &WindowSnapshot) -> Result<(), SinkError>;

    /// Called during graceful shutdown.
    ///
    /// This is called even if errors occurred during streaming.
    ///
    /// Default implementation does nothing.
    async fn on_stop(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
