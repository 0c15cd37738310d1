//! Runtime events for monitoring stream health.
//!
//! Events are non-fatal notifications about stream behavior. The stream
//! continues running after events are emitted - they're for logging and
//! metrics, not error handling.

use std::sync::Arc;

use crate::DisplayUnit;

/// Runtime events emitted during telemetry capture.
///
/// These are informational events, not errors. The stream continues
/// running after any event is emitted. Use the [`EventCallback`] to log
/// these or update metrics.
///
/// # Example
///
/// ```
/// use stream_temp::StreamEvent;
///
/// fn handle_event(event: StreamEvent) {
///     match event {
///         StreamEvent::SamplesEvicted { dropped } => {
///             eprintln!("window dropped {dropped} oldest sample(s)");
///         }
///         StreamEvent::UnitChanged { previous, current } => {
///             eprintln!("display unit: {previous} -> {current}");
///         }
///         StreamEvent::CapacityChanged { previous, current } => {
///             eprintln!("capacity: {previous} -> {current}");
///         }
///         StreamEvent::SourceStopped { name, reason } => {
///             eprintln!("source {name} stopped: {reason}");
///         }
///         StreamEvent::SinkError { sink_name, error } => {
///             eprintln!("sink '{sink_name}' error: {error}");
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// The window evicted its oldest samples to stay within capacity.
    ///
    /// Emitted both when an append overflows a full window and when a
    /// capacity shrink forces eviction.
    SamplesEvicted {
        /// Number of samples removed, oldest first.
        dropped: usize,
    },

    /// The active display unit changed and stored history was converted.
    UnitChanged {
        /// Unit before the change.
        previous: DisplayUnit,
        /// Unit now in effect.
        current: DisplayUnit,
    },

    /// The window capacity changed.
    CapacityChanged {
        /// Capacity before the change.
        previous: usize,
        /// Capacity now in effect.
        current: usize,
    },

    /// The telemetry source stopped delivering readings.
    ///
    /// The window and active unit retain their last state; control
    /// operations keep working.
    SourceStopped {
        /// Name of the source that stopped.
        name: String,
        /// Why the source stopped.
        reason: String,
    },

    /// A sink encountered an error during write.
    ///
    /// The dispatcher retries according to
    /// [`StreamConfig`](crate::StreamConfig) settings.
    SinkError {
        /// Name of the sink that errored.
        sink_name: String,
        /// Description of the error.
        error: String,
    },
}

/// Callback type for receiving runtime events.
///
/// Register an event callback via [`StreamTempBuilder::on_event()`] to
/// receive notifications about evictions, unit/capacity changes, and sink
/// errors.
///
/// [`StreamTempBuilder::on_event()`]: crate::StreamTempBuilder::on_event
pub type EventCallback = Arc<dyn Fn(StreamEvent) + Send + Sync>;

/// Creates an [`EventCallback`] from a closure.
///
/// This is a convenience function for creating event callbacks without
/// manually wrapping in `Arc`.
///
/// # Example
///
/// ```
/// use stream_temp::{event_callback, StreamEvent};
///
/// let callback = event_callback(|event| {
///     println!("Got event: {event:?}");
/// });
/// ```
pub fn event_callback<F>(f: F) -> EventCallback
where
    F: Fn(StreamEvent) + Send + Sync + 'static,
{
    Arc::new(f)
}
