//! Builder pattern for `StreamTemp`.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::pipeline::{Command, ControlLoop, Dispatcher, IngestionPipeline};
use crate::session::{Session, SessionState};
use crate::sink::Sink;
use crate::source::Source;
use crate::{event_callback, EventCallback, StreamConfig, StreamEvent, StreamTempError};

/// Channel capacity for snapshots flowing to the dispatcher.
/// Snapshots arrive at notification cadence (roughly once a second), so a
/// small buffer absorbs any sink hiccup.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 32;

/// Channel capacity for control commands.
const COMMAND_CHANNEL_CAPACITY: usize = 32;

/// Channel capacity for dispatcher commands.
/// Only need 1 since commands are rare (just Stop).
const DISPATCH_COMMAND_CHANNEL_CAPACITY: usize = 1;

/// Builder for configuring and starting a telemetry stream.
///
/// Use [`StreamTemp::builder()`] to create a new builder.
///
/// # Example
///
/// ```ignore
/// use stream_temp::{ChannelSink, ChannelSource, Reading, StreamTemp, WindowSnapshot};
/// use tokio::sync::mpsc;
///
/// let (reading_tx, reading_rx) = mpsc::channel::<Reading>(32);
/// let (snapshot_tx, mut snapshot_rx) = mpsc::channel::<WindowSnapshot>(32);
///
/// let session = StreamTemp::builder()
///     .source(ChannelSource::new(reading_rx))
///     .add_sink(ChannelSink::new(snapshot_tx))
///     .on_event(|e| tracing::warn!(?e, "stream event"))
///     .start()
///     .await?;
///
/// // Transport side: reading_tx.send(Reading::from_raw(raw)).await
/// // Render side:
/// while let Some(snapshot) = snapshot_rx.recv().await {
///     redraw(snapshot.labels(), snapshot.values());
/// }
/// ```
///
/// [`StreamTemp::builder()`]: crate::StreamTemp::builder
#[must_use]
pub struct StreamTempBuilder {
    /// At most one source; multi-stream fan-in is out of scope.
    source: Option<Box<dyn Source>>,
    /// Configured sinks.
    sinks: Vec<Arc<dyn Sink>>,
    /// Event callback.
    event_callback: Option<EventCallback>,
    /// Stream configuration.
    config: StreamConfig,
}

impl Default for StreamTempBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamTempBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            source: None,
            sinks: Vec::new(),
            event_callback: None,
            config: StreamConfig::default(),
        }
    }

    /// Sets the telemetry source.
    ///
    /// A source is optional: without one, the session is driven entirely
    /// by [`Session::ingest()`](crate::Session::ingest) and the control
    /// operations. Setting a source twice replaces the first.
    pub fn source<S: Source + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Adds a sink to receive every published snapshot.
    pub fn add_sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    /// Sets a callback to receive runtime events.
    ///
    /// Events include eviction notices, unit and capacity changes, source
    /// termination, and sink errors.
    pub fn on_event<F>(mut self, callback: F) -> Self
    where
        F: Fn(StreamEvent) + Send + Sync + 'static,
    {
        self.event_callback = Some(event_callback(callback));
        self
    }

    /// Sets custom stream configuration.
    pub fn with_config(mut self, config: StreamConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates the builder configuration.
    fn validate(&self) -> Result<(), StreamTempError> {
        if self.sinks.is_empty() {
            return Err(StreamTempError::NoSinksConfigured);
        }
        Ok(())
    }

    /// Starts the telemetry stream.
    ///
    /// Returns a [`Session`] handle to control the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No sinks are configured
    /// - Any sink fails to start
    pub async fn start(self) -> Result<Session, StreamTempError> {
        self.validate()?;

        let (snapshot_tx, snapshot_rx) = mpsc::channel(SNAPSHOT_CHANNEL_CAPACITY);
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (dispatch_cmd_tx, dispatch_cmd_rx) = mpsc::channel(DISPATCH_COMMAND_CHANNEL_CAPACITY);

        let state = Arc::new(SessionState::new());

        let mut dispatcher = Dispatcher::new(self.sinks.clone(), self.config.clone());
        if let Some(callback) = self.event_callback.clone() {
            dispatcher = dispatcher.with_event_callback(callback);
        }
        dispatcher.start_sinks().await?;

        let dispatch_handle = tokio::spawn(async move {
            dispatcher.run(snapshot_rx, dispatch_cmd_rx).await;
        });

        let control = ControlLoop::new(
            IngestionPipeline::new(&self.config),
            snapshot_tx,
            Arc::clone(&state),
            self.event_callback.clone(),
        );
        let control_handle = tokio::spawn(control.run(cmd_rx));

        let source_handle = self
            .source
            .map(|source| spawn_source_bridge(source, cmd_tx.clone(), self.event_callback.clone()));

        Ok(Session::new(
            state,
            cmd_tx,
            dispatch_cmd_tx,
            control_handle,
            dispatch_handle,
            source_handle,
        ))
    }
}

/// Forwards source readings into the serialized command queue.
///
/// The bridge ends when the source reports termination or when the
/// control loop goes away (the command channel closes).
fn spawn_source_bridge(
    mut source: Box<dyn Source>,
    cmd_tx: mpsc::Sender<Command>,
    event_callback: Option<EventCallback>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                reading = source.next_reading() => {
                    let Some(reading) = reading else {
                        tracing::debug!(source = source.name(), "source ended");
                        if let Some(ref callback) = event_callback {
                            callback(StreamEvent::SourceStopped {
                                name: source.name().to_string(),
                                reason: "reading stream ended".to_string(),
                            });
                        }
                        break;
                    };
                    let command = Command::Ingest { reading, reply: None };
                    if cmd_tx.send(command).await.is_err() {
                        break;
                    }
                }
                () = cmd_tx.closed() => break,
            }
        }
    })
}

/// Main entry point for stream-temp.
///
/// Use [`StreamTemp::builder()`] to start configuring a telemetry stream.
pub struct StreamTemp;

impl StreamTemp {
    /// Creates a new builder for configuring a telemetry stream.
    pub fn builder() -> StreamTempBuilder {
        StreamTempBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::ChannelSink;
    use crate::source::MockSource;

    #[test]
    fn test_builder_default() {
        let builder = StreamTempBuilder::new();
        assert!(builder.source.is_none());
        assert!(builder.sinks.is_empty());
    }

    #[test]
    fn test_builder_rejects_no_sinks() {
        let builder = StreamTemp::builder().source(MockSource::new());

        let result = builder.validate();
        assert!(matches!(result, Err(StreamTempError::NoSinksConfigured)));
    }

    #[test]
    fn test_builder_accepts_sink_without_source() {
        let builder = StreamTemp::builder().add_sink(ChannelSink::new(mpsc::channel(1).0));
        assert!(builder.validate().is_ok());
    }

    #[test]
    fn test_builder_replaces_source() {
        let builder = StreamTemp::builder()
            .source(MockSource::new().with_name("first"))
            .source(MockSource::new().with_name("second"));

        assert_eq!(builder.source.as_ref().map(|s| s.name()), Some("second"));
    }

    #[test]
    fn test_builder_with_config() {
        let config = StreamConfig {
            initial_capacity: 9,
            ..Default::default()
        };
        let builder = StreamTemp::builder().with_config(config);
        assert_eq!(builder.config.initial_capacity, 9);
    }
}
