//! Dispatcher task that fans out snapshots to sinks.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::sink::Sink;
use crate::{EventCallback, StreamConfig, StreamEvent, WindowSnapshot};

/// Command sent to the dispatcher task.
pub enum DispatchCommand {
    /// Stop the dispatcher gracefully.
    Stop,
}

/// The dispatcher receives window snapshots and forwards them to all sinks.
pub struct Dispatcher {
    sinks: Vec<Arc<dyn Sink>>,
    event_callback: Option<EventCallback>,
    config: StreamConfig,
}

impl Dispatcher {
    /// Creates a new dispatcher with the given sinks.
    pub fn new(sinks: Vec<Arc<dyn Sink>>, config: StreamConfig) -> Self {
        Self {
            sinks,
            event_callback: None,
            config,
        }
    }

    /// Sets the event callback.
    pub fn with_event_callback(mut self, callback: EventCallback) -> Self {
        self.event_callback = Some(callback);
        self
    }

    /// Sends an event to the callback if configured.
    fn emit_event(&self, event: StreamEvent) {
        if let Some(ref callback) = self.event_callback {
            callback(event);
        }
    }

    /// Writes a snapshot to a single sink with retry logic.
    async fn write_to_sink(&self, sink: &Arc<dyn Sink>, snapshot: &WindowSnapshot) {
        let mut attempts = 0;
        let mut delay = self.config.sink_retry_delay;

        loop {
            match sink.write(snapshot).await {
                Ok(()) => return,
                Err(e) => {
                    attempts += 1;
                    tracing::warn!(sink = sink.name(), error = %e, "sink write failed");
                    self.emit_event(StreamEvent::SinkError {
                        sink_name: sink.name().to_string(),
                        error: e.to_string(),
                    });

                    if attempts >= self.config.sink_retry_attempts {
                        // Max retries reached, give up on this snapshot
                        return;
                    }

                    // Exponential backoff
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    /// Writes a snapshot to all sinks concurrently.
    pub async fn write_snapshot(&self, snapshot: &WindowSnapshot) {
        let futures: Vec<_> = self
            .sinks
            .iter()
            .map(|sink| self.write_to_sink(sink, snapshot))
            .collect();

        futures::future::join_all(futures).await;
    }

    /// Starts all sinks.
    ///
    /// Returns an error if any sink fails to start.
    pub async fn start_sinks(&self) -> Result<(), crate::StreamTempError> {
        for sink in &self.sinks {
            sink.on_start()
                .await
                .map_err(|e| crate::StreamTempError::SinkStartFailed {
                    sink_name: sink.name().to_string(),
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }

    /// Stops all sinks.
    pub async fn stop_sinks(&self) {
        for sink in &self.sinks {
            if let Err(e) = sink.on_stop().await {
                self.emit_event(StreamEvent::SinkError {
                    sink_name: sink.name().to_string(),
                    error: format!("Error during shutdown: {e}"),
                });
            }
        }
    }

    /// Runs the dispatcher, reading from a channel and writing to sinks.
    ///
    /// This is the main entry point for the dispatcher task.
    pub async fn run(
        self,
        mut snapshot_rx: mpsc::Receiver<WindowSnapshot>,
        mut cmd_rx: mpsc::Receiver<DispatchCommand>,
    ) {
        loop {
            tokio::select! {
                Some(snapshot) = snapshot_rx.recv() => {
                    self.write_snapshot(&snapshot).await;
                }
                Some(cmd) = cmd_rx.recv() => {
                    match cmd {
                        DispatchCommand::Stop => {
                            // Drain remaining snapshots
                            while let Ok(snapshot) = snapshot_rx.try_recv() {
                                self.write_snapshot(&snapshot).await;
                            }
                            break;
                        }
                    }
                }
                else => break,
            }
        }

        self.stop_sinks().await;
    }
}
