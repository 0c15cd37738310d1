//! Control loop - the single serialized mutation path for the window.
//!
//! Source readings and control-surface commands funnel into one mpsc
//! queue owned by this task, so exactly one `append`/`set_capacity`/
//! `convert_units` is in flight at a time and no locking is needed around
//! the buffer. Each completed mutation publishes the resulting snapshot
//! to the dispatcher.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::event::EventCallback;
use crate::pipeline::{CapacityStep, IngestionPipeline};
use crate::session::SessionState;
use crate::{DisplayUnit, Reading, StreamEvent, WindowSnapshot};

/// Command sent to the control loop task.
pub(crate) enum Command {
    /// Ingest one reading. Source-delivered readings carry no reply
    /// channel; session-initiated ones do.
    Ingest {
        reading: Reading,
        reply: Option<oneshot::Sender<WindowSnapshot>>,
    },
    /// Change the active display unit, converting stored history.
    SetUnit {
        unit: DisplayUnit,
        reply: Option<oneshot::Sender<WindowSnapshot>>,
    },
    /// Apply a relative capacity adjustment, floored at 1.
    AdjustCapacity {
        step: CapacityStep,
        reply: Option<oneshot::Sender<WindowSnapshot>>,
    },
    /// Fetch the current window without mutating it.
    Snapshot {
        reply: oneshot::Sender<WindowSnapshot>,
    },
    /// Stop the control loop gracefully.
    Stop,
}

/// Owns the ingestion pipeline and processes commands one at a time.
pub(crate) struct ControlLoop {
    pipeline: IngestionPipeline,
    snapshot_tx: mpsc::Sender<WindowSnapshot>,
    state: Arc<SessionState>,
    event_callback: Option<EventCallback>,
}

impl ControlLoop {
    pub(crate) fn new(
        pipeline: IngestionPipeline,
        snapshot_tx: mpsc::Sender<WindowSnapshot>,
        state: Arc<SessionState>,
        event_callback: Option<EventCallback>,
    ) -> Self {
        Self {
            pipeline,
            snapshot_tx,
            state,
            event_callback,
        }
    }

    fn emit_event(&self, event: StreamEvent) {
        if let Some(ref callback) = self.event_callback {
            callback(event);
        }
    }

    fn record_evictions(&self, dropped: usize) {
        if dropped > 0 {
            self.state
                .samples_evicted
                .fetch_add(dropped as u64, Ordering::SeqCst);
            self.emit_event(StreamEvent::SamplesEvicted { dropped });
        }
    }

    /// Publishes a snapshot to the dispatcher.
    ///
    /// A send failure means the dispatcher has already shut down; the
    /// mutation itself still completed, so this is not an error.
    async fn publish(&self, snapshot: WindowSnapshot) {
        if self.snapshot_tx.send(snapshot).await.is_ok() {
            self.state
                .snapshots_published
                .fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn handle_ingest(
        &mut self,
        reading: Reading,
        reply: Option<oneshot::Sender<WindowSnapshot>>,
    ) {
        let len_before = self.pipeline.len();
        let snapshot = self.pipeline.ingest(reading);
        self.state.samples_ingested.fetch_add(1, Ordering::SeqCst);
        self.record_evictions((len_before + 1).saturating_sub(snapshot.len()));

        self.publish(snapshot.clone()).await;
        if let Some(reply) = reply {
            let _ = reply.send(snapshot);
        }
    }

    async fn handle_set_unit(
        &mut self,
        unit: DisplayUnit,
        reply: Option<oneshot::Sender<WindowSnapshot>>,
    ) {
        let previous = self.pipeline.unit();
        let snapshot = self.pipeline.set_display_unit(unit);
        if previous != unit {
            tracing::debug!(%previous, current = %unit, "display unit changed");
            self.emit_event(StreamEvent::UnitChanged {
                previous,
                current: unit,
            });
        }

        self.publish(snapshot.clone()).await;
        if let Some(reply) = reply {
            let _ = reply.send(snapshot);
        }
    }

    async fn handle_adjust_capacity(
        &mut self,
        step: CapacityStep,
        reply: Option<oneshot::Sender<WindowSnapshot>>,
    ) {
        let previous = self.pipeline.capacity();
        let len_before = self.pipeline.len();
        let snapshot = self.pipeline.adjust_capacity(step);
        if snapshot.capacity() != previous {
            self.emit_event(StreamEvent::CapacityChanged {
                previous,
                current: snapshot.capacity(),
            });
        }
        self.record_evictions(len_before.saturating_sub(snapshot.len()));

        self.publish(snapshot.clone()).await;
        if let Some(reply) = reply {
            let _ = reply.send(snapshot);
        }
    }

    /// Runs the control loop until `Stop` or all command senders drop.
    pub(crate) async fn run(mut self, mut cmd_rx: mpsc::Receiver<Command>) {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                Command::Ingest { reading, reply } => self.handle_ingest(reading, reply).await,
                Command::SetUnit { unit, reply } => self.handle_set_unit(unit, reply).await,
                Command::AdjustCapacity { step, reply } => {
                    self.handle_adjust_capacity(step, reply).await;
                }
                Command::Snapshot { reply } => {
                    let _ = reply.send(self.pipeline.snapshot());
                }
                Command::Stop => break,
            }
        }
        tracing::debug!("control loop stopped");
    }
}
