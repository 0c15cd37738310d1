//! Telemetry session management.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::pipeline::{CapacityStep, Command, DispatchCommand};
use crate::{DisplayUnit, Reading, StreamTempError, WindowSnapshot};

/// Statistics about a telemetry session.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    /// Total readings ingested into the window.
    pub samples_ingested: u64,
    /// Total samples evicted, by overflow or capacity shrink.
    pub samples_evicted: u64,
    /// Total snapshots published to the dispatcher.
    pub snapshots_published: u64,
}

/// Internal state shared between Session and background tasks.
pub(crate) struct SessionState {
    pub running: AtomicBool,
    pub samples_ingested: AtomicU64,
    pub samples_evicted: AtomicU64,
    pub snapshots_published: AtomicU64,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            running: AtomicBool::new(true),
            samples_ingested: AtomicU64::new(0),
            samples_evicted: AtomicU64::new(0),
            snapshots_published: AtomicU64::new(0),
        }
    }
}

/// Handle to a running telemetry session.
///
/// The `Session` is returned by [`StreamTempBuilder::start()`] and is the
/// control surface for the stream: it drives ingestion, unit selection,
/// and capacity adjustment, each as a command on the same serialized
/// queue the source feeds. Every mutating call resolves to the resulting
/// [`WindowSnapshot`], the same snapshot fanned out to sinks.
///
/// # Lifecycle
///
/// 1. Created by [`StreamTempBuilder::start()`]
/// 2. Readings flow from the source in the background
/// 3. Call [`stop()`](Session::stop) for graceful shutdown
/// 4. Dropping the `Session` also stops the stream (but prefer explicit `stop()`)
///
/// # Example
///
/// ```ignore
/// let session = StreamTemp::builder()
///     .source(ChannelSource::new(rx))
///     .add_sink(ChannelSink::new(tx))
///     .start()
///     .await?;
///
/// let snapshot = session.set_display_unit(DisplayUnit::Celsius).await?;
/// assert_eq!(snapshot.unit(), DisplayUnit::Celsius);
///
/// session.stop().await?;
/// ```
///
/// [`StreamTempBuilder::start()`]: crate::StreamTempBuilder::start
pub struct Session {
    state: Arc<SessionState>,
    cmd_tx: mpsc::Sender<Command>,
    dispatch_cmd_tx: mpsc::Sender<DispatchCommand>,
    control_handle: Option<JoinHandle<()>>,
    dispatch_handle: Option<JoinHandle<()>>,
    source_handle: Option<JoinHandle<()>>,
}

impl Session {
    /// Creates a new session with the given handles.
    pub(crate) fn new(
        state: Arc<SessionState>,
        cmd_tx: mpsc::Sender<Command>,
        dispatch_cmd_tx: mpsc::Sender<DispatchCommand>,
        control_handle: JoinHandle<()>,
        dispatch_handle: JoinHandle<()>,
        source_handle: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            state,
            cmd_tx,
            dispatch_cmd_tx,
            control_handle: Some(control_handle),
            dispatch_handle: Some(dispatch_handle),
            source_handle,
        }
    }

    /// Returns `true` if the session is still running.
    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::SeqCst)
    }

    /// Returns current session statistics.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            samples_ingested: self.state.samples_ingested.load(Ordering::SeqCst),
            samples_evicted: self.state.samples_evicted.load(Ordering::SeqCst),
            snapshots_published: self.state.snapshots_published.load(Ordering::SeqCst),
        }
    }

    /// Ingests one reading, as if delivered by the source.
    ///
    /// Useful for manual test-data injection alongside (or instead of) a
    /// configured source.
    ///
    /// # Errors
    ///
    /// Returns [`StreamTempError::SessionClosed`] if the session has shut
    /// down.
    pub async fn ingest(&self, reading: Reading) -> Result<WindowSnapshot, StreamTempError> {
        self.request(|reply| Command::Ingest {
            reading,
            reply: Some(reply),
        })
        .await
    }

    /// Changes the active display unit, converting stored history.
    ///
    /// # Errors
    ///
    /// Returns [`StreamTempError::SessionClosed`] if the session has shut
    /// down.
    pub async fn set_display_unit(
        &self,
        unit: DisplayUnit,
    ) -> Result<WindowSnapshot, StreamTempError> {
        self.request(|reply| Command::SetUnit {
            unit,
            reply: Some(reply),
        })
        .await
    }

    /// Applies a relative capacity adjustment, floored at 1.
    ///
    /// # Errors
    ///
    /// Returns [`StreamTempError::SessionClosed`] if the session has shut
    /// down.
    pub async fn adjust_capacity(
        &self,
        step: CapacityStep,
    ) -> Result<WindowSnapshot, StreamTempError> {
        self.request(|reply| Command::AdjustCapacity {
            step,
            reply: Some(reply),
        })
        .await
    }

    /// Fetches the current window without mutating it.
    ///
    /// # Errors
    ///
    /// Returns [`StreamTempError::SessionClosed`] if the session has shut
    /// down.
    pub async fn snapshot(&self) -> Result<WindowSnapshot, StreamTempError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    async fn request<F>(&self, make_command: F) -> Result<WindowSnapshot, StreamTempError>
    where
        F: FnOnce(oneshot::Sender<WindowSnapshot>) -> Command,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.cmd_tx
            .send(make_command(reply_tx))
            .await
            .map_err(|_| StreamTempError::SessionClosed)?;
        reply_rx.await.map_err(|_| StreamTempError::SessionClosed)
    }

    /// Gracefully stops the telemetry session.
    ///
    /// This will:
    /// 1. Stop the control loop (pending commands ahead of the stop are
    ///    still applied)
    /// 2. Wait for the source bridge to wind down
    /// 3. Drain queued snapshots to sinks and call `on_stop()` on each
    /// 4. Wait for background tasks to complete
    ///
    /// # Errors
    ///
    /// Returns an error if shutdown fails.
    pub async fn stop(mut self) -> Result<(), StreamTempError> {
        self.stop_internal().await
    }

    async fn stop_internal(&mut self) -> Result<(), StreamTempError> {
        if !self.state.running.swap(false, Ordering::SeqCst) {
            // Already stopped
            return Ok(());
        }

        // Stop the control loop; its exit closes the command channel,
        // which winds down the source bridge
        let _ = self.cmd_tx.send(Command::Stop).await;

        if let Some(handle) = self.control_handle.take() {
            let _ = handle.await;
        }

        if let Some(handle) = self.source_handle.take() {
            let _ = handle.await;
        }

        // Drain the dispatcher and stop sinks
        let _ = self.dispatch_cmd_tx.send(DispatchCommand::Stop).await;

        if let Some(handle) = self.dispatch_handle.take() {
            let _ = handle.await;
        }

        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.state.running.load(Ordering::SeqCst) {
            // Session dropped without explicit stop() - trigger background cleanup
            self.state.running.store(false, Ordering::SeqCst);
            let _ = self.cmd_tx.try_send(Command::Stop);
            let _ = self.dispatch_cmd_tx.try_send(DispatchCommand::Stop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_new() {
        let state = SessionState::new();
        assert!(state.running.load(Ordering::SeqCst));
        assert_eq!(state.samples_ingested.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_session_stats_default() {
        let stats = SessionStats::default();
        assert_eq!(stats.samples_ingested, 0);
        assert_eq!(stats.samples_evicted, 0);
        assert_eq!(stats.snapshots_published, 0);
    }
}
