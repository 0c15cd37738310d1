//! Tokio mpsc channel sink implementation.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::sink::Sink;
use crate::{SinkError, WindowSnapshot};

/// A sink that sends window snapshots to a tokio mpsc channel.
///
/// This is the primary way a rendering surface consumes the window: it
/// receives each new snapshot and redraws from the parallel label/value
/// sequences.
///
/// # Example
///
/// ```
/// use stream_temp::{ChannelSink, WindowSnapshot};
/// use tokio::sync::mpsc;
///
/// let (tx, mut rx) = mpsc::channel::<WindowSnapshot>(32);
/// let sink = ChannelSink::new(tx);
///
/// // Use sink with the StreamTemp builder...
/// // Then receive snapshots:
/// // while let Some(snapshot) = rx.recv().await { redraw(&snapshot); }
/// ```
pub struct ChannelSink {
    name: String,
    sender: mpsc::Sender<WindowSnapshot>,
}

impl ChannelSink {
    /// Creates a new channel sink with the given sender.
    ///
    /// Size the channel for your consumer's redraw speed; a capacity of
    /// 32 is plenty for a chart that redraws per snapshot.
    pub fn new(sender: mpsc::Sender<WindowSnapshot>) -> Self {
        Self {
            name: "channel".to_string(),
            sender,
        }
    }

    /// Creates a new channel sink with a custom name.
    pub fn with_name(name: impl Into<String>, sender: mpsc::Sender<WindowSnapshot>) -> Self {
        Self {
            name: name.into(),
            sender,
        }
    }
}

#[async_trait]
impl Sink for ChannelSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write(&self, snapshot: &WindowSnapshot) -> Result<(), SinkError> {
        self.sender
            .send(snapshot.clone())
            .await
            .map_err(|_| SinkError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DisplayUnit, Sample};

    fn snapshot(values: &[f64]) -> WindowSnapshot {
        let samples: Vec<Sample> = values.iter().map(|&v| Sample::now(v)).collect();
        WindowSnapshot::new(samples, 5, DisplayUnit::Fahrenheit)
    }

    #[tokio::test]
    async fn test_channel_sink_sends_snapshots() {
        let (tx, mut rx) = mpsc::channel::<WindowSnapshot>(10);
        let sink = ChannelSink::new(tx);

        sink.write(&snapshot(&[70.0, 71.0])).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.values(), vec![70.0, 71.0]);
    }

    #[tokio::test]
    async fn test_channel_sink_closed() {
        let (tx, rx) = mpsc::channel::<WindowSnapshot>(10);
        let sink = ChannelSink::new(tx);

        drop(rx);

        let result = sink.write(&snapshot(&[70.0])).await;
        assert!(matches!(result, Err(SinkError::ChannelClosed)));
    }

    #[tokio::test]
    async fn test_channel_sink_custom_name() {
        let (tx, _rx) = mpsc::channel::<WindowSnapshot>(10);
        let sink = ChannelSink::with_name("chart", tx);
        assert_eq!(sink.name(), "chart");
    }
}
