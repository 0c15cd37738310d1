//! Channel-backed telemetry source.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::source::Source;
use crate::Reading;

/// A source that pulls readings from a tokio mpsc channel.
///
/// This is the primary integration point for a real transport: the
/// transport-side code decodes notification payloads into
/// [`Reading`]s and sends them into the channel; the session pulls them
/// out on the other end. Dropping the sender ends the stream, which the
/// session reports as the source stopping.
///
/// # Example
///
/// ```
/// use stream_temp::{ChannelSource, Reading};
/// use tokio::sync::mpsc;
///
/// let (tx, rx) = mpsc::channel::<Reading>(32);
/// let source = ChannelSource::new(rx);
///
/// // Transport side, on each notification:
/// // tx.send(Reading::from_raw(decoded_u16)).await?;
/// ```
pub struct ChannelSource {
    name: String,
    receiver: mpsc::Receiver<Reading>,
}

impl ChannelSource {
    /// Creates a new channel source from a receiver.
    pub fn new(receiver: mpsc::Receiver<Reading>) -> Self {
        Self {
            name: "channel".to_string(),
            receiver,
        }
    }

    /// Creates a new channel source with a custom name.
    pub fn with_name(name: impl Into<String>, receiver: mpsc::Receiver<Reading>) -> Self {
        Self {
            name: name.into(),
            receiver,
        }
    }
}

#[async_trait]
impl Source for ChannelSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn next_reading(&mut self) -> Option<Reading> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_source_delivers_readings() {
        let (tx, rx) = mpsc::channel(4);
        let mut source = ChannelSource::new(rx);

        tx.send(Reading::Measured(19.5)).await.unwrap();
        assert_eq!(source.next_reading().await, Some(Reading::Measured(19.5)));
    }

    #[tokio::test]
    async fn test_channel_source_ends_when_sender_drops() {
        let (tx, rx) = mpsc::channel::<Reading>(4);
        let mut source = ChannelSource::new(rx);

        drop(tx);
        assert_eq!(source.next_reading().await, None);
    }

    #[tokio::test]
    async fn test_channel_source_custom_name() {
        let (_tx, rx) = mpsc::channel(1);
        let source = ChannelSource::with_name("ble-thermometer", rx);
        assert_eq!(source.name(), "ble-thermometer");
    }
}
