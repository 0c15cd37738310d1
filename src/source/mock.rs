//! Mock telemetry source for testing without hardware.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;

use crate::source::Source;
use crate::Reading;

/// A mock source that replays scripted readings.
///
/// This allows testing the full pipeline without a wireless peripheral,
/// making it suitable for CI environments. Readings are delivered in the
/// order they were queued, optionally paced by a fixed interval.
///
/// # Example
///
/// ```
/// use stream_temp::MockSource;
///
/// let source = MockSource::new()
///     .with_measured(21.5)
///     .with_raw(2250)      // device wire encoding of 22.50°C
///     .with_synthetic();
/// assert_eq!(source.remaining(), 3);
/// ```
pub struct MockSource {
    name: String,
    readings: VecDeque<Reading>,
    interval: Option<Duration>,
}

impl MockSource {
    /// Creates an empty mock source.
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            readings: VecDeque::new(),
            interval: None,
        }
    }

    /// Sets a custom source name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Queues a measured Celsius-scaled reading.
    #[must_use]
    pub fn with_measured(mut self, celsius: f64) -> Self {
        self.readings.push_back(Reading::Measured(celsius));
        self
    }

    /// Queues a reading in the device's raw 16-bit wire encoding.
    #[must_use]
    pub fn with_raw(mut self, raw: u16) -> Self {
        self.readings.push_back(Reading::from_raw(raw));
        self
    }

    /// Queues a synthetic-value request.
    #[must_use]
    pub fn with_synthetic(mut self) -> Self {
        self.readings.push_back(Reading::Synthetic);
        self
    }

    /// Paces delivery with a fixed delay before each reading.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Number of readings not yet delivered.
    pub fn remaining(&self) -> usize {
        self.readings.len()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn next_reading(&mut self) -> Option<Reading> {
        let reading = self.readings.pop_front()?;
        if let Some(interval) = self.interval {
            tokio::time::sleep(interval).await;
        }
        Some(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source_replays_in_order() {
        let mut source = MockSource::new()
            .with_measured(1.0)
            .with_measured(2.0)
            .with_synthetic();

        assert_eq!(source.next_reading().await, Some(Reading::Measured(1.0)));
        assert_eq!(source.next_reading().await, Some(Reading::Measured(2.0)));
        assert_eq!(source.next_reading().await, Some(Reading::Synthetic));
        assert_eq!(source.next_reading().await, None);
    }

    #[tokio::test]
    async fn test_mock_source_raw_decoding() {
        let mut source = MockSource::new().with_raw(2150);
        assert_eq!(source.next_reading().await, Some(Reading::Measured(21.5)));
    }

    #[tokio::test]
    async fn test_mock_source_exhausted_stays_exhausted() {
        let mut source = MockSource::new();
        assert_eq!(source.next_reading().await, None);
        assert_eq!(source.next_reading().await, None);
    }

    #[test]
    fn test_mock_source_name() {
        let source = MockSource::new().with_name("thermometer");
        assert_eq!(source.name(), "thermometer");
    }
}
