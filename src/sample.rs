//! Telemetry sample and window snapshot types.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::DisplayUnit;

/// A single timestamped temperature reading.
///
/// `Sample` is the fundamental unit of data held by the window. The value
/// is always expressed in the display unit that was active when the
/// sample was stored (or last converted); the timestamp is the wall-clock
/// instant of ingestion and never changes.
///
/// # Example
///
/// ```
/// use stream_temp::Sample;
///
/// let sample = Sample::now(72.5);
/// assert_eq!(sample.value, 72.5);
/// // "14:03:57" style label, locale-independent
/// assert_eq!(sample.time_label().len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Wall-clock instant the reading was ingested.
    pub timestamp: DateTime<Utc>,
    /// Temperature in the display unit active at storage time.
    pub value: f64,
}

impl Sample {
    /// Creates a sample with an explicit timestamp.
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Creates a sample timestamped with the current wall-clock time.
    pub fn now(value: f64) -> Self {
        Self::new(Utc::now(), value)
    }

    /// Formats the timestamp as a locale-independent `HH:MM:SS` label.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// An immutable, read-only view of the window at a point in time.
///
/// Snapshots are produced by every buffer mutation and are the only way
/// consumers observe the window; the window itself is never handed out
/// mutably. Samples are stored in an `Arc<[Sample]>` so cloning a
/// snapshot for fan-out to multiple sinks is cheap.
///
/// The parallel [`labels()`](Self::labels) and [`values()`](Self::values)
/// sequences, together with [`capacity()`](Self::capacity) and
/// [`unit()`](Self::unit), are sufficient to redraw a chart without any
/// knowledge of the buffer internals.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSnapshot {
    samples: Arc<[Sample]>,
    capacity: usize,
    unit: DisplayUnit,
}

impl WindowSnapshot {
    /// Creates a snapshot from an ordered sequence of samples.
    pub(crate) fn new(
        samples: impl Into<Arc<[Sample]>>,
        capacity: usize,
        unit: DisplayUnit,
    ) -> Self {
        Self {
            samples: samples.into(),
            capacity,
            unit,
        }
    }

    /// The retained samples, oldest first.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Time labels for each sample, in window order.
    pub fn labels(&self) -> Vec<String> {
        self.samples.iter().map(Sample::time_label).collect()
    }

    /// Sample values in window order, parallel to [`labels()`](Self::labels).
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    /// Number of samples currently retained.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples the window may hold at rest.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The display unit all sample values are expressed in.
    pub fn unit(&self) -> DisplayUnit {
        self.unit
    }
}
