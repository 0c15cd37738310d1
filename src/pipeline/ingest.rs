//! Ingestion pipeline - turns readings into buffer mutations.

use rand::Rng;

use crate::buffer::SampleBuffer;
use crate::{DisplayUnit, Reading, Sample, StreamConfig, StreamTempError, WindowSnapshot};

/// Relative capacity adjustment, as driven by a +/- control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityStep {
    /// Grow the window by one sample.
    Up,
    /// Shrink the window by one sample, floored at 1.
    Down,
}

/// The ingestion pipeline: one reading in, one buffer mutation out.
///
/// The pipeline owns the [`SampleBuffer`] and exactly one further piece of
/// state: the active [`DisplayUnit`]. Measured readings arrive
/// Celsius-scaled from the device and are converted on the way in when the
/// active unit is Fahrenheit; unit changes are applied retroactively to
/// the stored history, which is the only surviving record of past samples.
///
/// All operations are synchronous and bounded by the window size. The
/// async layer ([`StreamTemp`](crate::StreamTemp)) serializes calls
/// through a single command queue; the pipeline itself assumes one
/// mutation at a time.
///
/// # Example
///
/// ```
/// use stream_temp::{DisplayUnit, IngestionPipeline, Reading, StreamConfig};
///
/// let mut pipeline = IngestionPipeline::new(&StreamConfig::default());
///
/// // 0°C from the device, stored as 32°F under the default unit
/// let snapshot = pipeline.ingest(Reading::Measured(0.0));
/// assert_eq!(snapshot.values(), vec![32.0]);
///
/// // Switching units re-expresses stored history
/// let snapshot = pipeline.set_display_unit(DisplayUnit::Celsius);
/// assert_eq!(snapshot.values(), vec![0.0]);
/// ```
#[derive(Debug)]
pub struct IngestionPipeline {
    buffer: SampleBuffer,
    unit: DisplayUnit,
}

impl IngestionPipeline {
    /// Creates a pipeline with the configured initial capacity and unit.
    pub fn new(config: &StreamConfig) -> Self {
        Self {
            buffer: SampleBuffer::new(config.initial_capacity, config.initial_unit),
            unit: config.initial_unit,
        }
    }

    /// Ingests one reading: convert, timestamp, append.
    ///
    /// A [`Reading::Measured`] value is Celsius-scaled and is converted to
    /// the *current* display unit before storage when that unit is
    /// Fahrenheit. A [`Reading::Synthetic`] request draws a uniform value
    /// in `[0, 100)` and stores it directly in the active unit with no
    /// conversion. The sample is stamped with the wall-clock instant of
    /// ingestion.
    pub fn ingest(&mut self, reading: Reading) -> WindowSnapshot {
        let value = match reading {
            Reading::Measured(celsius) => {
                DisplayUnit::Celsius.convert_to(self.unit, celsius)
            }
            Reading::Synthetic => rand::rng().random_range(0.0..100.0),
        };
        self.buffer.append(Sample::now(value))
    }

    /// Changes the active display unit, converting stored history.
    ///
    /// Delegates to [`SampleBuffer::convert_units`] so already-buffered
    /// samples are re-expressed exactly once per change. A same-unit call
    /// leaves values untouched.
    pub fn set_display_unit(&mut self, new_unit: DisplayUnit) -> WindowSnapshot {
        let previous = self.unit;
        self.unit = new_unit;
        self.buffer.convert_units(previous, new_unit)
    }

    /// Applies a relative capacity adjustment, floored at 1.
    ///
    /// The floor means the underlying
    /// [`SampleBuffer::set_capacity`] contract cannot be violated from
    /// this entry point.
    pub fn adjust_capacity(&mut self, step: CapacityStep) -> WindowSnapshot {
        let current = self.buffer.capacity();
        let requested = match step {
            CapacityStep::Up => current.saturating_add(1),
            CapacityStep::Down => current.saturating_sub(1).max(1),
        };
        // requested >= 1, so the buffer cannot reject it
        self.buffer
            .set_capacity(requested)
            .unwrap_or_else(|_| self.buffer.snapshot())
    }

    /// Sets an absolute window capacity.
    ///
    /// # Errors
    ///
    /// Returns [`StreamTempError::InvalidCapacity`] for a capacity of 0,
    /// leaving prior state unchanged.
    pub fn set_capacity(&mut self, new_capacity: usize) -> Result<WindowSnapshot, StreamTempError> {
        self.buffer.set_capacity(new_capacity)
    }

    /// Returns a read-only snapshot of the current window.
    pub fn snapshot(&self) -> WindowSnapshot {
        self.buffer.snapshot()
    }

    /// The active display unit.
    pub fn unit(&self) -> DisplayUnit {
        self.unit
    }

    /// Current window capacity.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Number of samples currently retained.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
