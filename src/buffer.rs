//! Capacity-bounded sample window.

use std::collections::VecDeque;

use crate::{DisplayUnit, Sample, StreamTempError, WindowSnapshot};

/// An ordered, capacity-bounded sequence of samples.
///
/// The buffer exclusively owns the window; every mutation returns an
/// immutable [`WindowSnapshot`] and consumers never receive a mutable
/// reference. After any completed operation the window holds at most
/// `capacity` samples, with eviction strictly oldest-first.
///
/// # Example
///
/// ```
/// use stream_temp::{DisplayUnit, Sample, SampleBuffer};
///
/// let mut buffer = SampleBuffer::new(2, DisplayUnit::Fahrenheit);
/// buffer.append(Sample::now(70.0));
/// buffer.append(Sample::now(71.0));
/// let snapshot = buffer.append(Sample::now(72.0));
///
/// // Oldest sample evicted, newest two retained in order
/// assert_eq!(snapshot.values(), vec![71.0, 72.0]);
/// ```
#[derive(Debug)]
pub struct SampleBuffer {
    window: VecDeque<Sample>,
    capacity: usize,
    /// Unit the stored values are currently expressed in. Carried on
    /// snapshots so consumers can label the axis; the *active* unit
    /// policy lives in the ingestion pipeline.
    unit: DisplayUnit,
}

impl SampleBuffer {
    /// Creates an empty buffer with the given capacity.
    ///
    /// A capacity of 0 is accepted and degenerates to an always-empty
    /// window; [`set_capacity`](Self::set_capacity) enforces the
    /// positive-capacity contract for runtime changes.
    pub fn new(capacity: usize, unit: DisplayUnit) -> Self {
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            unit,
        }
    }

    /// Appends a sample at the end of the window.
    ///
    /// If the resulting length exceeds capacity, samples are evicted from
    /// the front until `len == capacity`. Always succeeds.
    pub fn append(&mut self, sample: Sample) -> WindowSnapshot {
        self.window.push_back(sample);
        self.evict_to_capacity();
        self.snapshot()
    }

    /// Changes the window capacity.
    ///
    /// Shrinking below the current length evicts oldest samples until
    /// `len == new_capacity`; growing never refills evicted history.
    ///
    /// # Errors
    ///
    /// Returns [`StreamTempError::InvalidCapacity`] for a capacity of 0,
    /// leaving the window and capacity unchanged.
    pub fn set_capacity(&mut self, new_capacity: usize) -> Result<WindowSnapshot, StreamTempError> {
        if new_capacity == 0 {
            return Err(StreamTempError::InvalidCapacity {
                requested: new_capacity,
            });
        }
        self.capacity = new_capacity;
        self.evict_to_capacity();
        Ok(self.snapshot())
    }

    /// Rewrites every stored value from one unit to another, in place.
    ///
    /// Timestamps and order are preserved. A same-unit conversion is a
    /// no-op. The conversion is applied destructively to stored history:
    /// the stored values are the only source of truth for past samples,
    /// so it runs exactly once per unit change.
    pub fn convert_units(&mut self, from: DisplayUnit, to: DisplayUnit) -> WindowSnapshot {
        if from != to {
            for sample in &mut self.window {
                sample.value = from.convert_to(to, sample.value);
            }
        }
        self.unit = to;
        self.snapshot()
    }

    /// Returns a read-only snapshot of the current window.
    pub fn snapshot(&self) -> WindowSnapshot {
        let samples: Vec<Sample> = self.window.iter().copied().collect();
        WindowSnapshot::new(samples, self.capacity, self.unit)
    }

    /// Number of samples currently retained.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Returns `true` if the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Current window capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Unit the stored values are expressed in.
    pub fn unit(&self) -> DisplayUnit {
        self.unit
    }

    fn evict_to_capacity(&mut self) {
        while self.window.len() > self.capacity {
            self.window.pop_front();
        }
    }
}
