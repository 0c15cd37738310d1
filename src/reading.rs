//! Raw readings delivered by the transport boundary.

/// One decoded notification from the telemetry source.
///
/// This is what crosses the boundary from the wireless transport into the
/// ingestion pipeline. The transport is responsible for decoding and
/// filtering malformed payloads; by the time a `Reading` exists it is
/// valid by construction.
///
/// # Example
///
/// ```
/// use stream_temp::Reading;
///
/// // The device encodes 21.50°C as the 16-bit value 2150.
/// let reading = Reading::from_raw(2150);
/// assert_eq!(reading, Reading::Measured(21.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// A measured temperature, always Celsius-scaled as reported by the
    /// source device.
    Measured(f64),
    /// Request to synthesize a value, used for manual test-data injection.
    /// The pipeline draws a uniform value in `[0, 100)` and stores it
    /// directly in the active display unit.
    Synthetic,
}

impl Reading {
    /// Decodes a raw 16-bit device reading.
    ///
    /// The source device encodes temperatures as an unsigned 16-bit
    /// centidegree value; dividing by 100 yields the Celsius-scaled float
    /// the pipeline expects.
    #[must_use]
    pub fn from_raw(raw: u16) -> Self {
        Reading::Measured(f64::from(raw) / 100.0)
    }
}

impl From<f64> for Reading {
    fn from(celsius: f64) -> Self {
        Reading::Measured(celsius)
    }
}
