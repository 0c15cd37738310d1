//! Configuration types for telemetry streams.

use std::time::Duration;

use crate::DisplayUnit;

/// Configuration for stream behavior.
///
/// Use [`StreamConfig::default()`] for the stated defaults (window of 5,
/// Fahrenheit display), or customize as needed.
///
/// # Example
///
/// ```
/// use stream_temp::{DisplayUnit, StreamConfig};
///
/// let config = StreamConfig {
///     initial_capacity: 12,
///     initial_unit: DisplayUnit::Celsius,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Maximum number of samples the window holds at startup.
    ///
    /// Default: 5
    pub initial_capacity: usize,

    /// Display unit active at startup.
    ///
    /// Default: [`DisplayUnit::Fahrenheit`]
    pub initial_unit: DisplayUnit,

    /// Number of retry attempts for failed sink writes.
    ///
    /// Default: 3
    pub sink_retry_attempts: u32,

    /// Initial delay between sink retry attempts.
    ///
    /// Uses exponential backoff (delay doubles each attempt).
    /// Default: 100ms
    pub sink_retry_delay: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 5,
            initial_unit: DisplayUnit::default(),
            sink_retry_attempts: 3,
            sink_retry_delay: Duration::from_millis(100),
        }
    }
}
