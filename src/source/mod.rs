//! Telemetry source abstraction.
//!
//! A [`Source`] is the capability object standing in for the wireless
//! transport: device discovery, connection lifecycle, and payload
//! decoding all happen behind it, and the pipeline only ever sees decoded
//! [`Reading`](crate::Reading)s. Two implementations ship with the crate:
//!
//! - [`ChannelSource`]: Pulls readings from a tokio mpsc channel - the
//!   integration point for a real transport
//! - [`MockSource`]: Scripted readings for testing without hardware

mod channel;
mod mock;

pub use channel::ChannelSource;
pub use mock::MockSource;

use async_trait::async_trait;

use crate::Reading;

/// A producer of decoded telemetry readings.
///
/// The session's source bridge pulls readings one at a time and funnels
/// them into the serialized command queue, so implementations never need
/// to worry about concurrent ingestion.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use stream_temp::{Reading, Source};
///
/// struct ConstantSource {
///     remaining: u32,
/// }
///
/// #[async_trait]
/// impl Source for ConstantSource {
///     fn name(&self) -> &str {
///         "constant"
///     }
///
///     async fn next_reading(&mut self) -> Option<Reading> {
///         if self.remaining == 0 {
///             return None;
///         }
///         self.remaining -= 1;
///         Some(Reading::Measured(21.0))
///     }
/// }
/// ```
#[async_trait]
pub trait Source: Send {
    /// Human-readable name for logging and event reporting.
    fn name(&self) -> &str;

    /// Waits for and returns the next reading.
    ///
    /// Returning `None` means the source has permanently stopped (e.g.
    /// the peripheral disconnected). The window and active unit retain
    /// their last state; control operations keep working.
    async fn next_reading(&mut self) -> Option<Reading>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_is_object_safe() {
        fn assert_boxable(_: Box<dyn Source>) {}
        let _ = assert_boxable;
    }
}
