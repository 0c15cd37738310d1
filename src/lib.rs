//! # stream-temp
//!
//! Real-time temperature telemetry with bounded windowing and multi-sink
//! fan-out.
//!
//! `stream-temp` ingests a live stream of decoded temperature readings
//! (as delivered by a wireless peripheral's notifications), converts
//! units on demand, maintains a capacity-bounded sliding window of recent
//! samples, and publishes an immutable snapshot of the window to every
//! registered sink after each mutation.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stream_temp::{ChannelSink, ChannelSource, DisplayUnit, Reading, StreamTemp, WindowSnapshot};
//! use tokio::sync::mpsc;
//!
//! let (reading_tx, reading_rx) = mpsc::channel::<Reading>(32);
//! let (snapshot_tx, mut snapshot_rx) = mpsc::channel::<WindowSnapshot>(32);
//!
//! let session = StreamTemp::builder()
//!     .source(ChannelSource::new(reading_rx))      // transport feeds this
//!     .add_sink(ChannelSink::new(snapshot_tx))     // renderer reads this
//!     .on_event(|e| tracing::warn!(?e, "stream event"))
//!     .start()
//!     .await?;
//!
//! // Redraw the chart on every new snapshot
//! while let Some(snapshot) = snapshot_rx.recv().await {
//!     draw(snapshot.labels(), snapshot.values(), snapshot.unit());
//! }
//!
//! session.stop().await?;
//! ```
//!
//! ## Architecture
//!
//! All window mutations flow through one serialized path:
//!
//! - **Source**: Decoded readings from the transport (or a mock)
//! - **Control Loop**: Single queue merging readings and control
//!   commands, so exactly one mutation is in flight at a time
//! - **Sample Buffer**: Bounded window with FIFO eviction and in-place
//!   unit conversion
//! - **Dispatcher**: Fans each resulting snapshot out to all sinks
//!
//! The synchronous core ([`SampleBuffer`], [`IngestionPipeline`]) is
//! usable directly without the async layer.

#![warn(missing_docs)]
// Sink/Source trait errors are documented on the error types themselves
#![allow(clippy::missing_errors_doc)]
// unwrap/expect allowed in tests only
#![allow(clippy::unwrap_used)]

mod buffer;
mod builder;
mod config;
mod error;
mod event;
mod pipeline;
mod reading;
mod sample;
mod session;
pub mod sink;
pub mod source;
mod unit;

pub use buffer::SampleBuffer;
pub use builder::{StreamTemp, StreamTempBuilder};
pub use config::StreamConfig;
pub use error::{SinkError, StreamTempError};
pub use event::{event_callback, EventCallback, StreamEvent};
pub use pipeline::{CapacityStep, IngestionPipeline};
pub use reading::Reading;
pub use sample::{Sample, WindowSnapshot};
pub use session::{Session, SessionStats};
pub use sink::{ChannelSink, Sink};
pub use source::{ChannelSource, MockSource, Source};
pub use unit::DisplayUnit;
