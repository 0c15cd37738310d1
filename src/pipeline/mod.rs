//! Telemetry pipeline components.
//!
//! The pipeline connects the telemetry source to sinks through one
//! serialized mutation path:
//!
//! ```text
//! Source → Control Loop (IngestionPipeline + SampleBuffer) → Dispatcher → Sinks
//! ```
//!
//! - **Ingestion Pipeline**: Turns one reading into one buffer mutation
//!   and mediates unit/capacity changes against stored history
//! - **Control Loop**: Funnels readings and control commands into a single
//!   queue so exactly one mutation is in flight at a time
//! - **Dispatcher**: Fans each resulting snapshot out to all sinks with
//!   retry logic

mod control;
mod dispatch;
mod ingest;

pub use ingest::{CapacityStep, IngestionPipeline};

pub(crate) use control::{Command, ControlLoop};
pub(crate) use dispatch::{DispatchCommand, Dispatcher};
