//! Frame pipeline for sign typing.
//!
//! Stations run in their own threads connected by bounded crossbeam channels.
//! All mutable recognition state (gate, text buffer) lives in a single
//! recognizer station, so arrivals are processed strictly one at a time, in
//! arrival order, never overlapping.

pub mod error;
pub mod orchestrator;
pub mod recognizer;
pub mod sink;
pub mod station;
pub mod types;

pub use error::{ErrorReporter, LogReporter, StationError};
pub use orchestrator::{Pipeline, PipelineConfig, PipelineHandle};
pub use recognizer::RecognizerStation;
pub use sink::{CollectorSink, DisplaySink, StdoutSink};
pub use station::{Station, StationRunner};
pub use types::{DisplayState, FrameArrival, FramePayload, PipelineInput};
