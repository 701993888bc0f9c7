//! signtype - Sign-language typing from hand landmarks
//!
//! Turns a stream of per-frame hand landmarks into typed text through a
//! classify-debounce-accumulate pipeline.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod classify;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod encoder;
pub mod error;
pub mod gate;
pub mod landmark;
pub mod pipeline;
pub mod source;
pub mod text;

// Core recognition primitives (landmarks → features → label)
pub use classify::{ClassificationResult, Classifier, LabelTable, SignClassifier};
pub use encoder::{FeatureVector, encode};
pub use landmark::{Landmark, LandmarkSet};

// Commit gating and text assembly
pub use gate::{Clock, CommitEvent, DebounceGate, GateConfig, SystemClock};
pub use text::TextAccumulator;

// Pipeline
pub use pipeline::orchestrator::{Pipeline, PipelineConfig, PipelineHandle};
pub use pipeline::sink::{CollectorSink, DisplaySink, StdoutSink};
pub use pipeline::types::{DisplayState, FrameArrival, FramePayload, PipelineInput};

// Error handling
pub use error::{Result, SigntypeError};

// Config
pub use config::Config;

// Station framework (for advanced users)
pub use pipeline::error::{ErrorReporter, StationError};
pub use pipeline::station::Station;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
