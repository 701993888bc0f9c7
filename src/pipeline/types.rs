//! Data types flowing through the frame pipeline.

use crate::landmark::LandmarkSet;
use std::time::Instant;

/// What the extractor delivered for one analyzed frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FramePayload {
    /// A hand was detected; exactly 21 landmarks.
    Landmarks(LandmarkSet),
    /// No hand in this frame. Expected, not an error.
    NoHand,
    /// The extractor reported a failure for this frame. Gated like a
    /// no-detection, surfaced as a diagnostic.
    ExtractionFailed(String),
}

/// One frame arrival from the landmark source.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameArrival {
    pub payload: FramePayload,
    /// Timestamp when the arrival entered the pipeline.
    pub timestamp: Instant,
    /// Sequence number for ordering and drop diagnostics.
    pub sequence: u64,
}

impl FrameArrival {
    pub fn new(payload: FramePayload, timestamp: Instant, sequence: u64) -> Self {
        Self {
            payload,
            timestamp,
            sequence,
        }
    }
}

/// Input to the recognizer station.
///
/// Clear requests travel the same channel as frames, so buffer and gate reset
/// atomically with respect to frame processing.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineInput {
    Frame(FrameArrival),
    Clear,
}

/// Published display state: live classification feedback plus the full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    /// `"label (confidence%)"` for the current frame, or the no-sign
    /// placeholder.
    pub classification: String,
    /// The accumulated text buffer verbatim.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::sample_set;

    #[test]
    fn frame_arrival_carries_sequence_and_timestamp() {
        let timestamp = Instant::now();
        let arrival = FrameArrival::new(FramePayload::NoHand, timestamp, 7);
        assert_eq!(arrival.sequence, 7);
        assert_eq!(arrival.timestamp, timestamp);
        assert_eq!(arrival.payload, FramePayload::NoHand);
    }

    #[test]
    fn payload_variants_compare() {
        let a = FramePayload::Landmarks(sample_set());
        let b = FramePayload::Landmarks(sample_set());
        assert_eq!(a, b);
        assert_ne!(a, FramePayload::NoHand);
        assert_ne!(
            FramePayload::ExtractionFailed("x".into()),
            FramePayload::ExtractionFailed("y".into())
        );
    }
}
