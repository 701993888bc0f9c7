//! The recognizer station: encode → classify → gate → accumulate.

use crate::classify::Classifier;
use crate::defaults;
use crate::encoder::encode;
use crate::gate::{Clock, DebounceGate, SystemClock};
use crate::pipeline::error::StationError;
use crate::pipeline::station::Station;
use crate::pipeline::types::{DisplayState, FramePayload, PipelineInput};
use crate::text::TextAccumulator;
use std::sync::Arc;

/// Runs the full per-frame chain and owns all mutable recognition state.
///
/// The gate and the text buffer are owned exclusively here and mutated only
/// from the station's single thread; nothing else in the process touches
/// them. That is the entire concurrency story for commit decisions.
pub struct RecognizerStation<C: Clock = SystemClock> {
    classifier: Arc<dyn Classifier>,
    gate: DebounceGate<C>,
    text: TextAccumulator,
}

impl<C: Clock> RecognizerStation<C> {
    pub fn new(classifier: Arc<dyn Classifier>, gate: DebounceGate<C>) -> Self {
        Self {
            classifier,
            gate,
            text: TextAccumulator::new(),
        }
    }

    fn display(&self, classification: String) -> DisplayState {
        DisplayState {
            classification,
            text: self.text.current_text().to_string(),
        }
    }
}

impl<C: Clock + Send + 'static> Station for RecognizerStation<C> {
    type Input = PipelineInput;
    type Output = DisplayState;

    fn name(&self) -> &'static str {
        "recognizer"
    }

    fn process(&mut self, input: PipelineInput) -> Result<Option<DisplayState>, StationError> {
        match input {
            PipelineInput::Clear => {
                // Buffer and gate reset together; nothing can interleave
                // because this station is the pipeline's only mutation point.
                self.text.clear();
                self.gate.reset();
                Ok(Some(self.display(defaults::NO_SIGN_PLACEHOLDER.to_string())))
            }
            PipelineInput::Frame(arrival) => {
                let result = match &arrival.payload {
                    FramePayload::Landmarks(set) => self.classifier.classify(&encode(set)),
                    FramePayload::NoHand => None,
                    FramePayload::ExtractionFailed(message) => {
                        eprintln!(
                            "signtype: extraction failed for frame {}: {}",
                            arrival.sequence, message
                        );
                        None
                    }
                };

                let classification = match &result {
                    Some(r) => format!("{} ({:.2}%)", r.label, r.confidence),
                    None => defaults::NO_SIGN_PLACEHOLDER.to_string(),
                };

                if let Some(commit) = self.gate.observe(result.as_ref()) {
                    self.text.append(&commit.label);
                }

                Ok(Some(self.display(classification)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{ClassificationResult, MockClassifier};
    use crate::gate::{GateConfig, MockClock};
    use crate::landmark::sample_set;
    use crate::pipeline::types::FrameArrival;
    use std::time::{Duration, Instant};

    fn station_with(
        classifier: MockClassifier,
        clock: MockClock,
    ) -> RecognizerStation<MockClock> {
        let gate = DebounceGate::with_clock(
            GateConfig {
                min_confidence: 95.0,
                cooldown: Duration::from_millis(1000),
            },
            clock,
        );
        RecognizerStation::new(Arc::new(classifier), gate)
    }

    fn frame(payload: FramePayload, sequence: u64) -> PipelineInput {
        PipelineInput::Frame(FrameArrival::new(payload, Instant::now(), sequence))
    }

    #[test]
    fn confident_frame_commits_and_formats_display() {
        let classifier = MockClassifier::new().with_result("A", 97.5);
        let mut station = station_with(classifier, MockClock::new());

        let state = station
            .process(frame(FramePayload::Landmarks(sample_set()), 0))
            .unwrap()
            .unwrap();
        assert_eq!(state.classification, "A (97.50%)");
        assert_eq!(state.text, "A");
    }

    #[test]
    fn no_hand_shows_placeholder_and_keeps_text() {
        let classifier = MockClassifier::new().with_result("A", 97.5);
        let clock = MockClock::new();
        let mut station = station_with(classifier, clock);

        station
            .process(frame(FramePayload::Landmarks(sample_set()), 0))
            .unwrap();
        let state = station
            .process(frame(FramePayload::NoHand, 1))
            .unwrap()
            .unwrap();
        assert_eq!(state.classification, defaults::NO_SIGN_PLACEHOLDER);
        assert_eq!(state.text, "A");
    }

    #[test]
    fn low_confidence_is_displayed_but_not_committed() {
        let classifier = MockClassifier::new().with_result("B", 80.0);
        let mut station = station_with(classifier, MockClock::new());

        let state = station
            .process(frame(FramePayload::Landmarks(sample_set()), 0))
            .unwrap()
            .unwrap();
        assert_eq!(state.classification, "B (80.00%)");
        assert_eq!(state.text, "");
    }

    #[test]
    fn extraction_failure_gates_like_no_detection() {
        let classifier = MockClassifier::new().with_result("A", 99.0);
        let clock = MockClock::new();
        let mut station = station_with(classifier, clock.clone());

        station
            .process(frame(FramePayload::Landmarks(sample_set()), 0))
            .unwrap();
        let state = station
            .process(frame(FramePayload::ExtractionFailed("timeout".into()), 1))
            .unwrap()
            .unwrap();
        assert_eq!(state.classification, defaults::NO_SIGN_PLACEHOLDER);

        // Suppression cleared: "A" commits again once the cooldown allows.
        clock.advance(Duration::from_millis(1100));
        let state = station
            .process(frame(FramePayload::Landmarks(sample_set()), 2))
            .unwrap()
            .unwrap();
        assert_eq!(state.text, "AA");
    }

    #[test]
    fn clear_resets_text_and_gate_atomically() {
        let classifier = MockClassifier::new().with_result("A", 99.0);
        let mut station = station_with(classifier, MockClock::new());

        station
            .process(frame(FramePayload::Landmarks(sample_set()), 0))
            .unwrap();
        let state = station.process(PipelineInput::Clear).unwrap().unwrap();
        assert_eq!(state.text, "");
        assert_eq!(state.classification, defaults::NO_SIGN_PLACEHOLDER);

        // Gate reset along with the buffer: the same label commits again
        // immediately, with no cooldown carried over.
        let state = station
            .process(frame(FramePayload::Landmarks(sample_set()), 1))
            .unwrap()
            .unwrap();
        assert_eq!(state.text, "A");
    }

    #[test]
    fn space_commit_appends_literal_space() {
        let classifier = MockClassifier::new().with_script(vec![
            Some(ClassificationResult::new("A", 99.0)),
            Some(ClassificationResult::new("Space", 99.0)),
        ]);
        let clock = MockClock::new();
        let mut station = station_with(classifier, clock.clone());

        station
            .process(frame(FramePayload::Landmarks(sample_set()), 0))
            .unwrap();
        clock.advance(Duration::from_millis(1100));
        let state = station
            .process(frame(FramePayload::Landmarks(sample_set()), 1))
            .unwrap()
            .unwrap();
        assert_eq!(state.text, "A ");
        assert_eq!(state.classification, "Space (99.00%)");
    }
}
