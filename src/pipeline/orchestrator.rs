//! Frame pipeline that runs from startup until shutdown.

use crate::classify::Classifier;
use crate::defaults;
use crate::error::Result;
use crate::gate::{Clock, DebounceGate, GateConfig, SystemClock};
use crate::landmark::LandmarkSet;
use crate::pipeline::error::{ErrorReporter, LogReporter};
use crate::pipeline::recognizer::RecognizerStation;
use crate::pipeline::sink::{DisplaySink, SinkStation};
use crate::pipeline::station::StationRunner;
use crate::pipeline::types::{FrameArrival, FramePayload, PipelineInput};
use crossbeam_channel::bounded;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Configuration for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Debounce gate configuration.
    pub gate: GateConfig,
    /// Frame input channel capacity; a frame arriving while the channel is
    /// full is dropped.
    pub frame_buffer: usize,
    /// Display state channel capacity.
    pub display_buffer: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            gate: GateConfig::default(),
            frame_buffer: defaults::FRAME_BUFFER,
            display_buffer: defaults::DISPLAY_BUFFER,
        }
    }
}

/// Frame pipeline: landmark arrivals → encode → classify → gate → text,
/// published to a display sink.
pub struct Pipeline {
    config: PipelineConfig,
    error_reporter: Arc<dyn ErrorReporter>,
    clock: Arc<dyn Clock>,
}

impl Pipeline {
    /// Creates a new pipeline with the default stderr error reporter.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            error_reporter: Arc::new(LogReporter),
            clock: Arc::new(SystemClock),
        }
    }

    /// Sets a custom error reporter.
    pub fn with_error_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.error_reporter = reporter;
        self
    }

    /// Sets a custom clock (for deterministic testing).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Starts the pipeline.
    ///
    /// # Arguments
    /// * `classifier` - Shared classifier; its resources must outlive the
    ///   pipeline or be closed only after `stop`
    /// * `sink` - Display state observer
    ///
    /// # Returns
    /// Handle used to submit frame arrivals and stop the pipeline.
    pub fn start(
        self,
        classifier: Arc<dyn Classifier>,
        sink: Box<dyn DisplaySink>,
    ) -> Result<PipelineHandle> {
        let running = Arc::new(AtomicBool::new(true));

        let (input_tx, input_rx) = bounded(self.config.frame_buffer);
        let (display_tx, display_rx) = bounded(self.config.display_buffer);
        let (result_tx, result_rx) = bounded(1);

        let gate = DebounceGate::with_clock(self.config.gate, self.clock.clone());
        let recognizer = RecognizerStation::new(classifier, gate);
        let sink_station = SinkStation::new(sink, result_tx);

        let recognizer_runner = StationRunner::spawn(
            recognizer,
            input_rx,
            display_tx,
            self.error_reporter.clone(),
        );

        // The sink is terminal: its output type is () and it never emits, so
        // the downstream receiver can be dropped right away.
        let (sink_out_tx, sink_out_rx) = bounded::<()>(1);
        let sink_runner = StationRunner::spawn(
            sink_station,
            display_rx,
            sink_out_tx,
            self.error_reporter.clone(),
        );
        drop(sink_out_rx);

        let threads = vec![
            thread::spawn(move || {
                if let Err(msg) = recognizer_runner.join() {
                    eprintln!("signtype: {msg}");
                }
            }),
            thread::spawn(move || {
                if let Err(msg) = sink_runner.join() {
                    eprintln!("signtype: {msg}");
                }
            }),
        ];

        Ok(PipelineHandle {
            running,
            input_tx,
            sequence: AtomicU64::new(0),
            clock: self.clock,
            threads,
            result_rx: Some(result_rx),
        })
    }
}

/// Handle to a running pipeline.
///
/// The landmark source (external extractor) calls the `submit_*` methods,
/// one arrival at a time, in temporal order. The UI layer calls
/// `clear_text`.
pub struct PipelineHandle {
    running: Arc<AtomicBool>,
    input_tx: crossbeam_channel::Sender<PipelineInput>,
    sequence: AtomicU64,
    clock: Arc<dyn Clock>,
    threads: Vec<JoinHandle<()>>,
    result_rx: Option<crossbeam_channel::Receiver<Option<String>>>,
}

impl PipelineHandle {
    /// Submits a detected-hand arrival. Returns false if the frame was
    /// dropped (pipeline stopping or input buffer full).
    pub fn submit_landmarks(&self, landmarks: LandmarkSet) -> bool {
        self.submit(FramePayload::Landmarks(landmarks))
    }

    /// Submits a "no hand this frame" notice.
    pub fn submit_no_hand(&self) -> bool {
        self.submit(FramePayload::NoHand)
    }

    /// Submits an extractor failure for this frame. Gated as no-detection.
    pub fn submit_extraction_failed(&self, message: impl Into<String>) -> bool {
        self.submit(FramePayload::ExtractionFailed(message.into()))
    }

    fn submit(&self, payload: FramePayload) -> bool {
        if !self.running.load(Ordering::SeqCst) {
            return false;
        }
        let arrival = FrameArrival::new(
            payload,
            self.clock.now(),
            self.sequence.fetch_add(1, Ordering::Relaxed),
        );
        // Full buffer drops the frame: the extractor coalesces upstream and
        // a fresh frame is worth more than a stale one.
        self.input_tx
            .try_send(PipelineInput::Frame(arrival))
            .is_ok()
    }

    /// Clears the text buffer and resets the gate's suppression state.
    ///
    /// Travels the same channel as frames, so the reset is serialized with
    /// frame processing and never dropped.
    pub fn clear_text(&self) -> bool {
        self.input_tx.send(PipelineInput::Clear).is_ok()
    }

    /// Returns true if the pipeline is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stops the pipeline gracefully and returns the sink's final text.
    ///
    /// Waits up to 2s for the result, then 1s for threads to finish; after
    /// the deadline, remaining threads are detached and die with the
    /// process.
    pub fn stop(mut self) -> Option<String> {
        self.running.store(false, Ordering::SeqCst);

        // Closing the input channel lets both stations drain and shut down.
        let Self {
            input_tx,
            result_rx,
            mut threads,
            ..
        } = self;
        drop(input_tx);

        let result = result_rx
            .as_ref()
            .and_then(|rx| rx.recv_timeout(Duration::from_secs(2)).ok())
            .flatten();

        let deadline = Instant::now() + Duration::from_secs(1);
        loop {
            let mut remaining = Vec::new();
            for handle in threads.drain(..) {
                if handle.is_finished() {
                    if handle.join().is_err() {
                        eprintln!("signtype: pipeline thread panicked");
                    }
                } else {
                    remaining.push(handle);
                }
            }
            threads = remaining;

            if threads.is_empty() {
                break;
            }
            if Instant::now() >= deadline {
                eprintln!(
                    "signtype: shutdown timeout - {} thread(s) still running, detaching",
                    threads.len()
                );
                break;
            }
            thread::sleep(Duration::from_millis(20));
        }

        result
    }
}
