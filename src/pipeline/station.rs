//! Station abstraction and runner.
//!
//! A station is one processing stage with exclusive ownership of its state;
//! its runner gives it a dedicated thread and a strictly ordered input
//! stream, which is what lets stateful stages mutate without locks.

use crate::pipeline::error::{ErrorReporter, StationError};
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A processing station in the frame pipeline.
pub trait Station: Send + 'static {
    /// The input type this station receives.
    type Input: Send + 'static;
    /// The output type this station produces.
    type Output: Send + 'static;

    /// Processes a single input item.
    ///
    /// Returns `Ok(Some(output))` on success, `Ok(None)` when the input was
    /// consumed without output, or a `StationError`.
    fn process(&mut self, input: Self::Input) -> Result<Option<Self::Output>, StationError>;

    /// Station name for logging and error reporting.
    fn name(&self) -> &'static str;

    /// Called once when the station shuts down.
    fn shutdown(&mut self) {}
}

/// Runs a station in a dedicated thread.
///
/// Inputs are taken one at a time from the receiver; the next input is not
/// touched until `process` for the current one has returned, so a station
/// never observes overlapping calls.
pub struct StationRunner {
    handle: Option<JoinHandle<()>>,
    station_name: &'static str,
}

impl StationRunner {
    /// Spawns the station's processing loop.
    pub fn spawn<S: Station>(
        mut station: S,
        input_rx: Receiver<S::Input>,
        output_tx: Sender<S::Output>,
        error_reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        let station_name = station.name();

        let handle = thread::spawn(move || {
            while let Ok(input) = input_rx.recv() {
                match station.process(input) {
                    Ok(Some(output)) => {
                        if output_tx.send(output).is_err() {
                            // Downstream gone; nothing left to produce for.
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(StationError::Recoverable(msg)) => {
                        error_reporter.report(station_name, &StationError::Recoverable(msg));
                    }
                    Err(StationError::Fatal(msg)) => {
                        error_reporter.report(station_name, &StationError::Fatal(msg));
                        break;
                    }
                }
            }
            station.shutdown();
        });

        Self {
            handle: Some(handle),
            station_name,
        }
    }

    /// Waits for the station thread to complete.
    pub fn join(mut self) -> Result<(), String> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| format!("station '{}' thread panicked", self.station_name)),
            None => Ok(()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.station_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    // Station that upper-cases labels, skipping empty ones.
    struct UppercaseStation {
        shutdown_called: Arc<AtomicBool>,
    }

    impl Station for UppercaseStation {
        type Input = String;
        type Output = String;

        fn process(&mut self, input: String) -> Result<Option<String>, StationError> {
            if input.is_empty() {
                Ok(None)
            } else if input == "!" {
                Err(StationError::Recoverable("unmappable label".to_string()))
            } else {
                Ok(Some(input.to_uppercase()))
            }
        }

        fn name(&self) -> &'static str {
            "uppercase"
        }

        fn shutdown(&mut self) {
            self.shutdown_called.store(true, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct CollectingReporter {
        errors: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl ErrorReporter for CollectingReporter {
        fn report(&self, station: &str, error: &StationError) {
            self.errors
                .lock()
                .unwrap()
                .push((station.to_string(), error.to_string()));
        }
    }

    #[test]
    fn processes_inputs_in_order() {
        let (input_tx, input_rx) = bounded(8);
        let (output_tx, output_rx) = bounded(8);
        let shutdown_called = Arc::new(AtomicBool::new(false));
        let runner = StationRunner::spawn(
            UppercaseStation {
                shutdown_called: shutdown_called.clone(),
            },
            input_rx,
            output_tx,
            Arc::new(CollectingReporter::default()),
        );
        assert_eq!(runner.name(), "uppercase");

        for label in ["a", "b", "c"] {
            input_tx.send(label.to_string()).unwrap();
        }
        drop(input_tx);

        let outputs: Vec<String> = output_rx.iter().collect();
        assert_eq!(outputs, vec!["A", "B", "C"]);

        runner.join().unwrap();
        assert!(shutdown_called.load(Ordering::SeqCst));
    }

    #[test]
    fn filtered_inputs_produce_no_output() {
        let (input_tx, input_rx) = bounded(8);
        let (output_tx, output_rx) = bounded(8);
        let runner = StationRunner::spawn(
            UppercaseStation {
                shutdown_called: Arc::new(AtomicBool::new(false)),
            },
            input_rx,
            output_tx,
            Arc::new(CollectingReporter::default()),
        );

        input_tx.send("a".to_string()).unwrap();
        input_tx.send(String::new()).unwrap();
        input_tx.send("b".to_string()).unwrap();
        drop(input_tx);

        let outputs: Vec<String> = output_rx.iter().collect();
        assert_eq!(outputs, vec!["A", "B"]);
        runner.join().unwrap();
    }

    #[test]
    fn recoverable_errors_are_reported_and_processing_continues() {
        let (input_tx, input_rx) = bounded(8);
        let (output_tx, output_rx) = bounded(8);
        let reporter = Arc::new(CollectingReporter::default());
        let errors = reporter.errors.clone();
        let runner = StationRunner::spawn(
            UppercaseStation {
                shutdown_called: Arc::new(AtomicBool::new(false)),
            },
            input_rx,
            output_tx,
            reporter,
        );

        input_tx.send("a".to_string()).unwrap();
        input_tx.send("!".to_string()).unwrap();
        input_tx.send("b".to_string()).unwrap();
        drop(input_tx);

        let outputs: Vec<String> = output_rx.iter().collect();
        assert_eq!(outputs, vec!["A", "B"]);

        let reported = errors.lock().unwrap();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].0, "uppercase");
        runner.join().unwrap();
    }

    #[test]
    fn closed_input_channel_shuts_down_station() {
        let (input_tx, input_rx) = bounded::<String>(1);
        let (output_tx, _output_rx) = bounded(1);
        let shutdown_called = Arc::new(AtomicBool::new(false));
        let runner = StationRunner::spawn(
            UppercaseStation {
                shutdown_called: shutdown_called.clone(),
            },
            input_rx,
            output_tx,
            Arc::new(CollectingReporter::default()),
        );

        drop(input_tx);
        runner.join().unwrap();
        assert!(shutdown_called.load(Ordering::SeqCst));
    }
}
