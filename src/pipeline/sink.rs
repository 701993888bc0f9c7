//! Display sinks: where published pipeline state goes.

use crate::pipeline::error::StationError;
use crate::pipeline::station::Station;
use crate::pipeline::types::DisplayState;
use std::sync::{Arc, Mutex};

/// Pluggable observer for published display state.
///
/// Pairs with the landmark source on the input side. Push-based: the
/// pipeline calls `publish` for every state it produces, in order.
pub trait DisplaySink: Send + 'static {
    /// Handles one published display state.
    fn publish(&mut self, state: &DisplayState) -> crate::error::Result<()>;

    /// Called on pipeline shutdown. Returns the final accumulated text if
    /// applicable, so a caller can hand it to an exporter.
    fn finish(&mut self) -> Option<String> {
        None
    }

    /// Name for logging/debugging.
    fn name(&self) -> &'static str {
        "display"
    }
}

/// Prints display state to stdout as it changes.
pub struct StdoutSink {
    last: Option<DisplayState>,
    final_text: String,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            last: None,
            final_text: String::new(),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for StdoutSink {
    fn publish(&mut self, state: &DisplayState) -> crate::error::Result<()> {
        // Only repaint on change; a held pose republishes identical state
        // every frame.
        if self.last.as_ref() != Some(state) {
            println!("{}  [{}]", state.classification, state.text);
            self.last = Some(state.clone());
        }
        self.final_text = state.text.clone();
        Ok(())
    }

    fn finish(&mut self) -> Option<String> {
        Some(std::mem::take(&mut self.final_text))
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}

/// Collects every published state in memory. Used by tests and by callers
/// that want to inspect the stream after the fact.
pub struct CollectorSink {
    states: Arc<Mutex<Vec<DisplayState>>>,
}

impl CollectorSink {
    pub fn new() -> Self {
        Self {
            states: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the collected states, valid after the pipeline
    /// stops.
    pub fn states(&self) -> Arc<Mutex<Vec<DisplayState>>> {
        self.states.clone()
    }
}

impl Default for CollectorSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for CollectorSink {
    fn publish(&mut self, state: &DisplayState) -> crate::error::Result<()> {
        let mut states = self.states.lock().unwrap_or_else(|e| e.into_inner());
        states.push(state.clone());
        Ok(())
    }

    fn finish(&mut self) -> Option<String> {
        let states = self.states.lock().unwrap_or_else(|e| e.into_inner());
        states.last().map(|s| s.text.clone())
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}

/// Station wrapper turning any [`DisplaySink`] into the pipeline's terminal
/// stage.
pub(crate) struct SinkStation {
    sink: Box<dyn DisplaySink>,
    result_tx: Option<crossbeam_channel::Sender<Option<String>>>,
}

impl SinkStation {
    pub(crate) fn new(
        sink: Box<dyn DisplaySink>,
        result_tx: crossbeam_channel::Sender<Option<String>>,
    ) -> Self {
        Self {
            sink,
            result_tx: Some(result_tx),
        }
    }
}

impl Station for SinkStation {
    type Input = DisplayState;
    type Output = ();

    fn name(&self) -> &'static str {
        self.sink.name()
    }

    fn process(&mut self, state: DisplayState) -> Result<Option<()>, StationError> {
        self.sink
            .publish(&state)
            .map_err(|e| StationError::Recoverable(e.to_string()))?;
        Ok(None)
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.result_tx.take() {
            // Receiver may already be gone during teardown.
            tx.send(self.sink.finish()).ok();
        }
    }
}
