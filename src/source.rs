//! Landmark sources: where frame arrivals come from.
//!
//! The real extractor is an external capability feeding the pipeline handle
//! directly. For demos and tests, a JSON-lines reader replays a recorded
//! landmark stream from a file or stdin.

use crate::error::{Result, SigntypeError};
use crate::landmark::LandmarkSet;
use crate::pipeline::types::FramePayload;
use serde::Deserialize;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A source of frame payloads, delivered one at a time in temporal order.
pub trait LandmarkSource: Send {
    /// Next frame payload, or `None` once the source is exhausted.
    fn next_event(&mut self) -> Result<Option<FramePayload>>;
}

/// One line of a recorded landmark stream.
///
/// ```json
/// {"landmarks": [[0.1, 0.2], ...]}
/// "no_hand"
/// {"extraction_failed": "tracker timeout"}
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum FrameRecord {
    Landmarks(Vec<[f32; 2]>),
    NoHand,
    ExtractionFailed(String),
}

/// Reads frame payloads from newline-delimited JSON.
pub struct JsonlSource<R: BufRead> {
    reader: R,
    line: usize,
}

impl JsonlSource<BufReader<File>> {
    /// Opens a recorded stream file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonlSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }

    fn parse(&self, text: &str) -> Result<FramePayload> {
        let record: FrameRecord =
            serde_json::from_str(text).map_err(|e| SigntypeError::FrameParse {
                line: self.line,
                message: e.to_string(),
            })?;
        match record {
            FrameRecord::Landmarks(raw) => {
                let set = LandmarkSet::try_from(raw).map_err(|e| SigntypeError::FrameParse {
                    line: self.line,
                    message: e.to_string(),
                })?;
                Ok(FramePayload::Landmarks(set))
            }
            FrameRecord::NoHand => Ok(FramePayload::NoHand),
            FrameRecord::ExtractionFailed(message) => Ok(FramePayload::ExtractionFailed(message)),
        }
    }
}

impl<R: BufRead + Send> LandmarkSource for JsonlSource<R> {
    fn next_event(&mut self) -> Result<Option<FramePayload>> {
        loop {
            let mut buffer = String::new();
            let read = self.reader.read_line(&mut buffer)?;
            if read == 0 {
                return Ok(None);
            }
            self.line += 1;
            let text = buffer.trim();
            if text.is_empty() {
                continue;
            }
            return self.parse(text).map(Some);
        }
    }
}

/// Scripted source for tests.
pub struct MockLandmarkSource {
    events: VecDeque<FramePayload>,
}

impl MockLandmarkSource {
    pub fn new(events: Vec<FramePayload>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

impl LandmarkSource for MockLandmarkSource {
    fn next_event(&mut self) -> Result<Option<FramePayload>> {
        Ok(self.events.pop_front())
    }
}
