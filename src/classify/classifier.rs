//! Classifier trait and test double.

use crate::encoder::FeatureVector;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// The model's best guess for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// One of the labels from the table loaded at startup. May be a
    /// multi-character token, not necessarily a single letter.
    pub label: String,
    /// Confidence as a percentage in [0, 100].
    pub confidence: f32,
}

impl ClassificationResult {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Trait for per-frame sign classification.
///
/// Allows swapping implementations (real scoring model vs mock). A classifier
/// is a pure function of its input and loaded weights: calls mutate no hidden
/// state, so distinct calls may come from different threads as long as
/// load/close are externally synchronized.
pub trait Classifier: Send + Sync {
    /// Classifies one feature vector.
    ///
    /// Returns `None` when the classifier is not ready (model or labels
    /// failed to load, or have been closed), when the label table is empty,
    /// or when inference fails. Never returns a corrupted result.
    fn classify(&self, features: &FeatureVector) -> Option<ClassificationResult>;

    /// Whether the underlying resources are loaded.
    fn is_ready(&self) -> bool;

    /// Name of the loaded model, for diagnostics.
    fn model_name(&self) -> &str;
}

/// Implement Classifier for Arc<T> to allow sharing across the pipeline.
impl<T: Classifier + ?Sized> Classifier for Arc<T> {
    fn classify(&self, features: &FeatureVector) -> Option<ClassificationResult> {
        (**self).classify(features)
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Mock classifier for testing.
///
/// Plays back a script of per-call results, then falls through to a fixed
/// response (default `None`).
pub struct MockClassifier {
    script: Mutex<VecDeque<Option<ClassificationResult>>>,
    fallback: Option<ClassificationResult>,
    ready: bool,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: None,
            ready: true,
        }
    }

    /// Returns this result on every call once the script is exhausted.
    pub fn with_result(mut self, label: &str, confidence: f32) -> Self {
        self.fallback = Some(ClassificationResult::new(label, confidence));
        self
    }

    /// Queues per-call results, consumed in order before the fallback.
    pub fn with_script(self, results: Vec<Option<ClassificationResult>>) -> Self {
        {
            let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
            script.extend(results);
        }
        self
    }

    /// Marks the mock as unready; `classify` always returns `None`.
    pub fn unready(mut self) -> Self {
        self.ready = false;
        self
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for MockClassifier {
    fn classify(&self, _features: &FeatureVector) -> Option<ClassificationResult> {
        if !self.ready {
            return None;
        }
        let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
        match script.pop_front() {
            Some(result) => result,
            None => self.fallback.clone(),
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
