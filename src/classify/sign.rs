//! The production classifier: scoring model + label table.

use crate::classify::classifier::{ClassificationResult, Classifier};
use crate::classify::labels::LabelTable;
use crate::classify::model::{LinearScorer, ScoringModel};
use crate::config::ClassifierConfig;
use crate::encoder::FeatureVector;
use crate::error::{Result, SigntypeError};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

struct Loaded {
    model: Box<dyn ScoringModel>,
    labels: LabelTable,
}

/// Classifier backed by the trained scoring model and label table.
///
/// Resources are loaded once and read-shared afterwards. [`close`] releases
/// them; subsequent `classify` calls return `None` without touching released
/// resources. There is no ambient global state: ownership is explicit and the
/// instance is passed into the pipeline.
///
/// [`close`]: SignClassifier::close
pub struct SignClassifier {
    inner: RwLock<Option<Loaded>>,
    model_name: String,
    // One-shot latches so repeated per-frame failures surface a single
    // diagnostic instead of flooding stderr.
    inference_warned: AtomicBool,
    range_warned: AtomicBool,
}

impl SignClassifier {
    /// Loads the model and label table resources.
    ///
    /// A size disagreement between the two is tolerated here (the arg-max
    /// range check in `classify` covers it); `verify` reports it explicitly.
    ///
    /// # Errors
    /// Any resource that is missing, unparseable, or empty. Failure leaves no
    /// usable classifier; the caller decides whether to re-initialize.
    pub fn load(config: &ClassifierConfig) -> Result<Self> {
        let model = LinearScorer::load(&config.model)?;
        let labels = LabelTable::load(&config.labels)?;
        let model_name = config
            .model
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        Ok(Self::from_parts(Box::new(model), labels, model_name))
    }

    /// Builds a classifier from already-loaded parts. Used by tests and by
    /// callers providing their own scoring backend.
    pub fn from_parts(
        model: Box<dyn ScoringModel>,
        labels: LabelTable,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            inner: RwLock::new(Some(Loaded { model, labels })),
            model_name: model_name.into(),
            inference_warned: AtomicBool::new(false),
            range_warned: AtomicBool::new(false),
        }
    }

    /// Checks that the model's output width matches the label table.
    pub fn verify(&self) -> Result<()> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let loaded = guard.as_ref().ok_or_else(|| SigntypeError::Other(
            "classifier is closed".to_string(),
        ))?;
        let model_outputs = loaded.model.output_len();
        let labels = loaded.labels.len();
        if model_outputs != labels {
            return Err(SigntypeError::ShapeMismatch {
                model_outputs,
                labels,
            });
        }
        Ok(())
    }

    /// Number of labels in the loaded table (0 once closed).
    pub fn label_count(&self) -> usize {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map_or(0, |l| l.labels.len())
    }

    /// Releases the model and label resources.
    ///
    /// Safe to call while the pipeline still holds the classifier: no new
    /// inference is accepted afterwards, and `classify` fails soft.
    pub fn close(&self) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    fn warn_once(latch: &AtomicBool, message: &str) {
        if !latch.swap(true, Ordering::Relaxed) {
            eprintln!("signtype: {message}");
        }
    }
}

impl Classifier for SignClassifier {
    fn classify(&self, features: &FeatureVector) -> Option<ClassificationResult> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let loaded = guard.as_ref()?;
        if loaded.labels.is_empty() {
            return None;
        }

        let scores = match loaded.model.score(features) {
            Ok(scores) => scores,
            Err(e) => {
                Self::warn_once(&self.inference_warned, &format!("inference failed: {e}"));
                return None;
            }
        };

        if scores.is_empty() {
            return None;
        }

        // Arg-max; ties break toward the first occurrence in index order.
        let mut best = 0usize;
        let mut best_score = f32::NEG_INFINITY;
        for (index, &score) in scores.iter().enumerate() {
            if score > best_score {
                best = index;
                best_score = score;
            }
        }

        // A model wider than the label table can pick an index with no label.
        let Some(label) = loaded.labels.get(best) else {
            Self::warn_once(
                &self.range_warned,
                &format!(
                    "arg-max index {best} outside label table of {} entries",
                    loaded.labels.len()
                ),
            );
            return None;
        };

        Some(ClassificationResult::new(label, best_score * 100.0))
    }

    fn is_ready(&self) -> bool {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.is_some()
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
