//! Sign classification: scoring model execution and label resolution.

pub mod classifier;
pub mod labels;
pub mod model;
pub mod sign;

pub use classifier::{ClassificationResult, Classifier, MockClassifier};
pub use labels::LabelTable;
pub use model::{LinearScorer, ScoringModel, StubScorer};
pub use sign::SignClassifier;
