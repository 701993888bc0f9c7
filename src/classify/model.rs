//! Scoring model execution.
//!
//! The trained model is an opaque binary resource describing a fixed-shape
//! scoring function: 42 input floats in, one probability per label out. The
//! [`ScoringModel`] trait hides the execution backend so tests can substitute
//! crafted scores.

use crate::defaults::FEATURE_LEN;
use crate::encoder::FeatureVector;
use crate::error::{Result, SigntypeError};
use candle_core::{Device, Tensor};
use candle_nn::{Linear, Module, ops};
use std::path::Path;

/// A loaded scoring model: one forward pass per call.
///
/// Implementations must be safe to invoke concurrently; the weights are
/// immutable after load.
pub trait ScoringModel: Send + Sync {
    /// Runs one forward pass and returns one score per label, in label-table
    /// index order. Scores are probabilities in [0,1].
    fn score(&self, features: &FeatureVector) -> Result<Vec<f32>>;

    /// Width of the output score vector, known at load time.
    fn output_len(&self) -> usize;
}

/// Candle-backed scorer executing the model resource on CPU.
///
/// The resource is a safetensors blob holding `weight` `[num_labels, 42]`
/// and `bias` `[num_labels]`, applied as a linear layer followed by softmax.
#[derive(Debug)]
pub struct LinearScorer {
    layer: Linear,
    output_len: usize,
    device: Device,
}

impl LinearScorer {
    /// Loads the model resource from disk.
    ///
    /// # Errors
    /// `ModelNotFound` if the file is missing; `ModelLoad` if the blob cannot
    /// be parsed or its tensor shapes do not describe a 42-input scorer.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SigntypeError::ModelNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let device = Device::Cpu;
        let tensors =
            candle_core::safetensors::load(path, &device).map_err(|e| SigntypeError::ModelLoad {
                message: format!("read {}: {e}", path.display()),
            })?;

        let weight = tensors
            .get("weight")
            .ok_or_else(|| SigntypeError::ModelLoad {
                message: "missing tensor 'weight'".to_string(),
            })?
            .clone();
        let bias = tensors
            .get("bias")
            .ok_or_else(|| SigntypeError::ModelLoad {
                message: "missing tensor 'bias'".to_string(),
            })?
            .clone();

        let (output_len, input_len) =
            weight.dims2().map_err(|e| SigntypeError::ModelLoad {
                message: format!("tensor 'weight' is not 2-D: {e}"),
            })?;
        if input_len != FEATURE_LEN {
            return Err(SigntypeError::ModelLoad {
                message: format!(
                    "model expects {input_len} inputs, feature vectors have {FEATURE_LEN}"
                ),
            });
        }
        let bias_len = bias.dims1().map_err(|e| SigntypeError::ModelLoad {
            message: format!("tensor 'bias' is not 1-D: {e}"),
        })?;
        if bias_len != output_len {
            return Err(SigntypeError::ModelLoad {
                message: format!("bias has {bias_len} entries, weight produces {output_len}"),
            });
        }

        Ok(Self {
            layer: Linear::new(weight, Some(bias)),
            output_len,
            device,
        })
    }
}

impl ScoringModel for LinearScorer {
    fn score(&self, features: &FeatureVector) -> Result<Vec<f32>> {
        let input = Tensor::from_slice(features.as_slice(), (1, FEATURE_LEN), &self.device)
            .map_err(|e| SigntypeError::Inference {
                message: format!("build input tensor: {e}"),
            })?;
        let logits = self.layer.forward(&input).map_err(|e| SigntypeError::Inference {
            message: format!("forward pass: {e}"),
        })?;
        let probs = ops::softmax_last_dim(&logits).map_err(|e| SigntypeError::Inference {
            message: format!("softmax: {e}"),
        })?;
        probs
            .squeeze(0)
            .and_then(|row| row.to_vec1::<f32>())
            .map_err(|e| SigntypeError::Inference {
                message: format!("read output scores: {e}"),
            })
    }

    fn output_len(&self) -> usize {
        self.output_len
    }
}

/// Fixed-score model for tests.
///
/// Returns the same crafted score vector on every call, or a scripted
/// failure.
#[derive(Debug, Clone)]
pub struct StubScorer {
    scores: Vec<f32>,
    should_fail: bool,
}

impl StubScorer {
    pub fn new(scores: Vec<f32>) -> Self {
        Self {
            scores,
            should_fail: false,
        }
    }

    /// Configures the stub to fail on every forward pass.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl ScoringModel for StubScorer {
    fn score(&self, _features: &FeatureVector) -> Result<Vec<f32>> {
        if self.should_fail {
            Err(SigntypeError::Inference {
                message: "stub inference failure".to_string(),
            })
        } else {
            Ok(self.scores.clone())
        }
    }

    fn output_len(&self) -> usize {
        self.scores.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::landmark::sample_set;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn save_model(path: &Path, weight: Tensor, bias: Tensor) {
        let mut tensors = HashMap::new();
        tensors.insert("weight".to_string(), weight);
        tensors.insert("bias".to_string(), bias);
        candle_core::safetensors::save(&tensors, path).unwrap();
    }

    #[test]
    fn load_missing_model_errors() {
        let err = LinearScorer::load(Path::new("/nonexistent/model.safetensors")).unwrap_err();
        assert!(matches!(err, SigntypeError::ModelNotFound { .. }));
    }

    #[test]
    fn load_rejects_wrong_input_width() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.safetensors");
        let device = Device::Cpu;
        let weight = Tensor::zeros((3, 40), candle_core::DType::F32, &device).unwrap();
        let bias = Tensor::zeros(3, candle_core::DType::F32, &device).unwrap();
        save_model(&path, weight, bias);

        let err = LinearScorer::load(&path).unwrap_err();
        assert!(matches!(err, SigntypeError::ModelLoad { .. }));
    }

    #[test]
    fn load_rejects_missing_bias() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.safetensors");
        let device = Device::Cpu;
        let weight = Tensor::zeros((3, FEATURE_LEN), candle_core::DType::F32, &device).unwrap();
        let mut tensors = HashMap::new();
        tensors.insert("weight".to_string(), weight);
        candle_core::safetensors::save(&tensors, &path).unwrap();

        let err = LinearScorer::load(&path).unwrap_err();
        assert!(matches!(err, SigntypeError::ModelLoad { .. }));
    }

    #[test]
    fn scores_are_softmax_probabilities() {
        // Zero weights: the output depends only on the bias, so the scores
        // are softmax(bias) for any input.
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.safetensors");
        let device = Device::Cpu;
        let weight = Tensor::zeros((3, FEATURE_LEN), candle_core::DType::F32, &device).unwrap();
        let bias = Tensor::new(&[0.0f32, 5.0, 1.0], &device).unwrap();
        save_model(&path, weight, bias);

        let scorer = LinearScorer::load(&path).unwrap();
        assert_eq!(scorer.output_len(), 3);

        let scores = scorer.score(&encode(&sample_set())).unwrap();
        assert_eq!(scores.len(), 3);
        let sum: f32 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "scores should sum to 1, got {sum}");
        assert!(scores[1] > scores[0] && scores[1] > scores[2]);
    }

    #[test]
    fn stub_scorer_returns_crafted_scores() {
        let scorer = StubScorer::new(vec![0.1, 0.9, 0.3]);
        let scores = scorer.score(&encode(&sample_set())).unwrap();
        assert_eq!(scores, vec![0.1, 0.9, 0.3]);
        assert_eq!(scorer.output_len(), 3);
    }

    #[test]
    fn stub_scorer_scripted_failure() {
        let scorer = StubScorer::new(vec![0.5]).with_failure();
        assert!(scorer.score(&encode(&sample_set())).is_err());
    }
}
