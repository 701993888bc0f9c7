//! Error types for signtype.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SigntypeError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Classifier resource errors
    #[error("Classifier model not found at {path}")]
    ModelNotFound { path: String },

    #[error("Failed to load classifier model: {message}")]
    ModelLoad { message: String },

    #[error("Label table not found at {path}")]
    LabelTableNotFound { path: String },

    #[error("Label table at {path} is empty")]
    LabelTableEmpty { path: String },

    #[error("Model produces {model_outputs} scores but label table has {labels} entries")]
    ShapeMismatch { model_outputs: usize, labels: usize },

    // Inference errors
    #[error("Scoring model inference failed: {message}")]
    Inference { message: String },

    // Landmark stream errors
    #[error("Landmark set has {actual} points, expected {expected}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("Invalid frame record at line {line}: {message}")]
    FrameParse { line: usize, message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SigntypeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_model_not_found_display() {
        let error = SigntypeError::ModelNotFound {
            path: "/models/hand_sign.safetensors".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Classifier model not found at /models/hand_sign.safetensors"
        );
    }

    #[test]
    fn test_label_table_empty_display() {
        let error = SigntypeError::LabelTableEmpty {
            path: "labels.txt".to_string(),
        };
        assert_eq!(error.to_string(), "Label table at labels.txt is empty");
    }

    #[test]
    fn test_shape_mismatch_display() {
        let error = SigntypeError::ShapeMismatch {
            model_outputs: 27,
            labels: 26,
        };
        assert_eq!(
            error.to_string(),
            "Model produces 27 scores but label table has 26 entries"
        );
    }

    #[test]
    fn test_landmark_count_display() {
        let error = SigntypeError::LandmarkCount {
            expected: 21,
            actual: 20,
        };
        assert_eq!(
            error.to_string(),
            "Landmark set has 20 points, expected 21"
        );
    }

    #[test]
    fn test_frame_parse_display() {
        let error = SigntypeError::FrameParse {
            line: 7,
            message: "expected array".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid frame record at line 7: expected array"
        );
    }

    #[test]
    fn test_config_file_not_found_display() {
        let error = SigntypeError::ConfigFileNotFound {
            path: "/etc/signtype.toml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found at /etc/signtype.toml"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: SigntypeError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_toml_error() {
        let toml_error = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let error: SigntypeError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_error_source_chain_io() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: SigntypeError = io_error.into();
        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<SigntypeError>();
        assert_sync::<SigntypeError>();
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}
