//! Error types with actionable diagnostics

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for flowgan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while fitting the codec, building models, or training
#[derive(Error, Debug)]
pub enum Error {
    /// The dataset is missing a required column or holds unusable values
    #[error("Schema error: {0}")]
    Schema(String),

    /// A categorical label is absent from the fitted vocabulary
    #[error("Unknown category '{label}' for field {field}\n  → Labels must be present in the dataset the codec was fitted on")]
    UnknownCategory { field: String, label: String },

    /// A vector does not match the codec's segment layout
    #[error("Codec mismatch: expected vector width {expected}, got {actual}")]
    CodecMismatch { expected: usize, actual: usize },

    /// Model configuration disagrees with the codec or is out of range
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A loss became NaN or infinite during training
    #[error("Numeric instability at epoch {epoch} during {phase}: loss = {value}\n  → Try a lower learning rate or a higher Gumbel-softmax temperature")]
    NumericInstability { epoch: usize, phase: &'static str, value: f32 },

    /// IO error with context
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing failed
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// YAML configuration could not be parsed
    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create a CSV error tied to a file
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv { path: path.into(), source }
    }

    /// Whether the error comes from the data or config the user supplied
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Schema(_)
                | Self::UnknownCategory { .. }
                | Self::Configuration(_)
                | Self::Yaml { .. }
                | Self::Csv { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_message_names_field_and_label() {
        let err = Error::UnknownCategory { field: "Dport".into(), label: "8080".into() };
        let msg = err.to_string();
        assert!(msg.contains("Dport"));
        assert!(msg.contains("8080"));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_codec_mismatch_is_not_user_error() {
        let err = Error::CodecMismatch { expected: 10, actual: 9 };
        assert!(err.to_string().contains("expected vector width 10"));
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_io_helper_keeps_context() {
        let err = Error::io(
            "writing samples",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("writing samples"));
    }
}
