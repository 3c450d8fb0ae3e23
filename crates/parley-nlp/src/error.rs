//! Error types for the linguistic pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::artifact::ArtifactKind;

/// Result type alias for request-time pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// A model artifact could not be loaded at initialization.
///
/// Every variant names the artifact so the caller can report exactly
/// which file is missing or broken.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    /// The artifact file does not exist.
    #[error("model artifact '{artifact}' not found at {}", path.display())]
    Missing { artifact: ArtifactKind, path: PathBuf },

    /// The artifact file exists but could not be read.
    #[error("failed to read model artifact '{artifact}' at {}: {source}", path.display())]
    Read {
        artifact: ArtifactKind,
        path: PathBuf,
        source: std::io::Error,
    },

    /// The artifact file is not a valid model document.
    #[error("malformed model artifact '{artifact}' at {}: {source}", path.display())]
    Malformed {
        artifact: ArtifactKind,
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The artifact was built for a different language.
    #[error("model artifact '{artifact}' is for locale '{found}', expected '{expected}'")]
    Locale {
        artifact: ArtifactKind,
        expected: String,
        found: String,
    },

    /// The artifact parsed but its content is unusable.
    #[error("invalid model artifact '{artifact}': {reason}")]
    Invalid {
        artifact: ArtifactKind,
        reason: String,
    },
}

impl ModelLoadError {
    /// The artifact this error refers to.
    pub fn artifact(&self) -> ArtifactKind {
        match self {
            Self::Missing { artifact, .. }
            | Self::Read { artifact, .. }
            | Self::Malformed { artifact, .. }
            | Self::Locale { artifact, .. }
            | Self::Invalid { artifact, .. } => *artifact,
        }
    }
}

/// A normalization or entity-extraction call failed at request time.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A model returned a sequence that is not parallel to the tokens.
    #[error("{stage} produced {found} items for {expected} tokens")]
    Misaligned {
        stage: &'static str,
        expected: usize,
        found: usize,
    },

    /// A recognizer reported a span outside the token sequence.
    #[error("entity span {start}..{end} is out of bounds for {len} tokens")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    /// Internal model failure.
    #[error("model error: {0}")]
    Model(String),
}

impl PipelineError {
    /// Create a model error.
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_error_names_artifact() {
        let err = ModelLoadError::Missing {
            artifact: ArtifactKind::Lemmatizer,
            path: PathBuf::from("/models/en-lemma.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("lemmatizer"));
        assert!(msg.contains("en-lemma.json"));
        assert_eq!(err.artifact(), ArtifactKind::Lemmatizer);
    }

    #[test]
    fn test_misaligned_display() {
        let err = PipelineError::Misaligned {
            stage: "tagger",
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "tagger produced 2 items for 3 tokens");
    }
}
