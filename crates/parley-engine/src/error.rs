//! Error types for the response engine.

use thiserror::Error;

/// Result type alias for engine construction.
pub type Result<T> = std::result::Result<T, EngineError>;

/// The knowledge base could not be built.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// Failed to read a knowledge file.
    #[error("failed to read knowledge file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse knowledge file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The same phrase appears twice.
    #[error("duplicate knowledge phrase '{0}'")]
    DuplicatePhrase(String),

    /// A phrase is not in canonical form and could never be matched.
    #[error("knowledge phrase '{0}' is not canonical (lowercase, no punctuation, single spaces)")]
    NonCanonicalPhrase(String),

    /// A phrase is empty.
    #[error("knowledge phrase is empty")]
    EmptyPhrase,

    /// A phrase maps to an empty answer.
    #[error("knowledge phrase '{0}' has an empty answer")]
    EmptyAnswer(String),
}

/// The engine could not be constructed.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A linguistic model failed to load.
    #[error("{0}")]
    Models(#[from] parley_nlp::ModelLoadError),

    /// The knowledge base failed to load.
    #[error("{0}")]
    Knowledge(#[from] KnowledgeError),
}
