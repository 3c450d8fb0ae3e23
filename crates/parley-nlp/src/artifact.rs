//! Model artifact names, locations and loading.
//!
//! A model directory holds five JSON artifacts. Each one declares the
//! locale it was built for; only [`LOCALE`] is accepted.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ModelLoadError;

/// The single supported locale.
pub const LOCALE: &str = "en";

/// The five artifacts a pipeline needs, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Tokenizer,
    Pos,
    Lemmatizer,
    Person,
    Location,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::Tokenizer,
        ArtifactKind::Pos,
        ArtifactKind::Lemmatizer,
        ArtifactKind::Person,
        ArtifactKind::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tokenizer => "tokenizer",
            Self::Pos => "pos",
            Self::Lemmatizer => "lemmatizer",
            Self::Person => "person",
            Self::Location => "location",
        }
    }

    /// File name used when no override is configured.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Tokenizer => "en-token.json",
            Self::Pos => "en-pos.json",
            Self::Lemmatizer => "en-lemma.json",
            Self::Person => "en-ner-person.json",
            Self::Location => "en-ner-location.json",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where each artifact lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    pub tokenizer: PathBuf,
    pub pos: PathBuf,
    pub lemmatizer: PathBuf,
    pub person: PathBuf,
    pub location: PathBuf,
}

impl ModelPaths {
    /// All five artifacts under `dir` with their default file names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            tokenizer: dir.join(ArtifactKind::Tokenizer.default_file_name()),
            pos: dir.join(ArtifactKind::Pos.default_file_name()),
            lemmatizer: dir.join(ArtifactKind::Lemmatizer.default_file_name()),
            person: dir.join(ArtifactKind::Person.default_file_name()),
            location: dir.join(ArtifactKind::Location.default_file_name()),
        }
    }

    /// Replace the path of one artifact.
    pub fn with(mut self, kind: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        *self.path_mut(kind) = path.into();
        self
    }

    pub fn path(&self, kind: ArtifactKind) -> &Path {
        match kind {
            ArtifactKind::Tokenizer => &self.tokenizer,
            ArtifactKind::Pos => &self.pos,
            ArtifactKind::Lemmatizer => &self.lemmatizer,
            ArtifactKind::Person => &self.person,
            ArtifactKind::Location => &self.location,
        }
    }

    fn path_mut(&mut self, kind: ArtifactKind) -> &mut PathBuf {
        match kind {
            ArtifactKind::Tokenizer => &mut self.tokenizer,
            ArtifactKind::Pos => &mut self.pos,
            ArtifactKind::Lemmatizer => &mut self.lemmatizer,
            ArtifactKind::Person => &mut self.person,
            ArtifactKind::Location => &mut self.location,
        }
    }

    /// Artifacts whose files do not exist, in load order.
    pub fn missing(&self) -> Vec<ArtifactKind> {
        ArtifactKind::ALL
            .into_iter()
            .filter(|kind| !self.path(*kind).is_file())
            .collect()
    }
}

/// Common surface of every artifact document.
pub trait ModelArtifact: DeserializeOwned {
    /// Locale the artifact was built for.
    fn language(&self) -> &str;

    /// Check internal consistency after parsing.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Read, parse and check one artifact.
pub fn load_artifact<T: ModelArtifact>(
    kind: ArtifactKind,
    path: &Path,
) -> Result<T, ModelLoadError> {
    if !path.is_file() {
        return Err(ModelLoadError::Missing {
            artifact: kind,
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ModelLoadError::Read {
        artifact: kind,
        path: path.to_path_buf(),
        source,
    })?;

    let artifact: T =
        serde_json::from_str(&contents).map_err(|source| ModelLoadError::Malformed {
            artifact: kind,
            path: path.to_path_buf(),
            source,
        })?;

    if artifact.language() != LOCALE {
        return Err(ModelLoadError::Locale {
            artifact: kind,
            expected: LOCALE.to_string(),
            found: artifact.language().to_string(),
        });
    }

    artifact
        .validate()
        .map_err(|reason| ModelLoadError::Invalid {
            artifact: kind,
            reason,
        })?;

    debug!(artifact = %kind, path = %path.display(), "Loaded model artifact");
    Ok(artifact)
}
