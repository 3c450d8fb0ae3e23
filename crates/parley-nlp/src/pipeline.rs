//! The linguistic pipeline: normalization and entity extraction over raw text.

use std::ops::Range;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::artifact::{ArtifactKind, ModelPaths, load_artifact};
use crate::canonical::canonicalize;
use crate::error::{ModelLoadError, PipelineError, Result};
use crate::lexicon::{
    GazetteerArtifact, GazetteerRecognizer, LemmatizerArtifact, LexiconLemmatizer,
    LexiconTagger, LexiconTokenizer, TaggerArtifact, TokenizerArtifact,
};
use crate::model::{EntityKind, EntityRecognizer, Lemmatizer, PosTagger, Token, Tokenizer};

/// Every intermediate result of normalizing one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedQuery {
    pub tokens: Vec<Token>,
    pub tags: Vec<String>,
    pub lemmas: Vec<String>,
    /// The lookup key.
    pub canonical: String,
}

/// An entity found in the original input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityMatch {
    pub kind: EntityKind,
    /// The covered substring of the original input, casing intact.
    pub text: String,
    /// Byte offsets of `text` in the original input.
    pub range: Range<usize>,
}

/// Tokenizer, tagger, lemmatizer and one recognizer per entity kind.
///
/// Models are read-only once constructed, so a pipeline can be shared
/// across sequential calls (and across threads, since every model is
/// `Send + Sync`).
pub struct LinguisticPipeline {
    tokenizer: Box<dyn Tokenizer>,
    tagger: Box<dyn PosTagger>,
    lemmatizer: Box<dyn Lemmatizer>,
    person: Box<dyn EntityRecognizer>,
    location: Box<dyn EntityRecognizer>,
}

impl LinguisticPipeline {
    /// Assemble a pipeline from already constructed models.
    pub fn new(
        tokenizer: impl Tokenizer + 'static,
        tagger: impl PosTagger + 'static,
        lemmatizer: impl Lemmatizer + 'static,
        person: impl EntityRecognizer + 'static,
        location: impl EntityRecognizer + 'static,
    ) -> Self {
        Self {
            tokenizer: Box::new(tokenizer),
            tagger: Box::new(tagger),
            lemmatizer: Box::new(lemmatizer),
            person: Box::new(person),
            location: Box::new(location),
        }
    }

    /// Load all five lexicon models.
    ///
    /// Fails on the first artifact that is missing or malformed; a
    /// partially loaded pipeline is never returned.
    pub fn initialize(paths: &ModelPaths) -> std::result::Result<Self, ModelLoadError> {
        let tokenizer: TokenizerArtifact =
            load_artifact(ArtifactKind::Tokenizer, paths.path(ArtifactKind::Tokenizer))?;
        let tagger: TaggerArtifact = load_artifact(ArtifactKind::Pos, paths.path(ArtifactKind::Pos))?;
        let lemmatizer: LemmatizerArtifact =
            load_artifact(ArtifactKind::Lemmatizer, paths.path(ArtifactKind::Lemmatizer))?;
        let person = load_recognizer(ArtifactKind::Person, EntityKind::Person, paths)?;
        let location = load_recognizer(ArtifactKind::Location, EntityKind::Location, paths)?;

        info!("Linguistic models loaded");

        Ok(Self::new(
            LexiconTokenizer::new(tokenizer),
            LexiconTagger::new(tagger),
            LexiconLemmatizer::new(lemmatizer),
            person,
            location,
        ))
    }

    /// Load the models from `dir` using the default artifact file names.
    pub fn from_dir(dir: impl AsRef<Path>) -> std::result::Result<Self, ModelLoadError> {
        Self::initialize(&ModelPaths::in_dir(dir))
    }

    /// Split `text` into tokens.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        self.tokenizer.tokenize(text)
    }

    /// Run the full normalization and keep every intermediate result.
    pub fn analyze(&self, text: &str) -> Result<NormalizedQuery> {
        let tokens = self.tokenizer.tokenize(text)?;

        let tags = self.tagger.tag(&tokens)?;
        ensure_parallel("tagger", tokens.len(), tags.len())?;

        let lemmas = self.lemmatizer.lemmatize(&tokens, &tags)?;
        ensure_parallel("lemmatizer", tokens.len(), lemmas.len())?;

        let canonical = canonicalize(&lemmas, &tags);
        debug!(canonical = %canonical, tokens = tokens.len(), "Normalized input");

        Ok(NormalizedQuery {
            tokens,
            tags,
            lemmas,
            canonical,
        })
    }

    /// The canonical phrase of `text`.
    pub fn normalize(&self, text: &str) -> Result<String> {
        Ok(self.analyze(text)?.canonical)
    }

    /// First entity of `kind` in `text`, if any.
    pub fn find_entity(&self, kind: EntityKind, text: &str) -> Result<Option<EntityMatch>> {
        let tokens = self.tokenizer.tokenize(text)?;
        let spans = self.recognizer(kind).find(&tokens)?;

        let Some(span) = spans.first() else {
            return Ok(None);
        };
        if span.is_empty() || span.end > tokens.len() {
            return Err(PipelineError::SpanOutOfBounds {
                start: span.start,
                end: span.end,
                len: tokens.len(),
            });
        }

        let range = tokens[span.start].range.start..tokens[span.end - 1].range.end;
        let covered = text
            .get(range.clone())
            .ok_or_else(|| PipelineError::model(format!("token offsets {range:?} do not fit the input")))?;

        debug!(kind = %kind, entity = covered, "Entity found");
        Ok(Some(EntityMatch {
            kind,
            text: covered.to_string(),
            range,
        }))
    }

    fn recognizer(&self, kind: EntityKind) -> &dyn EntityRecognizer {
        match kind {
            EntityKind::Person => self.person.as_ref(),
            EntityKind::Location => self.location.as_ref(),
        }
    }
}

impl std::fmt::Debug for LinguisticPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinguisticPipeline").finish_non_exhaustive()
    }
}

fn load_recognizer(
    artifact: ArtifactKind,
    expected: EntityKind,
    paths: &ModelPaths,
) -> std::result::Result<GazetteerRecognizer, ModelLoadError> {
    let model: GazetteerArtifact = load_artifact(artifact, paths.path(artifact))?;
    if model.entity != expected {
        return Err(ModelLoadError::Invalid {
            artifact,
            reason: format!("recognizes '{}' entities, expected '{expected}'", model.entity),
        });
    }
    Ok(GazetteerRecognizer::new(model))
}

fn ensure_parallel(stage: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(PipelineError::Misaligned {
            stage,
            expected,
            found,
        })
    }
}
