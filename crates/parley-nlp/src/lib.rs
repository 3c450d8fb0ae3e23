//! Linguistic pipeline for Parley.
//!
//! Turns raw user text into a canonical lookup phrase and finds person and
//! location mentions in it.
//!
//! # Architecture
//!
//! ```text
//! raw text ─▶ Tokenizer ─▶ PosTagger ─▶ Lemmatizer ─▶ canonicalize ─▶ phrase
//!                 │
//!                 └──────▶ EntityRecognizer (person | location) ─▶ EntityMatch
//! ```
//!
//! Each stage is a single-method trait in [`model`]; the [`lexicon`] module
//! provides the implementations loaded from the JSON artifacts in a model
//! directory (see [`ModelPaths`]).

pub mod artifact;
pub mod canonical;
pub mod error;
pub mod lexicon;
pub mod model;
pub mod pipeline;

pub use artifact::{ArtifactKind, LOCALE, ModelArtifact, ModelPaths};
pub use canonical::{canonicalize, is_canonical, strip_punctuation};
pub use error::{ModelLoadError, PipelineError, Result};
pub use model::{EntityKind, EntityRecognizer, Lemmatizer, PosTagger, Span, Token, Tokenizer};
pub use pipeline::{EntityMatch, LinguisticPipeline, NormalizedQuery};
