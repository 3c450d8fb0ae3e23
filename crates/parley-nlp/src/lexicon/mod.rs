//! Lexicon-backed implementations of the model traits.
//!
//! These are the models shipped in `models/`: small, inspectable JSON
//! documents rather than trained weights.

mod gazetteer;
mod lemmatizer;
mod tagger;
mod tokenizer;

pub use gazetteer::{GazetteerArtifact, GazetteerRecognizer};
pub use lemmatizer::{LemmaRule, LemmatizerArtifact, LexiconLemmatizer};
pub use tagger::{ContextRule, LexiconTagger, SuffixRule, TaggerArtifact};
pub use tokenizer::{LexiconTokenizer, TokenizerArtifact};
