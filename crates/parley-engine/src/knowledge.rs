//! The canonical-phrase → answer mapping.
//!
//! A [`KnowledgeBase`] is built once and never mutated. Keys must already
//! be canonical (see [`parley_nlp::canonical`]); the built-in keys are
//! written in lemmatized form, e.g. `what be the capital of france` for
//! "What is the capital of France?".
//!
//! The external file format is TOML:
//!
//! ```toml
//! [[entry]]
//! phrase = "hi"
//! answer = "Hello! How can I assist you today?"
//! ```

use std::collections::HashMap;
use std::path::Path;

use parley_nlp::is_canonical;
use serde::Deserialize;
use tracing::debug;

use crate::error::KnowledgeError;

/// The compiled-in question set.
const BUILTIN: &[(&str, &str)] = &[
    ("hi", "Hello! How can I assist you today?"),
    ("hello", "Hello there! What's on your mind?"),
    (
        "how many continent be there",
        "There are seven continents: Africa, Antarctica, Asia, Australia, Europe, North America, and South America.",
    ),
    ("what be the capital of france", "The capital of France is Paris."),
    ("who write the play hamlet", "William Shakespeare wrote the play Hamlet."),
    (
        "what be the large ocean in the world",
        "The largest ocean in the world is the Pacific Ocean.",
    ),
    ("what be the color of ruby", "The most common color of a ruby is red."),
    (
        "which planet be know as the red planet",
        "The planet known as the Red Planet is Mars.",
    ),
    (
        "who be the first man on the moon",
        "The first man to walk on the moon was Neil Armstrong.",
    ),
    (
        "what be the main gas in earth atmosphere",
        "The main gas in Earth's atmosphere is nitrogen.",
    ),
    (
        "who invent the light bulb",
        "Thomas Edison is credited with inventing the practical incandescent light bulb.",
    ),
    (
        "what be the small country in the world",
        "The smallest country in the world is Vatican City.",
    ),
    (
        "i have doubt regard my study",
        "i understand studying is difficult ,im more than grateful to help you with it",
    ),
    ("how be you", "I'm doing great, thank you for asking!"),
    ("what be your purpose", "I am a conversational agent created to assist you."),
    ("your name", "I don't have a name, but you can call me Chatbot."),
    ("bye", "Goodbye! Have a nice day!"),
];

/// One entry of a knowledge file.
#[derive(Debug, Clone, Deserialize)]
struct RawEntry {
    phrase: String,
    answer: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawKnowledge {
    #[serde(default)]
    entry: Vec<RawEntry>,
}

/// Immutable mapping from canonical phrase to answer text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: HashMap<String, String>,
}

impl KnowledgeBase {
    /// The fixed question set the chatbot ships with.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(phrase, answer)| (phrase.to_string(), answer.to_string()))
                .collect(),
        }
    }

    /// Build from (phrase, answer) pairs, rejecting duplicates and
    /// phrases that could never match a normalized query.
    pub fn from_entries<I, P, A>(entries: I) -> Result<Self, KnowledgeError>
    where
        I: IntoIterator<Item = (P, A)>,
        P: Into<String>,
        A: Into<String>,
    {
        let mut map = HashMap::new();
        for (phrase, answer) in entries {
            let phrase = phrase.into();
            let answer = answer.into();

            if phrase.is_empty() {
                return Err(KnowledgeError::EmptyPhrase);
            }
            if !is_canonical(&phrase) {
                return Err(KnowledgeError::NonCanonicalPhrase(phrase));
            }
            if answer.trim().is_empty() {
                return Err(KnowledgeError::EmptyAnswer(phrase));
            }
            if map.contains_key(&phrase) {
                return Err(KnowledgeError::DuplicatePhrase(phrase));
            }
            map.insert(phrase, answer);
        }
        Ok(Self { entries: map })
    }

    /// Parse a TOML knowledge document.
    pub fn from_toml_str(contents: &str) -> Result<Self, KnowledgeError> {
        let raw: RawKnowledge = toml::from_str(contents)?;
        Self::from_entries(raw.entry.into_iter().map(|e| (e.phrase, e.answer)))
    }

    /// Load a TOML knowledge file.
    pub fn load(path: &Path) -> Result<Self, KnowledgeError> {
        let contents = std::fs::read_to_string(path).map_err(|e| KnowledgeError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;
        let knowledge = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), entries = knowledge.len(), "Loaded knowledge file");
        Ok(knowledge)
    }

    /// Exact lookup of a canonical phrase.
    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.entries.get(phrase).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, sorted by phrase.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(p, a)| (p.as_str(), a.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }

    /// All phrases, sorted.
    pub fn phrases(&self) -> Vec<&str> {
        self.entries().into_iter().map(|(p, _)| p).collect()
    }
}
