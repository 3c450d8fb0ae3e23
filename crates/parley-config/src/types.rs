//! Configuration types mapping to the TOML schema.
//!
//! Top-level config:
//! ```toml
//! [models]                 # model artifact directory and per-file overrides
//! [knowledge]              # external knowledge file
//! [chat]                   # interactive session text
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Greeting shown when a chat session starts.
pub const DEFAULT_GREETING: &str = "Hello! I'm an NLP-powered chatbot. How can I help you today?";

/// Input prompt of the chat session.
pub const DEFAULT_PROMPT: &str = "> ";

/// Model directory used when neither config nor CLI names one.
pub const DEFAULT_MODELS_DIR: &str = "models";

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
///
/// All sections are optional so that partial configs (e.g., project-local
/// overrides) can be loaded and merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParleyConfig {
    /// Model artifact locations.
    pub models: Option<ModelsConfig>,

    /// External knowledge file.
    pub knowledge: Option<KnowledgeConfig>,

    /// Chat session settings.
    pub chat: Option<ChatConfig>,
}

impl ParleyConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> crate::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Merge another config on top of this one (other takes priority).
    ///
    /// Sections merge field by field, so a project file that only sets
    /// `[models] dir` keeps the per-artifact overrides from the user file.
    pub fn merge(&mut self, other: ParleyConfig) {
        merge_section(&mut self.models, other.models, ModelsConfig::merge);
        merge_section(&mut self.knowledge, other.knowledge, KnowledgeConfig::merge);
        merge_section(&mut self.chat, other.chat, ChatConfig::merge);
    }

    /// The model directory, if configured.
    pub fn models_dir(&self) -> Option<&PathBuf> {
        self.models.as_ref().and_then(|m| m.dir.as_ref())
    }

    /// The knowledge file, if configured.
    pub fn knowledge_path(&self) -> Option<&PathBuf> {
        self.knowledge.as_ref().and_then(|k| k.path.as_ref())
    }

    /// The chat greeting, falling back to [`DEFAULT_GREETING`].
    pub fn greeting(&self) -> &str {
        self.chat
            .as_ref()
            .and_then(|c| c.greeting.as_deref())
            .unwrap_or(DEFAULT_GREETING)
    }

    /// The chat prompt, falling back to [`DEFAULT_PROMPT`].
    pub fn prompt(&self) -> &str {
        self.chat
            .as_ref()
            .and_then(|c| c.prompt.as_deref())
            .unwrap_or(DEFAULT_PROMPT)
    }
}

fn merge_section<T: Default>(base: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
    if let Some(other) = other {
        merge(base.get_or_insert_with(T::default), other);
    }
}

fn merge_field<T>(base: &mut Option<T>, other: Option<T>) {
    if other.is_some() {
        *base = other;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

/// `[models]`: where the five linguistic artifacts live.
///
/// Per-artifact entries are resolved against `dir` when relative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub dir: Option<PathBuf>,
    pub tokenizer: Option<PathBuf>,
    pub pos: Option<PathBuf>,
    pub lemmatizer: Option<PathBuf>,
    pub person: Option<PathBuf>,
    pub location: Option<PathBuf>,
}

impl ModelsConfig {
    fn merge(&mut self, other: ModelsConfig) {
        merge_field(&mut self.dir, other.dir);
        merge_field(&mut self.tokenizer, other.tokenizer);
        merge_field(&mut self.pos, other.pos);
        merge_field(&mut self.lemmatizer, other.lemmatizer);
        merge_field(&mut self.person, other.person);
        merge_field(&mut self.location, other.location);
    }

    /// Configured per-artifact overrides as `(name, path)` pairs, named
    /// like the config keys.
    pub fn overrides(&self) -> Vec<(&'static str, &PathBuf)> {
        [
            ("tokenizer", &self.tokenizer),
            ("pos", &self.pos),
            ("lemmatizer", &self.lemmatizer),
            ("person", &self.person),
            ("location", &self.location),
        ]
        .into_iter()
        .filter_map(|(name, path)| path.as_ref().map(|p| (name, p)))
        .collect()
    }
}

/// `[knowledge]`: replaces the built-in question set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    pub path: Option<PathBuf>,
}

impl KnowledgeConfig {
    fn merge(&mut self, other: KnowledgeConfig) {
        merge_field(&mut self.path, other.path);
    }
}

/// `[chat]`: interactive session text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub greeting: Option<String>,
    pub prompt: Option<String>,
}

impl ChatConfig {
    fn merge(&mut self, other: ChatConfig) {
        merge_field(&mut self.greeting, other.greeting);
        merge_field(&mut self.prompt, other.prompt);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
