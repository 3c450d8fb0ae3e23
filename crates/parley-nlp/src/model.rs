//! Model capability traits and the values they exchange.
//!
//! Each linguistic model exposes one narrow capability. The pipeline only
//! talks to these traits, so any model can be swapped for another backend
//! or a test double without touching the response logic.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A token with the byte range it covers in the original input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token text as it appears in the input.
    pub text: String,
    /// Byte offsets into the original input.
    pub range: Range<usize>,
}

impl Token {
    /// Create a token from its text and byte offsets.
    pub fn new(text: impl Into<String>, range: Range<usize>) -> Self {
        Self {
            text: text.into(),
            range,
        }
    }
}

/// A half-open range of token indices identified by a recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Entity classes the pipeline can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Person,
    Location,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Person, EntityKind::Location];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits raw text into tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;
}

/// Assigns one part-of-speech tag per token.
pub trait PosTagger: Send + Sync {
    fn tag(&self, tokens: &[Token]) -> Result<Vec<String>>;
}

/// Reduces each (token, tag) pair to its dictionary form.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, tokens: &[Token], tags: &[String]) -> Result<Vec<String>>;
}

/// Finds entity spans of a single kind in a token sequence.
pub trait EntityRecognizer: Send + Sync {
    /// Spans are returned in text order.
    fn find(&self, tokens: &[Token]) -> Result<Vec<Span>>;
}
