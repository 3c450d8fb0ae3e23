//! Rule-based tokenizer driven by an abbreviation and clitic list.

use std::collections::HashSet;

use serde::Deserialize;

use crate::artifact::ModelArtifact;
use crate::canonical::is_punctuation;
use crate::error::Result;
use crate::model::{Token, Tokenizer};

/// On-disk form of the tokenizer model.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenizerArtifact {
    pub language: String,
    /// Tokens kept whole even though they end in punctuation (`Dr.`).
    #[serde(default)]
    pub abbreviations: Vec<String>,
    /// Suffixes split off into their own token (`'s`, `n't`).
    #[serde(default)]
    pub clitics: Vec<String>,
}

impl ModelArtifact for TokenizerArtifact {
    fn language(&self) -> &str {
        &self.language
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(bad) = self
            .clitics
            .iter()
            .find(|c| c.is_empty() || c.chars().any(char::is_whitespace))
        {
            return Err(format!("invalid clitic '{bad}'"));
        }
        Ok(())
    }
}

/// Whitespace and punctuation tokenizer with clitic splitting.
#[derive(Debug, Clone)]
pub struct LexiconTokenizer {
    abbreviations: HashSet<String>,
    /// Lowercase, longest first.
    clitics: Vec<String>,
}

impl LexiconTokenizer {
    pub fn new(artifact: TokenizerArtifact) -> Self {
        let abbreviations = artifact
            .abbreviations
            .iter()
            .map(|a| a.to_lowercase())
            .collect();
        let mut clitics: Vec<String> = artifact
            .clitics
            .iter()
            .map(|c| fold(c))
            .collect();
        clitics.sort_by_key(|c| std::cmp::Reverse(c.chars().count()));

        Self {
            abbreviations,
            clitics,
        }
    }

    fn is_abbreviation(&self, s: &str) -> bool {
        self.abbreviations.contains(&s.to_lowercase())
    }

    fn is_clitic(&self, s: &str) -> bool {
        let folded = fold(s);
        self.clitics.iter().any(|c| *c == folded)
    }

    /// Byte index where a trailing clitic starts, if `word` has one.
    fn clitic_split(&self, word: &str) -> Option<usize> {
        self.clitics
            .iter()
            .find_map(|clitic| ends_with_clitic(word, clitic))
    }

    fn split_chunk(&self, chunk: &str, offset: usize, out: &mut Vec<Token>) {
        let mut push = |from: usize, to: usize| {
            out.push(Token::new(&chunk[from..to], offset + from..offset + to));
        };

        if self.is_abbreviation(chunk) || self.is_clitic(chunk) {
            push(0, chunk.len());
            return;
        }

        let mut begin = 0;
        while let Some(c) = chunk[begin..].chars().next() {
            if !is_punctuation(c) || self.is_clitic(&chunk[begin..]) {
                break;
            }
            let run = run_len(&chunk[begin..], c);
            push(begin, begin + run);
            begin += run;
        }

        let mut end = chunk.len();
        let mut trailing = Vec::new();
        while end > begin {
            let core = &chunk[begin..end];
            if self.is_abbreviation(core) {
                break;
            }
            let Some(c) = core.chars().next_back() else {
                break;
            };
            if !is_punctuation(c) {
                break;
            }
            let run_start = begin + core.trim_end_matches(c).len();
            trailing.push((run_start, end));
            end = run_start;
        }

        if end > begin {
            let core = &chunk[begin..end];
            match self.clitic_split(core) {
                Some(split) => {
                    push(begin, begin + split);
                    push(begin + split, end);
                }
                None => push(begin, end),
            }
        }

        for (from, to) in trailing.into_iter().rev() {
            push(from, to);
        }
    }
}

impl Tokenizer for LexiconTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        for (offset, chunk) in whitespace_chunks(text) {
            self.split_chunk(chunk, offset, &mut tokens);
        }
        Ok(tokens)
    }
}

/// Lowercase and map typographic apostrophes to `'`.
pub(crate) fn fold(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' => '\'',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

fn fold_char(c: char) -> char {
    match c {
        '\u{2019}' | '\u{2018}' => '\'',
        other => other.to_ascii_lowercase(),
    }
}

fn whitespace_chunks(text: &str) -> Vec<(usize, &str)> {
    let mut chunks = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                chunks.push((s, &text[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        chunks.push((s, &text[s..]));
    }
    chunks
}

/// Byte length of the run of `c` at the start of `s`.
fn run_len(s: &str, c: char) -> usize {
    s.len() - s.trim_start_matches(c).len()
}

fn ends_with_clitic(word: &str, clitic: &str) -> Option<usize> {
    let mut chars = word.char_indices().rev();
    let mut split = word.len();
    for expected in clitic.chars().rev() {
        let (i, c) = chars.next()?;
        if fold_char(c) != expected {
            return None;
        }
        split = i;
    }
    (split > 0).then_some(split)
}
