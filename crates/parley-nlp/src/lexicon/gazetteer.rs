//! Name-list entity recognizer.
//!
//! Matches known names longest-first, optionally continuing a match over
//! following capitalized words, and opens spans after cue words such as
//! honorifics (`Dr.`) or geographic designators (`Mount`).

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::artifact::ModelArtifact;
use crate::error::Result;
use crate::model::{EntityKind, EntityRecognizer, Span, Token};

/// On-disk form of a recognizer model.
#[derive(Debug, Clone, Deserialize)]
pub struct GazetteerArtifact {
    pub language: String,
    /// The entity class this model recognizes.
    pub entity: EntityKind,
    /// Known names, one per entry; multi-word names are space separated.
    pub names: Vec<String>,
    /// Continue a name match over following capitalized words.
    #[serde(default)]
    pub extend_capitalized: bool,
    /// Words that introduce an entity made of the capitalized words after them.
    #[serde(default)]
    pub cues: Vec<String>,
    /// Whether the cue itself belongs to the span.
    #[serde(default)]
    pub include_cue: bool,
}

impl ModelArtifact for GazetteerArtifact {
    fn language(&self) -> &str {
        &self.language
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.names.is_empty() && self.cues.is_empty() {
            return Err(format!("{} model has no names and no cues", self.entity));
        }
        if self.names.iter().any(|n| n.trim().is_empty()) {
            return Err(format!("{} model contains an empty name", self.entity));
        }
        Ok(())
    }
}

/// Case-sensitive gazetteer recognizer.
#[derive(Debug, Clone)]
pub struct GazetteerRecognizer {
    kind: EntityKind,
    /// First word → names starting with it, longest first.
    names: HashMap<String, Vec<Vec<String>>>,
    extend_capitalized: bool,
    cues: HashSet<String>,
    include_cue: bool,
}

impl GazetteerRecognizer {
    pub fn new(artifact: GazetteerArtifact) -> Self {
        let mut names: HashMap<String, Vec<Vec<String>>> = HashMap::new();
        for name in &artifact.names {
            let words: Vec<String> = name.split_whitespace().map(str::to_string).collect();
            if let Some(first) = words.first() {
                names.entry(first.clone()).or_default().push(words);
            }
        }
        for candidates in names.values_mut() {
            candidates.sort_by_key(|words| std::cmp::Reverse(words.len()));
        }

        Self {
            kind: artifact.entity,
            names,
            extend_capitalized: artifact.extend_capitalized,
            cues: artifact.cues.into_iter().collect(),
            include_cue: artifact.include_cue,
        }
    }

    /// The entity class this recognizer reports.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    fn match_at(&self, tokens: &[Token], i: usize) -> Option<Span> {
        if self.cues.contains(&tokens[i].text) {
            let end = capitalized_run(tokens, i + 1);
            if end > i + 1 {
                let start = if self.include_cue { i } else { i + 1 };
                return Some(Span::new(start, end));
            }
        }

        let candidates = self.names.get(&tokens[i].text)?;
        let words = candidates.iter().find(|words| {
            words.len() <= tokens.len() - i
                && words
                    .iter()
                    .zip(&tokens[i..])
                    .all(|(word, token)| *word == token.text)
        })?;

        let mut end = i + words.len();
        if self.extend_capitalized {
            end = capitalized_run(tokens, end);
        }
        Some(Span::new(i, end))
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn find(&self, tokens: &[Token]) -> Result<Vec<Span>> {
        let mut spans = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            match self.match_at(tokens, i) {
                Some(span) => {
                    i = span.end;
                    spans.push(span);
                }
                None => i += 1,
            }
        }
        Ok(spans)
    }
}

/// End index of the run of capitalized words starting at `from`.
fn capitalized_run(tokens: &[Token], from: usize) -> usize {
    tokens[from.min(tokens.len())..]
        .iter()
        .take_while(|t| is_capitalized(&t.text))
        .count()
        + from.min(tokens.len())
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
        && word.chars().all(|c| c.is_alphabetic() || c == '-' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| Token::new(*w, 0..0)).collect()
    }

    fn person() -> GazetteerRecognizer {
        GazetteerRecognizer::new(GazetteerArtifact {
            language: "en".to_string(),
            entity: EntityKind::Person,
            names: vec![
                "John".to_string(),
                "Neil Armstrong".to_string(),
                "Neil".to_string(),
            ],
            extend_capitalized: true,
            cues: vec!["Dr.".to_string()],
            include_cue: false,
        })
    }

    fn location() -> GazetteerRecognizer {
        GazetteerRecognizer::new(GazetteerArtifact {
            language: "en".to_string(),
            entity: EntityKind::Location,
            names: vec!["Berlin".to_string(), "New York".to_string()],
            extend_capitalized: false,
            cues: vec!["Mount".to_string()],
            include_cue: true,
        })
    }

    #[test]
    fn test_single_word_name() {
        let spans = person()
            .find(&tokens(&["John", "visited", "Berlin"]))
            .unwrap();
        assert_eq!(spans, vec![Span::new(0, 1)]);
    }

    #[test]
    fn test_longest_match_wins() {
        let spans = person()
            .find(&tokens(&["was", "Neil", "Armstrong", "first", "?"]))
            .unwrap();
        assert_eq!(spans, vec![Span::new(1, 3)]);
    }

    #[test]
    fn test_extends_over_capitalized_words() {
        let spans = person()
            .find(&tokens(&["John", "Smith", "lives", "here"]))
            .unwrap();
        assert_eq!(spans, vec![Span::new(0, 2)]);
    }

    #[test]
    fn test_cue_excluded_from_person_span() {
        let spans = person()
            .find(&tokens(&["ask", "Dr.", "Watson", "today"]))
            .unwrap();
        assert_eq!(spans, vec![Span::new(2, 3)]);
    }

    #[test]
    fn test_cue_without_name_is_ignored() {
        let spans = person().find(&tokens(&["Dr.", "who", "?"])).unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_cue_included_in_location_span() {
        let spans = location()
            .find(&tokens(&["climb", "Mount", "Everest"]))
            .unwrap();
        assert_eq!(spans, vec![Span::new(1, 3)]);
    }

    #[test]
    fn test_multiple_spans_in_order() {
        let spans = location()
            .find(&tokens(&["Berlin", "and", "New", "York"]))
            .unwrap();
        assert_eq!(spans, vec![Span::new(0, 1), Span::new(2, 4)]);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(location().find(&tokens(&["berlin", "rocks"])).unwrap().is_empty());
    }

    #[test]
    fn test_partial_multiword_name_does_not_match() {
        assert!(location().find(&tokens(&["New", "ideas"])).unwrap().is_empty());
    }

    #[test]
    fn test_no_tokens() {
        assert!(person().find(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_validate() {
        let artifact = GazetteerArtifact {
            language: "en".to_string(),
            entity: EntityKind::Location,
            names: vec![],
            extend_capitalized: false,
            cues: vec![],
            include_cue: false,
        };
        assert!(artifact.validate().is_err());
    }
}
