//! Lexicon and suffix-rule part-of-speech tagger (Penn Treebank tags).

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use super::tokenizer::fold;
use crate::artifact::ModelArtifact;
use crate::canonical::is_punctuation;
use crate::error::Result;
use crate::model::{PosTagger, Token};

/// Guesses a tag from a word ending.
#[derive(Debug, Clone, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    pub tag: String,
    /// Characters that must remain once the suffix is removed.
    #[serde(default = "default_min_stem")]
    pub min_stem: usize,
    /// Endings that block the rule (`ss` keeps `class` from being plural).
    #[serde(default)]
    pub except: Vec<String>,
}

fn default_min_stem() -> usize {
    2
}

/// Rewrites the tag of `word` when the previous tag is one of `after`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextRule {
    pub word: String,
    pub tag: String,
    pub after: Vec<String>,
}

/// On-disk form of the tagger model.
#[derive(Debug, Clone, Deserialize)]
pub struct TaggerArtifact {
    pub language: String,
    /// Lowercase word to tag.
    pub lexicon: HashMap<String, String>,
    #[serde(default)]
    pub suffix_rules: Vec<SuffixRule>,
    #[serde(default)]
    pub context_rules: Vec<ContextRule>,
    #[serde(default = "default_tag")]
    pub default_tag: String,
    #[serde(default = "proper_noun_tag")]
    pub proper_noun_tag: String,
    #[serde(default = "number_tag")]
    pub number_tag: String,
    #[serde(default = "punctuation_tag")]
    pub punctuation_tag: String,
}

fn default_tag() -> String {
    "NN".to_string()
}

fn proper_noun_tag() -> String {
    "NNP".to_string()
}

fn number_tag() -> String {
    "CD".to_string()
}

fn punctuation_tag() -> String {
    ".".to_string()
}

impl ModelArtifact for TaggerArtifact {
    fn language(&self) -> &str {
        &self.language
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.lexicon.is_empty() {
            return Err("lexicon is empty".to_string());
        }
        if let Some(rule) = self.suffix_rules.iter().find(|r| r.suffix.is_empty()) {
            return Err(format!("suffix rule for tag '{}' has an empty suffix", rule.tag));
        }
        Ok(())
    }
}

/// Tokens after which a new sentence starts.
const SENTENCE_END: [&str; 3] = [".", "!", "?"];

/// Lexicon tagger with suffix guessing and contextual rewrites.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: HashMap<String, String>,
    suffix_rules: Vec<SuffixRule>,
    context_rules: HashMap<String, (String, HashSet<String>)>,
    default_tag: String,
    proper_noun_tag: String,
    number_tag: String,
    punctuation_tag: String,
}

impl LexiconTagger {
    pub fn new(artifact: TaggerArtifact) -> Self {
        let lexicon = artifact
            .lexicon
            .into_iter()
            .map(|(word, tag)| (fold(&word), tag))
            .collect();
        let context_rules = artifact
            .context_rules
            .into_iter()
            .map(|rule| {
                (
                    fold(&rule.word),
                    (rule.tag, rule.after.into_iter().collect()),
                )
            })
            .collect();

        Self {
            lexicon,
            suffix_rules: artifact.suffix_rules,
            context_rules,
            default_tag: artifact.default_tag,
            proper_noun_tag: artifact.proper_noun_tag,
            number_tag: artifact.number_tag,
            punctuation_tag: artifact.punctuation_tag,
        }
    }

    fn tag_word(&self, word: &str, sentence_start: bool) -> String {
        if word.chars().all(is_punctuation) {
            return self.punctuation_tag.clone();
        }
        if is_number(word) {
            return self.number_tag.clone();
        }

        let folded = fold(word);
        if let Some(tag) = self.lexicon.get(&folded) {
            return tag.clone();
        }
        if !sentence_start && starts_uppercase(word) {
            return self.proper_noun_tag.clone();
        }

        self.suffix_rules
            .iter()
            .find(|rule| suffix_applies(rule, &folded))
            .map(|rule| rule.tag.clone())
            .unwrap_or_else(|| self.default_tag.clone())
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, tokens: &[Token]) -> Result<Vec<String>> {
        let mut tags: Vec<String> = Vec::with_capacity(tokens.len());

        for (i, token) in tokens.iter().enumerate() {
            let sentence_start = i == 0 || SENTENCE_END.contains(&tokens[i - 1].text.as_str());
            tags.push(self.tag_word(&token.text, sentence_start));
        }

        for i in 1..tokens.len() {
            if let Some((tag, after)) = self.context_rules.get(&fold(&tokens[i].text))
                && after.contains(&tags[i - 1])
            {
                tags[i] = tag.clone();
            }
        }

        Ok(tags)
    }
}

fn is_number(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn suffix_applies(rule: &SuffixRule, word: &str) -> bool {
    let Some(stem) = word.strip_suffix(rule.suffix.as_str()) else {
        return false;
    };
    stem.chars().count() >= rule.min_stem && !rule.except.iter().any(|e| word.ends_with(e.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagger() -> LexiconTagger {
        let lexicon = [
            ("what", "WP"),
            ("is", "VBZ"),
            ("the", "DT"),
            ("of", "IN"),
            ("'s", "POS"),
            ("in", "IN"),
            ("known", "VBN"),
        ]
        .into_iter()
        .map(|(w, t)| (w.to_string(), t.to_string()))
        .collect();

        LexiconTagger::new(TaggerArtifact {
            language: "en".to_string(),
            lexicon,
            suffix_rules: vec![
                SuffixRule {
                    suffix: "ing".to_string(),
                    tag: "VBG".to_string(),
                    min_stem: 3,
                    except: vec![],
                },
                SuffixRule {
                    suffix: "s".to_string(),
                    tag: "NNS".to_string(),
                    min_stem: 2,
                    except: vec!["ss".to_string()],
                },
            ],
            context_rules: vec![ContextRule {
                word: "'s".to_string(),
                tag: "VBZ".to_string(),
                after: vec!["WP".to_string()],
            }],
            default_tag: default_tag(),
            proper_noun_tag: proper_noun_tag(),
            number_tag: number_tag(),
            punctuation_tag: punctuation_tag(),
        })
    }

    fn tag(words: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = words.iter().map(|w| Token::new(*w, 0..0)).collect();
        tagger().tag(&tokens).unwrap()
    }

    #[test]
    fn test_lexicon_and_proper_nouns() {
        assert_eq!(
            tag(&["What", "is", "the", "capital", "of", "France", "?"]),
            vec!["WP", "VBZ", "DT", "NN", "IN", "NNP", "."]
        );
    }

    #[test]
    fn test_sentence_initial_capital_is_not_proper() {
        assert_eq!(tag(&["Capital", "cities"]), vec!["NN", "NNS"]);
        assert_eq!(tag(&["ok", ".", "Running"]), vec!["NN", ".", "VBG"]);
    }

    #[test]
    fn test_suffix_rules_respect_stem_and_exceptions() {
        assert_eq!(tag(&["regarding", "king", "class", "doubts"]), vec![
            "VBG", "NN", "NN", "NNS"
        ]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tag(&["in", "1969", "3.5"]), vec!["IN", "CD", "CD"]);
    }

    #[test]
    fn test_context_rule_reads_contracted_is() {
        assert_eq!(tag(&["What", "'s", "that"]), vec!["WP", "VBZ", "NN"]);
        assert_eq!(tag(&["in", "Earth", "'s", "atmosphere"]), vec![
            "IN", "NNP", "POS", "NN"
        ]);
    }

    #[test]
    fn test_typographic_apostrophe_matches_lexicon() {
        assert_eq!(tag(&["in", "Earth", "\u{2019}s"]), vec!["IN", "NNP", "POS"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tag(&[]).is_empty());
    }

    #[test]
    fn test_validate_rejects_empty_lexicon() {
        let artifact = TaggerArtifact {
            language: "en".to_string(),
            lexicon: HashMap::new(),
            suffix_rules: vec![],
            context_rules: vec![],
            default_tag: default_tag(),
            proper_noun_tag: proper_noun_tag(),
            number_tag: number_tag(),
            punctuation_tag: punctuation_tag(),
        };
        assert!(artifact.validate().is_err());
    }
}
