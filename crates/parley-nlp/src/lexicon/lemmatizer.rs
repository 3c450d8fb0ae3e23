//! Dictionary lemmatizer: per-tag exception tables, then suffix rewrites.

use std::collections::HashMap;

use serde::Deserialize;

use super::tokenizer::fold;
use crate::artifact::ModelArtifact;
use crate::error::{PipelineError, Result};
use crate::model::{Lemmatizer, Token};

/// Rewrites a word ending, e.g. `ies` → `y` for plural nouns.
#[derive(Debug, Clone, Deserialize)]
pub struct LemmaRule {
    pub strip: String,
    #[serde(default)]
    pub append: String,
    /// Collapse a doubled final consonant (`stopp` → `stop`).
    #[serde(default)]
    pub undouble: bool,
    #[serde(default = "default_min_stem")]
    pub min_stem: usize,
}

fn default_min_stem() -> usize {
    2
}

/// On-disk form of the lemmatizer model.
#[derive(Debug, Clone, Deserialize)]
pub struct LemmatizerArtifact {
    pub language: String,
    /// Irregular forms that apply whatever the tag (`n't` → `not`).
    #[serde(default)]
    pub global: HashMap<String, String>,
    /// Tag → (word → lemma).
    #[serde(default)]
    pub exceptions: HashMap<String, HashMap<String, String>>,
    /// Tag → ordered rewrite rules; the first applicable rule wins.
    #[serde(default)]
    pub rules: HashMap<String, Vec<LemmaRule>>,
}

impl ModelArtifact for LemmatizerArtifact {
    fn language(&self) -> &str {
        &self.language
    }

    fn validate(&self) -> std::result::Result<(), String> {
        for (tag, rules) in &self.rules {
            if rules.iter().any(|r| r.strip.is_empty()) {
                return Err(format!("rule for tag '{tag}' strips nothing"));
            }
        }
        Ok(())
    }
}

/// Lemmatizer backed by exception tables and suffix rules.
#[derive(Debug, Clone)]
pub struct LexiconLemmatizer {
    global: HashMap<String, String>,
    exceptions: HashMap<String, HashMap<String, String>>,
    rules: HashMap<String, Vec<LemmaRule>>,
}

impl LexiconLemmatizer {
    pub fn new(artifact: LemmatizerArtifact) -> Self {
        let exceptions = artifact
            .exceptions
            .into_iter()
            .map(|(tag, table)| {
                let table = table
                    .into_iter()
                    .map(|(word, lemma)| (fold(&word), lemma))
                    .collect();
                (tag, table)
            })
            .collect();
        let global = artifact
            .global
            .into_iter()
            .map(|(word, lemma)| (fold(&word), lemma))
            .collect();

        Self {
            global,
            exceptions,
            rules: artifact.rules,
        }
    }

    /// Lemma of a single word under `tag`. Always lowercase.
    pub fn lemma(&self, word: &str, tag: &str) -> String {
        let folded = fold(word);

        if let Some(lemma) = self.exceptions.get(tag).and_then(|t| t.get(&folded)) {
            return lemma.to_lowercase();
        }
        if let Some(lemma) = self.global.get(&folded) {
            return lemma.to_lowercase();
        }

        self.rules
            .get(tag)
            .and_then(|rules| rules.iter().find_map(|rule| apply_rule(rule, &folded)))
            .unwrap_or(folded)
    }
}

impl Lemmatizer for LexiconLemmatizer {
    fn lemmatize(&self, tokens: &[Token], tags: &[String]) -> Result<Vec<String>> {
        if tokens.len() != tags.len() {
            return Err(PipelineError::Misaligned {
                stage: "lemmatizer input",
                expected: tokens.len(),
                found: tags.len(),
            });
        }

        Ok(tokens
            .iter()
            .zip(tags)
            .map(|(token, tag)| self.lemma(&token.text, tag))
            .collect())
    }
}

fn apply_rule(rule: &LemmaRule, word: &str) -> Option<String> {
    let stem = word.strip_suffix(rule.strip.as_str())?;
    if stem.chars().count() < rule.min_stem {
        return None;
    }

    let mut lemma = stem.to_string();
    if rule.undouble && ends_with_double_consonant(&lemma) {
        lemma.pop();
    }
    lemma.push_str(&rule.append);
    Some(lemma)
}

fn ends_with_double_consonant(word: &str) -> bool {
    let mut chars = word.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) => a == b && a.is_ascii_alphabetic() && !"aeioulsz".contains(a),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(strip: &str, append: &str, undouble: bool, min_stem: usize) -> LemmaRule {
        LemmaRule {
            strip: strip.to_string(),
            append: append.to_string(),
            undouble,
            min_stem,
        }
    }

    fn table(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn lemmatizer() -> LexiconLemmatizer {
        let mut exceptions = HashMap::new();
        exceptions.insert("VBZ".to_string(), table(&[("is", "be"), ("'s", "be")]));
        exceptions.insert("VBD".to_string(), table(&[("wrote", "write"), ("was", "be")]));
        exceptions.insert("JJS".to_string(), table(&[("largest", "large")]));

        let mut rules = HashMap::new();
        rules.insert("NNS".to_string(), vec![
            rule("ies", "y", false, 2),
            rule("s", "", false, 2),
        ]);
        rules.insert("VBD".to_string(), vec![
            rule("ied", "y", false, 2),
            rule("ed", "", true, 3),
        ]);
        rules.insert("JJS".to_string(), vec![rule("est", "", false, 3)]);

        LexiconLemmatizer::new(LemmatizerArtifact {
            language: "en".to_string(),
            global: table(&[("n't", "not")]),
            exceptions,
            rules,
        })
    }

    #[test]
    fn test_exceptions_take_priority() {
        let lem = lemmatizer();
        assert_eq!(lem.lemma("is", "VBZ"), "be");
        assert_eq!(lem.lemma("Was", "VBD"), "be");
        assert_eq!(lem.lemma("wrote", "VBD"), "write");
        assert_eq!(lem.lemma("largest", "JJS"), "large");
    }

    #[test]
    fn test_exceptions_are_tag_specific() {
        assert_eq!(lemmatizer().lemma("'s", "VBZ"), "be");
        assert_eq!(lemmatizer().lemma("'s", "POS"), "'s");
    }

    #[test]
    fn test_suffix_rules() {
        let lem = lemmatizer();
        assert_eq!(lem.lemma("studies", "NNS"), "study");
        assert_eq!(lem.lemma("continents", "NNS"), "continent");
        assert_eq!(lem.lemma("invented", "VBD"), "invent");
        assert_eq!(lem.lemma("stopped", "VBD"), "stop");
        assert_eq!(lem.lemma("called", "VBD"), "call");
        assert_eq!(lem.lemma("smallest", "JJS"), "small");
    }

    #[test]
    fn test_global_table() {
        assert_eq!(lemmatizer().lemma("n\u{2019}t", "RB"), "not");
    }

    #[test]
    fn test_unknown_words_are_lowercased() {
        assert_eq!(lemmatizer().lemma("France", "NNP"), "france");
        assert_eq!(lemmatizer().lemma("?", "."), "?");
    }

    #[test]
    fn test_lemmatize_rejects_misaligned_tags() {
        let tokens = vec![Token::new("hi", 0..2)];
        let err = lemmatizer().lemmatize(&tokens, &[]).unwrap_err();
        assert!(matches!(err, PipelineError::Misaligned { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_strip() {
        let mut rules = HashMap::new();
        rules.insert("NNS".to_string(), vec![rule("", "", false, 2)]);
        let artifact = LemmatizerArtifact {
            language: "en".to_string(),
            global: HashMap::new(),
            exceptions: HashMap::new(),
            rules,
        };
        assert!(artifact.validate().is_err());
    }
}
