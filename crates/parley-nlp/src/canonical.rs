//! The normalization contract that turns lemmas into a lookup key.
//!
//! Knowledge-base keys are written against this contract, so it lives in
//! one place and is tested on its own:
//!
//! 1. punctuation is removed from every lemma;
//! 2. lemmas left empty are dropped, as is the possessive clitic
//!    (a lemma tagged [`POSSESSIVE_TAG`]);
//! 3. the remaining lemmas are lowercased and joined with single spaces.

/// Penn Treebank tag of the possessive clitic (`'s` in `Earth's`).
pub const POSSESSIVE_TAG: &str = "POS";

/// Punctuation as far as tokenization and canonicalization are concerned.
pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{2018}' // ‘
                | '\u{2019}' // ’
                | '\u{201C}' // “
                | '\u{201D}' // ”
                | '\u{2013}' // –
                | '\u{2014}' // —
                | '\u{2026}' // …
                | '\u{00AB}' // «
                | '\u{00BB}' // »
                | '\u{00BF}' // ¿
                | '\u{00A1}' // ¡
        )
}

/// Remove every punctuation character from `s`.
pub fn strip_punctuation(s: &str) -> String {
    s.chars().filter(|c| !is_punctuation(*c)).collect()
}

/// Collapse a lemma sequence into a canonical phrase.
///
/// `tags` runs parallel to `lemmas`; a shorter (or empty) tag slice simply
/// disables the possessive rule for the lemmas it does not cover.
pub fn canonicalize<L, T>(lemmas: &[L], tags: &[T]) -> String
where
    L: AsRef<str>,
    T: AsRef<str>,
{
    lemmas
        .iter()
        .enumerate()
        .filter(|(i, _)| {
            tags.get(*i)
                .is_none_or(|tag| AsRef::<str>::as_ref(tag) != POSSESSIVE_TAG)
        })
        .map(|(_, lemma)| strip_punctuation(lemma.as_ref()).to_lowercase())
        .flat_map(|lemma| {
            lemma
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `phrase` already satisfies the contract.
///
/// A canonical phrase is a fixed point: running it back through
/// [`canonicalize`] word by word yields the same string.
pub fn is_canonical(phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split(' ').collect();
    canonicalize::<_, &str>(&words, &[]) == phrase
}
