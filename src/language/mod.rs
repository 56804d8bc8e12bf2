//! Language profiles
//!
//! Per-language constants for the census engine: digit separators, the
//! approximator phrase vocabularies, scale words, and the number-word
//! generator. Supported languages form a closed enum; adding one is a
//! compile-time extension, not a runtime string match.

pub mod english;
pub mod german;

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Spelled number words are generated per value. Beyond this bound,
/// spelled forms essentially never occur as standalone tokens in corpus
/// text and would bloat the compiled alternation, so generation stops
/// here regardless of the configured range; digit matching is unaffected.
pub const WORD_GENERATION_LIMIT: u64 = 1_000;

/// A corpus language supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    German,
}

impl Language {
    /// Two-letter language id, as used in configuration.
    pub fn id(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
        }
    }

    /// Human-readable language name.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::German => "German",
        }
    }

    /// All supported languages.
    pub fn all() -> &'static [Language] {
        &[Language::English, Language::German]
    }

    /// Build the immutable profile for this language.
    pub fn profile(&self) -> LanguageProfile {
        match self {
            Language::English => LanguageProfile {
                language: *self,
                thousands_separator: ',',
                decimal_separator: '.',
                precise: english::PRECISE,
                imprecise: english::IMPRECISE,
                asymmetric: english::ASYMMETRIC,
                scale_words: english::SCALE_WORDS,
            },
            Language::German => LanguageProfile {
                language: *self,
                thousands_separator: '.',
                decimal_separator: ',',
                precise: german::PRECISE,
                imprecise: german::IMPRECISE,
                asymmetric: german::ASYMMETRIC,
                scale_words: german::SCALE_WORDS,
            },
        }
    }
}

impl FromStr for Language {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "de" | "german" | "deutsch" => Ok(Language::German),
            other => Err(EngineError::UnrecognizedLanguage(other.to_string())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A spelled number word and the integer it denotes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberWord {
    pub text: String,
    pub value: u64,
}

/// Per-language constants consumed by the grammar and the classifier.
/// Immutable once constructed; one per configured corpus language.
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    pub language: Language,
    /// Grouping mark stripped before integer parsing ("1,000" / "1.000").
    pub thousands_separator: char,
    /// Starts a decimal continuation; a numeral running into one is part
    /// of a non-integer literal and is not counted.
    pub decimal_separator: char,
    /// Approximator phrases signalling exactness ("exactly", ...).
    pub precise: &'static [&'static str],
    /// Approximator phrases signalling vagueness ("about", ...).
    pub imprecise: &'static [&'static str],
    /// Approximator phrases signalling a directional bound ("more than", ...).
    pub asymmetric: &'static [&'static str],
    /// Words that scale a preceding numeral into a composite number.
    pub scale_words: &'static [&'static str],
}

impl LanguageProfile {
    /// Every generated number word whose value lies in `[lo, hi]`,
    /// ordered descending by value so that longer phrases win over their
    /// prefixes ("twenty-two" is tried before "twenty" before "two").
    pub fn number_words_in_range(&self, lo: u64, hi: u64) -> Vec<NumberWord> {
        let hi = hi.min(WORD_GENERATION_LIMIT);
        if lo > hi {
            return Vec::new();
        }
        let spell: fn(u64) -> String = match self.language {
            Language::English => english::spell,
            Language::German => german::spell,
        };
        (lo..=hi)
            .rev()
            .map(|value| NumberWord {
                text: spell(value),
                value,
            })
            .collect()
    }

    /// Parse a spelled number back to its integer value.
    pub fn word_to_value(&self, word: &str) -> Result<u64, EngineError> {
        let parsed = match self.language {
            Language::English => english::parse(word),
            Language::German => german::parse(word),
        };
        parsed.ok_or_else(|| EngineError::UnrecognizedWord(word.to_string()))
    }

    /// Whether a token scales a preceding numeral ("hundred", "million").
    pub fn is_scale_word(&self, token: &str) -> bool {
        let lowered = token.to_lowercase();
        self.scale_words.iter().any(|w| *w == lowered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_str() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::English);
        assert_eq!("german".parse::<Language>().unwrap(), Language::German);
    }

    #[test]
    fn test_unknown_language_is_an_error() {
        let err = "fr".parse::<Language>().unwrap_err();
        assert!(matches!(err, EngineError::UnrecognizedLanguage(ref l) if l == "fr"));
    }

    #[test]
    fn test_separators_per_language() {
        let en = Language::English.profile();
        assert_eq!(en.thousands_separator, ',');
        assert_eq!(en.decimal_separator, '.');
        let de = Language::German.profile();
        assert_eq!(de.thousands_separator, '.');
        assert_eq!(de.decimal_separator, ',');
    }

    #[test]
    fn test_number_words_descending_by_value() {
        let profile = Language::English.profile();
        let words = profile.number_words_in_range(1, 100);
        let values: Vec<u64> = words.iter().map(|w| w.value).collect();
        let mut sorted = values.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(values, sorted);
        // Longest-phrase-first for overlapping prefixes: 22 before 20 before 2.
        let pos = |v: u64| values.iter().position(|x| *x == v).unwrap();
        assert!(pos(22) < pos(20));
        assert!(pos(20) < pos(2));
    }

    #[test]
    fn test_number_words_respect_range() {
        let profile = Language::English.profile();
        let words = profile.number_words_in_range(10, 20);
        assert_eq!(words.len(), 11);
        assert!(words.iter().all(|w| (10..=20).contains(&w.value)));
        assert_eq!(words.first().unwrap().value, 20);
        assert_eq!(words.last().unwrap().value, 10);
    }

    #[test]
    fn test_number_words_empty_for_inverted_range() {
        let profile = Language::German.profile();
        assert!(profile.number_words_in_range(50, 10).is_empty());
    }

    #[test]
    fn test_generation_capped() {
        let profile = Language::English.profile();
        let words = profile.number_words_in_range(0, 1_000_000);
        assert_eq!(words.first().unwrap().value, WORD_GENERATION_LIMIT);
    }

    #[test]
    fn test_word_to_value_unrecognized() {
        let profile = Language::English.profile();
        let err = profile.word_to_value("gazillion").unwrap_err();
        assert!(matches!(err, EngineError::UnrecognizedWord(_)));
    }

    #[test]
    fn test_scale_word_lookup_is_case_insensitive() {
        let profile = Language::English.profile();
        assert!(profile.is_scale_word("Hundred"));
        assert!(profile.is_scale_word("THOUSAND"));
        assert!(!profile.is_scale_word("people"));
    }
}
