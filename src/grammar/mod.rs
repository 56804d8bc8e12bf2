//! Numeral expression grammar
//!
//! Compiles, once per (language, min, max) configuration, a single
//! composed pattern recognizing
//!
//! ```text
//! [ APPROX ] NUMERAL [-|space] UNIT
//! ```
//!
//! where the approximator is one of the profile's three phrase sets, the
//! numeral is a digit run with optional grouping separators or one of the
//! spelled number words in range (descending by value, so longer phrases
//! win over their prefixes), and the unit is the next whitespace-delimited
//! token. Approximators and number words match case-insensitively; the
//! unit is captured case-preserved.
//!
//! Exclusion rules are applied as post-match checks rather than pattern
//! lookarounds: a numeral running into a scale word ("two hundred") or a
//! decimal/time continuation ("3.5", "6:30") is rejected whole, and the
//! rejected text is consumed so its parts are not re-matched.

use crate::error::EngineError;
use crate::language::LanguageProfile;
use crate::models::{ApproximatorClass, NumeralMatch, NumeralValue};
use regex::Regex;

/// Characters that may precede an expression besides whitespace.
/// Mirrors the delimiters numeral studies see in newswire corpora:
/// dashes, currency signs, quotes and opening brackets.
const PREFIX_CHARS: &[char] = &['-', '$', '"', '[', '('];

/// Trailing punctuation stripped from a captured unit token.
const UNIT_TRAILING: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '"', '\''];

/// A compiled numeral-expression pattern for one (language, min, max)
/// configuration.
#[derive(Debug)]
pub struct ExpressionGrammar {
    pattern: Regex,
    profile: LanguageProfile,
}

impl ExpressionGrammar {
    /// Compile the composed pattern. Fails only at configuration time
    /// (invalid range, pattern too large); scanning itself cannot fail.
    pub fn compile(profile: &LanguageProfile, min: u64, max: u64) -> Result<Self, EngineError> {
        if min > max {
            return Err(EngineError::InvalidRange { min, max });
        }
        let pattern = Regex::new(&build_pattern(profile, min, max))?;
        Ok(Self {
            pattern,
            profile: profile.clone(),
        })
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    /// Find every non-overlapping numeral expression in a line,
    /// left-to-right. Once a match is consumed the scan resumes after it;
    /// a candidate rejected for a bad left boundary is retried one
    /// character further in so an embedded numeral is not lost.
    pub fn find_matches(&self, line: &str) -> Vec<NumeralMatch> {
        let mut matches = Vec::new();
        let mut pos = 0;
        while pos <= line.len() {
            let Some(caps) = self.pattern.captures_at(line, pos) else {
                break;
            };
            let whole = caps.get(0).expect("capture group 0 always present");
            let (start, end) = (whole.start(), whole.end());

            if !boundary_ok(line, start) {
                // The expression started mid-token ("Texactly 100");
                // advance one character and let the inner parts re-match.
                pos = start + char_width(line, start);
                continue;
            }

            // Part of a longer non-integer literal ("3.5", "6:30").
            if caps.name("cont").is_some() {
                pos = end;
                continue;
            }

            let unit = caps
                .name("unit")
                .and_then(|u| trim_unit(u.as_str()));

            // Composite numbers ("two hundred", "200 thousand") are a
            // single larger number; the leading numeral must not be
            // counted on its own.
            if let Some(u) = &unit {
                if self.profile.is_scale_word(u) {
                    pos = end;
                    continue;
                }
            }

            let approximator = approximator_of(&caps);
            let (value, is_word) = if let Some(digits) = caps.name("digits") {
                let stripped: String = digits
                    .as_str()
                    .chars()
                    .filter(|c| *c != self.profile.thousands_separator)
                    .collect();
                match stripped.parse::<u64>() {
                    Ok(v) => (NumeralValue::Parsed(v), false),
                    Err(_) => (NumeralValue::Malformed, false),
                }
            } else {
                let word = caps
                    .name("word")
                    .expect("numeral alternation has digits or word")
                    .as_str();
                match self.profile.word_to_value(&normalize_word(word)) {
                    Ok(v) => (NumeralValue::Parsed(v), true),
                    // Not in the profile's table: skip, never propagate.
                    Err(_) => {
                        pos = end;
                        continue;
                    }
                }
            };

            matches.push(NumeralMatch {
                text: whole.as_str().to_string(),
                approximator,
                value,
                is_word,
                unit,
                span: (start, end),
            });
            pos = end;
        }
        matches
    }
}

/// The left edge must be the line start, whitespace, or one of the
/// corpus delimiter characters.
fn boundary_ok(line: &str, start: usize) -> bool {
    if start == 0 {
        return true;
    }
    line[..start]
        .chars()
        .next_back()
        .map(|c| c.is_whitespace() || PREFIX_CHARS.contains(&c))
        .unwrap_or(true)
}

fn char_width(line: &str, at: usize) -> usize {
    line[at..].chars().next().map(char::len_utf8).unwrap_or(1)
}

fn approximator_of(caps: &regex::Captures<'_>) -> ApproximatorClass {
    if caps.name("prec").is_some() {
        ApproximatorClass::Precise
    } else if caps.name("impr").is_some() {
        ApproximatorClass::Imprecise
    } else if caps.name("asym").is_some() {
        ApproximatorClass::Asymmetric
    } else {
        ApproximatorClass::None
    }
}

/// Strip trailing punctuation from a captured unit, preserving case.
fn trim_unit(raw: &str) -> Option<String> {
    let trimmed = raw.trim_end_matches(UNIT_TRAILING);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Collapse a matched number phrase to the canonical lookup form.
fn normalize_word(word: &str) -> String {
    word.split(['-', ' ', '\t'])
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Assemble the composed pattern text for one configuration.
fn build_pattern(profile: &LanguageProfile, min: u64, max: u64) -> String {
    let approx = format!(
        r"(?:(?:(?P<prec>{})|(?P<impr>{})|(?P<asym>{}))\s+)?",
        phrase_alternation(profile.precise),
        phrase_alternation(profile.imprecise),
        phrase_alternation(profile.asymmetric),
    );

    let sep = regex::escape(&profile.thousands_separator.to_string());
    let digits = format!(r"(?P<digits>\d+(?:{sep}\d{{3}})*)");

    let words = profile.number_words_in_range(min, max);
    let numeral = if words.is_empty() {
        format!("(?:{digits})")
    } else {
        let alternation = words
            .iter()
            .map(|w| word_pattern(&w.text))
            .collect::<Vec<_>>()
            .join("|");
        format!("(?:{digits}|(?P<word>{alternation}))")
    };

    let dec = regex::escape(&profile.decimal_separator.to_string());
    format!(r"(?i){approx}{numeral}\b(?P<cont>{dec}\d+|:\d+)?(?:[ \-](?P<unit>\S+))?")
}

/// Turn a phrase list into an alternation, longest phrase first so that
/// multi-word phrases are preferred, with flexible internal whitespace.
fn phrase_alternation(phrases: &[&str]) -> String {
    let mut sorted: Vec<&str> = phrases.to_vec();
    sorted.sort_by_key(|p| std::cmp::Reverse(p.len()));
    sorted
        .iter()
        .map(|p| {
            p.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Turn a spelled number into a sub-pattern: hyphens and spaces are
/// interchangeable and the "and" joiner is optional, so "one hundred and
/// one" also matches "one hundred one" and "one-hundred-and-one".
fn word_pattern(text: &str) -> String {
    let tokens: Vec<&str> = text.split([' ', '-']).filter(|t| !t.is_empty()).collect();
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if *token == "and" {
            out.push_str(r"(?:and[\s\-]+)?");
        } else {
            out.push_str(&regex::escape(token));
            if i + 1 < tokens.len() {
                out.push_str(r"[\s\-]+");
            }
        }
    }
    out
}
