//! German number words and approximator vocabulary
//!
//! German numerals agglutinate into single tokens ("einundzwanzig",
//! "zweitausenddreihundert"). The speller produces the standalone form
//! (final 1 is "eins", embedded 1 is "ein") and the parser decomposes
//! compounds by peeling "tausend", "hundert" and "und" in that order.

pub const PRECISE: &[&str] = &["genau", "exakt", "präzise"];

pub const IMPRECISE: &[&str] = &["etwa", "ungefähr", "rund", "circa", "zirka", "an die"];

pub const ASYMMETRIC: &[&str] = &[
    "mehr als",
    "weniger als",
    "mindestens",
    "höchstens",
    "fast",
    "beinahe",
    "knapp",
    "bis zu",
    "über",
    "unter",
];

/// Words that turn a preceding numeral into a composite number.
pub const SCALE_WORDS: &[&str] = &[
    "hundert",
    "tausend",
    "million",
    "millionen",
    "milliarde",
    "milliarden",
    "mio",
];

const SMALL: &[&str] = &[
    "null", "eins", "zwei", "drei", "vier", "fünf", "sechs", "sieben", "acht", "neun", "zehn",
    "elf", "zwölf",
];

const TEENS: &[&str] = &[
    "dreizehn",
    "vierzehn",
    "fünfzehn",
    "sechzehn",
    "siebzehn",
    "achtzehn",
    "neunzehn",
];

const TENS: &[&str] = &[
    "zwanzig", "dreißig", "vierzig", "fünfzig", "sechzig", "siebzig", "achtzig", "neunzig",
];

/// Spell an integer as a German number word. Supports values up to 999,999.
pub fn spell(n: u64) -> String {
    debug_assert!(n < 1_000_000, "spelled forms are generated below a million");
    if n == 0 {
        return "null".to_string();
    }
    compound(n, true)
}

/// Build the compound for `n`. `is_final` tells whether the segment ends
/// the word, which decides between "eins" and "ein".
fn compound(n: u64, is_final: bool) -> String {
    match n {
        1 if is_final => "eins".to_string(),
        1 => "ein".to_string(),
        2..=12 => SMALL[n as usize].to_string(),
        13..=19 => TEENS[(n - 13) as usize].to_string(),
        20..=99 => {
            let tens = TENS[(n / 10 - 2) as usize];
            match n % 10 {
                0 => tens.to_string(),
                r => format!("{}und{}", compound(r, false), tens),
            }
        }
        100..=999 => {
            let head = format!("{}hundert", compound(n / 100, false));
            match n % 100 {
                0 => head,
                r => format!("{}{}", head, compound(r, is_final)),
            }
        }
        _ => {
            let head = format!("{}tausend", compound(n / 1_000, false));
            match n % 1_000 {
                0 => head,
                r => format!("{}{}", head, compound(r, is_final)),
            }
        }
    }
}

fn basic_value(token: &str) -> Option<u64> {
    if let Some(i) = SMALL.iter().position(|w| *w == token) {
        return Some(i as u64);
    }
    if let Some(i) = TEENS.iter().position(|w| *w == token) {
        return Some(i as u64 + 13);
    }
    TENS.iter()
        .position(|w| *w == token)
        .map(|i| (i as u64 + 2) * 10)
}

/// Parse a German number word back to its integer value. Accepts the
/// embedded "ein" only inside compounds; the standalone article "ein" is
/// not a numeral here.
pub fn parse(text: &str) -> Option<u64> {
    let lowered = text.to_lowercase();
    let token = lowered.trim();
    if token.is_empty() {
        return None;
    }
    segment(token)
}

fn segment(word: &str) -> Option<u64> {
    if let Some(v) = basic_value(word) {
        return Some(v);
    }
    // "hundert" contains "und", so multipliers are peeled first.
    if let Some(i) = word.find("tausend") {
        let left = if i == 0 { 1 } else { unit_or_segment(&word[..i])? };
        let rest = &word[i + "tausend".len()..];
        let right = if rest.is_empty() {
            0
        } else {
            segment(strip_joiner(rest))?
        };
        return left.checked_mul(1_000)?.checked_add(right);
    }
    if let Some(i) = word.find("hundert") {
        let left = if i == 0 { 1 } else { unit_or_segment(&word[..i])? };
        let rest = &word[i + "hundert".len()..];
        let right = if rest.is_empty() {
            0
        } else {
            segment(strip_joiner(rest))?
        };
        return left.checked_mul(100)?.checked_add(right);
    }
    if let Some(i) = word.find("und") {
        let unit = unit_value(&word[..i])?;
        let tens = &word[i + "und".len()..];
        let tens_value = TENS
            .iter()
            .position(|w| *w == tens)
            .map(|i| (i as u64 + 2) * 10)?;
        return Some(tens_value + unit);
    }
    None
}

/// Old-style compounds join with "und" after a multiplier
/// ("einhundertundeins"); strip it before parsing the remainder.
fn strip_joiner(rest: &str) -> &str {
    match rest.strip_prefix("und") {
        Some(tail) if !tail.is_empty() => tail,
        _ => rest,
    }
}

fn unit_value(token: &str) -> Option<u64> {
    if token == "ein" || token == "eins" {
        return Some(1);
    }
    basic_value(token).filter(|v| (2..=9).contains(v))
}

fn unit_or_segment(token: &str) -> Option<u64> {
    if token == "ein" || token == "eins" {
        return Some(1);
    }
    segment(token)
}
