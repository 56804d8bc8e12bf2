//! Core data models for numcensus
//!
//! These models are used throughout the codebase for representing
//! matched numeral expressions and their classifications.

use serde::{Deserialize, Serialize};

/// Precision class of the approximator phrase preceding a numeral.
///
/// Derived purely from which phrase list matched immediately before the
/// numeral; `None` means the numeral stood on its own.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ApproximatorClass {
    Precise,
    Imprecise,
    /// Directional bound ("more than", "up to", "nearly", ...).
    Asymmetric,
    #[default]
    None,
}

impl std::fmt::Display for ApproximatorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApproximatorClass::Precise => write!(f, "precise"),
            ApproximatorClass::Imprecise => write!(f, "imprecise"),
            ApproximatorClass::Asymmetric => write!(f, "asymmetric"),
            ApproximatorClass::None => write!(f, "none"),
        }
    }
}

/// Whether a numeral is a colloquially "round" number.
///
/// Multiples of five count as round, not just multiples of ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Roundness {
    Round,
    NonRound,
}

impl Roundness {
    /// Classify an integer value.
    pub fn of(value: u64) -> Self {
        if value % 5 == 0 {
            Roundness::Round
        } else {
            Roundness::NonRound
        }
    }
}

impl std::fmt::Display for Roundness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Roundness::Round => write!(f, "round"),
            Roundness::NonRound => write!(f, "non-round"),
        }
    }
}

/// Whether the unit noun after a numeral denotes a countable entity
/// ("people") or a continuous quantity ("mph", "dollars").
///
/// `Unclassified` covers both a missing unit and a unit that matched no
/// known semantic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Discreteness {
    Discrete,
    Continuous,
    #[default]
    Unclassified,
}

impl std::fmt::Display for Discreteness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Discreteness::Discrete => write!(f, "discrete"),
            Discreteness::Continuous => write!(f, "continuous"),
            Discreteness::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Integer value carried by a matched numeral.
///
/// `Malformed` marks a digit run that survived the pattern but failed
/// integer parsing after separator stripping (e.g. a run too long for
/// u64). Such matches are logged and excluded from all histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumeralValue {
    Parsed(u64),
    Malformed,
}

impl NumeralValue {
    pub fn parsed(&self) -> Option<u64> {
        match self {
            NumeralValue::Parsed(v) => Some(*v),
            NumeralValue::Malformed => None,
        }
    }
}

/// A single numeral expression found in a line of text.
///
/// Created per match and consumed immediately by the classifier and the
/// frequency table; not retained across lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumeralMatch {
    /// Full matched text (approximator, numeral and unit as they
    /// appeared in the line).
    pub text: String,
    /// Which approximator phrase list matched before the numeral.
    pub approximator: ApproximatorClass,
    /// Parsed integer value, or `Malformed`.
    pub value: NumeralValue,
    /// True when the numeral was spelled out rather than written in digits.
    pub is_word: bool,
    /// The token following the numeral, trailing punctuation stripped,
    /// case preserved. `None` when the numeral ended the clause.
    pub unit: Option<String>,
    /// Byte span of the match within the scanned line.
    pub span: (usize, usize),
}

/// Classification of one numeral match along the three axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub approximator: ApproximatorClass,
    pub roundness: Roundness,
    pub discreteness: Discreteness,
}

/// A match whose unit fit no configured semantic category, kept with its
/// full text for offline inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedMatch {
    pub text: String,
    pub unit: String,
}
