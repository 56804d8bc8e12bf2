//! Engine error types
//!
//! Everything here is a configuration-time failure: an unknown language,
//! an unusable value range, or a pattern that will not compile. Nothing
//! inside the scanning loop produces these; per-match problems (unknown
//! number words, malformed digit runs, unclassifiable units) are handled
//! locally and never abort a scan.

use thiserror::Error;

/// Errors raised while configuring the census engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unrecognized language '{0}' (supported: en, de)")]
    UnrecognizedLanguage(String),

    #[error("unrecognized number word: '{0}'")]
    UnrecognizedWord(String),

    #[error("invalid value range: min {min} exceeds max {max}")]
    InvalidRange { min: u64, max: u64 },

    #[error("value range [{min}, {max}] spans {span} slots, more than the histogram limit of {limit}")]
    RangeTooWide {
        min: u64,
        max: u64,
        span: u64,
        limit: u64,
    },

    #[error(
        "cannot merge frequency tables with different bounds: [{left_min}, {left_max}] vs [{right_min}, {right_max}]"
    )]
    RangeMismatch {
        left_min: u64,
        left_max: u64,
        right_min: u64,
        right_max: u64,
    },

    #[error("failed to compile expression pattern: {0}")]
    Pattern(#[from] regex::Error),
}
