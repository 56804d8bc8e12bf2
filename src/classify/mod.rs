//! Numeral expression classification
//!
//! Pure classification of one matched expression along three axes:
//! approximator class (carried over from the match), roundness (multiples
//! of five) and unit discreteness. Discreteness is decided by an external
//! category-lookup capability; the engine only asks "is word W a member
//! of category C" and never owns the lexical resource behind the answer.

pub mod lexicon;

use crate::models::{Classification, Discreteness, NumeralMatch, Roundness};

/// Capability answering category membership questions for unit nouns.
///
/// Implementations must be deterministic for a fixed resource version so
/// classification stays reproducible across runs.
pub trait CategoryLookup {
    fn is_in_category(&self, word: &str, category: &str) -> bool;
}

impl<T: CategoryLookup + ?Sized> CategoryLookup for &T {
    fn is_in_category(&self, word: &str, category: &str) -> bool {
        (**self).is_in_category(word, category)
    }
}

/// Semantic unit categories in lookup order; the first category that
/// claims the unit decides its discreteness. Measure-like categories are
/// consulted before entity categories so that measure nouns shadowed by
/// broader senses ("pounds") resolve as quantities.
pub const CATEGORIES: &[(&str, Discreteness)] = &[
    ("time-period", Discreteness::Continuous),
    ("linear-unit", Discreteness::Continuous),
    ("monetary-unit", Discreteness::Continuous),
    ("speed-unit", Discreteness::Continuous),
    ("mass-unit", Discreteness::Continuous),
    ("organism", Discreteness::Discrete),
    ("location", Discreteness::Discrete),
    ("artifact", Discreteness::Discrete),
    ("material", Discreteness::Continuous),
];

/// Classify one match. Pure apart from the lookup calls; counting is the
/// accumulator's job, never this function's.
pub fn classify(m: &NumeralMatch, lookup: &dyn CategoryLookup) -> Classification {
    let roundness = match m.value.parsed() {
        Some(v) => Roundness::of(v),
        None => Roundness::NonRound,
    };
    let discreteness = match &m.unit {
        Some(unit) => CATEGORIES
            .iter()
            .find(|(name, _)| lookup.is_in_category(unit, name))
            .map(|(_, d)| *d)
            .unwrap_or(Discreteness::Unclassified),
        None => Discreteness::Unclassified,
    };
    Classification {
        approximator: m.approximator,
        roundness,
        discreteness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApproximatorClass, NumeralValue};

    /// Lookup backed by a fixed (word, category) list.
    struct MockLookup(Vec<(&'static str, &'static str)>);

    impl CategoryLookup for MockLookup {
        fn is_in_category(&self, word: &str, category: &str) -> bool {
            self.0
                .iter()
                .any(|(w, c)| *w == word.to_lowercase() && *c == category)
        }
    }

    fn match_with(value: u64, unit: Option<&str>) -> NumeralMatch {
        NumeralMatch {
            text: format!("{value} {}", unit.unwrap_or_default()),
            approximator: ApproximatorClass::None,
            value: NumeralValue::Parsed(value),
            is_word: false,
            unit: unit.map(str::to_string),
            span: (0, 0),
        }
    }

    #[test]
    fn test_roundness_follows_value() {
        let lookup = MockLookup(vec![]);
        assert_eq!(
            classify(&match_with(100, None), &lookup).roundness,
            Roundness::Round
        );
        assert_eq!(
            classify(&match_with(101, None), &lookup).roundness,
            Roundness::NonRound
        );
    }

    #[test]
    fn test_discrete_unit() {
        let lookup = MockLookup(vec![("people", "organism")]);
        let c = classify(&match_with(100, Some("people")), &lookup);
        assert_eq!(c.discreteness, Discreteness::Discrete);
    }

    #[test]
    fn test_continuous_unit() {
        let lookup = MockLookup(vec![("mph", "speed-unit")]);
        let c = classify(&match_with(100, Some("mph")), &lookup);
        assert_eq!(c.discreteness, Discreteness::Continuous);
    }

    #[test]
    fn test_first_category_wins() {
        // A word claimed by both a measure and an entity category
        // resolves by lookup order, not by the entity sense.
        let lookup = MockLookup(vec![("pounds", "monetary-unit"), ("pounds", "mass-unit")]);
        let c = classify(&match_with(5, Some("pounds")), &lookup);
        assert_eq!(c.discreteness, Discreteness::Continuous);
    }

    #[test]
    fn test_unknown_unit_is_unclassified() {
        let lookup = MockLookup(vec![]);
        let c = classify(&match_with(100, Some("widgets")), &lookup);
        assert_eq!(c.discreteness, Discreteness::Unclassified);
    }

    #[test]
    fn test_missing_unit_is_unclassified() {
        let lookup = MockLookup(vec![("people", "organism")]);
        let c = classify(&match_with(100, None), &lookup);
        assert_eq!(c.discreteness, Discreteness::Unclassified);
    }

    #[test]
    fn test_approximator_passes_through() {
        let lookup = MockLookup(vec![]);
        let mut m = match_with(10, None);
        m.approximator = ApproximatorClass::Asymmetric;
        assert_eq!(
            classify(&m, &lookup).approximator,
            ApproximatorClass::Asymmetric
        );
    }
}
