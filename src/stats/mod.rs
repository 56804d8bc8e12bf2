//! Frequency accumulation
//!
//! The multi-key counting structure a census run folds its matches into:
//! two bounded per-value histograms (digit and spelled numerals), a
//! 12-cell cross table over (approximator × roundness × discreteness),
//! scalar buckets for asymmetric and unclassified matches, an unbounded
//! per-unit tally, and logs of excluded and malformed matches. One table
//! is exclusively owned by one scanner run; independent shards merge
//! their tables afterwards with an element-wise, commutative sum.

use crate::error::EngineError;
use crate::models::{
    ApproximatorClass, Classification, Discreteness, ExcludedMatch, NumeralMatch, NumeralValue,
    Roundness,
};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Upper bound on histogram width; wider ranges are a configuration
/// error rather than a multi-gigabyte allocation.
const MAX_HISTOGRAM_SPAN: u64 = 100_000_000;

/// A per-value counter bounded to `[min, max]`; values outside the range
/// are silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundedCounter {
    min: u64,
    max: u64,
    slots: Vec<u64>,
}

impl BoundedCounter {
    fn new(min: u64, max: u64) -> Self {
        Self {
            min,
            max,
            slots: vec![0; (max - min + 1) as usize],
        }
    }

    pub fn record(&mut self, value: u64) {
        if (self.min..=self.max).contains(&value) {
            self.slots[(value - self.min) as usize] += 1;
        }
    }

    pub fn get(&self, value: u64) -> u64 {
        if (self.min..=self.max).contains(&value) {
            self.slots[(value - self.min) as usize]
        } else {
            0
        }
    }

    pub fn sum(&self) -> u64 {
        self.slots.iter().sum()
    }

    fn reset(&mut self) {
        self.slots.fill(0);
    }

    fn merge(&mut self, other: &Self) {
        for (slot, value) in self.slots.iter_mut().zip(&other.slots) {
            *slot += value;
        }
    }

    /// Values with at least one occurrence, ascending.
    pub fn nonzero(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(i, count)| (self.min + i as u64, *count))
    }
}

/// Cell labels in storage order, matching the report layout.
pub const CROSS_LABELS: [&str; 12] = [
    "prec-round-dis",
    "prec-round-cont",
    "prec-nonr-dis",
    "prec-nonr-cont",
    "impr-round-dis",
    "impr-round-cont",
    "impr-nonr-dis",
    "impr-nonr-cont",
    "null-round-dis",
    "null-round-cont",
    "null-nonr-dis",
    "null-nonr-cont",
];

/// The 12-cell table over (approximator ∈ {precise, imprecise, none}) ×
/// roundness × (discreteness ∈ {discrete, continuous}). Asymmetric and
/// unclassified matches never land here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrossTable {
    cells: [u64; 12],
}

impl CrossTable {
    fn index(
        approximator: ApproximatorClass,
        roundness: Roundness,
        discreteness: Discreteness,
    ) -> Option<usize> {
        let a = match approximator {
            ApproximatorClass::Precise => 0,
            ApproximatorClass::Imprecise => 1,
            ApproximatorClass::None => 2,
            ApproximatorClass::Asymmetric => return None,
        };
        let r = match roundness {
            Roundness::Round => 0,
            Roundness::NonRound => 1,
        };
        let d = match discreteness {
            Discreteness::Discrete => 0,
            Discreteness::Continuous => 1,
            Discreteness::Unclassified => return None,
        };
        Some(a * 4 + r * 2 + d)
    }

    fn record(
        &mut self,
        approximator: ApproximatorClass,
        roundness: Roundness,
        discreteness: Discreteness,
    ) {
        if let Some(i) = Self::index(approximator, roundness, discreteness) {
            self.cells[i] += 1;
        }
    }

    pub fn get(
        &self,
        approximator: ApproximatorClass,
        roundness: Roundness,
        discreteness: Discreteness,
    ) -> u64 {
        Self::index(approximator, roundness, discreteness)
            .map(|i| self.cells[i])
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().sum()
    }

    /// (label, count) pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        CROSS_LABELS.iter().copied().zip(self.cells.iter().copied())
    }

    fn reset(&mut self) {
        self.cells = [0; 12];
    }

    fn merge(&mut self, other: &Self) {
        for (cell, value) in self.cells.iter_mut().zip(&other.cells) {
            *cell += value;
        }
    }
}

/// All counts accumulated over one scan, exclusively owned by the
/// scanner that fills it.
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyTable {
    min: u64,
    max: u64,
    numbers: BoundedCounter,
    number_words: BoundedCounter,
    cross: CrossTable,
    asymmetric: u64,
    unclassified_units: u64,
    units: FxHashMap<String, u64>,
    excluded: Vec<ExcludedMatch>,
    malformed: Vec<String>,
}

impl FrequencyTable {
    /// Create an empty table for `[min, max]`. Range problems are fatal
    /// here, before any line is read.
    pub fn new(min: u64, max: u64) -> Result<Self, EngineError> {
        if min > max {
            return Err(EngineError::InvalidRange { min, max });
        }
        let span = match (max - min).checked_add(1) {
            Some(span) => span,
            None => {
                return Err(EngineError::RangeTooWide {
                    min,
                    max,
                    span: u64::MAX,
                    limit: MAX_HISTOGRAM_SPAN,
                })
            }
        };
        if span > MAX_HISTOGRAM_SPAN {
            return Err(EngineError::RangeTooWide {
                min,
                max,
                span,
                limit: MAX_HISTOGRAM_SPAN,
            });
        }
        Ok(Self {
            min,
            max,
            numbers: BoundedCounter::new(min, max),
            number_words: BoundedCounter::new(min, max),
            cross: CrossTable::default(),
            asymmetric: 0,
            unclassified_units: 0,
            units: FxHashMap::default(),
            excluded: Vec::new(),
            malformed: Vec::new(),
        })
    }

    /// Fold one classified match into the table.
    ///
    /// Histogram counting is independent of classification outcome: an
    /// in-range numeral lands in its histogram whether or not its unit
    /// was classifiable.
    pub fn record(&mut self, m: &NumeralMatch, c: &Classification) {
        if let NumeralValue::Parsed(value) = m.value {
            if m.is_word {
                self.number_words.record(value);
            } else {
                self.numbers.record(value);
            }
        }

        match c.approximator {
            ApproximatorClass::Asymmetric => self.asymmetric += 1,
            approximator => {
                if c.discreteness == Discreteness::Unclassified {
                    self.unclassified_units += 1;
                    self.excluded.push(ExcludedMatch {
                        text: m.text.clone(),
                        unit: m.unit.clone().unwrap_or_default(),
                    });
                } else {
                    self.cross.record(approximator, c.roundness, c.discreteness);
                }
            }
        }

        if let Some(unit) = &m.unit {
            *self.units.entry(unit.clone()).or_insert(0) += 1;
        }
    }

    /// Log a digit run that failed integer parsing. Malformed matches
    /// are excluded from every histogram.
    pub fn record_malformed(&mut self, text: &str) {
        self.malformed.push(text.to_string());
    }

    /// Zero all counts, keeping the configured range.
    pub fn reset(&mut self) {
        self.numbers.reset();
        self.number_words.reset();
        self.cross.reset();
        self.asymmetric = 0;
        self.unclassified_units = 0;
        self.units.clear();
        self.excluded.clear();
        self.malformed.clear();
    }

    /// Total of in-range digit-numeral counts, for range-coverage
    /// reporting.
    pub fn sum(&self) -> u64 {
        self.numbers.sum()
    }

    /// Element-wise sum with another shard's table. Commutative and
    /// associative; bounds must agree.
    pub fn merge(&mut self, other: FrequencyTable) -> Result<(), EngineError> {
        if (self.min, self.max) != (other.min, other.max) {
            return Err(EngineError::RangeMismatch {
                left_min: self.min,
                left_max: self.max,
                right_min: other.min,
                right_max: other.max,
            });
        }
        self.numbers.merge(&other.numbers);
        self.number_words.merge(&other.number_words);
        self.cross.merge(&other.cross);
        self.asymmetric += other.asymmetric;
        self.unclassified_units += other.unclassified_units;
        for (unit, count) in other.units {
            *self.units.entry(unit).or_insert(0) += count;
        }
        self.excluded.extend(other.excluded);
        self.malformed.extend(other.malformed);
        Ok(())
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn numbers(&self) -> &BoundedCounter {
        &self.numbers
    }

    pub fn number_words(&self) -> &BoundedCounter {
        &self.number_words
    }

    pub fn cross(&self) -> &CrossTable {
        &self.cross
    }

    pub fn asymmetric(&self) -> u64 {
        self.asymmetric
    }

    pub fn unclassified_units(&self) -> u64 {
        self.unclassified_units
    }

    pub fn units(&self) -> &FxHashMap<String, u64> {
        &self.units
    }

    pub fn excluded(&self) -> &[ExcludedMatch] {
        &self.excluded
    }

    pub fn malformed(&self) -> &[String] {
        &self.malformed
    }

    /// Unit tally sorted descending by count, ties broken by name for a
    /// deterministic report.
    pub fn units_sorted(&self) -> Vec<(&str, u64)> {
        let mut units: Vec<(&str, u64)> = self
            .units
            .iter()
            .map(|(unit, count)| (unit.as_str(), *count))
            .collect();
        units.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NumeralValue;

    fn table() -> FrequencyTable {
        FrequencyTable::new(0, 10).expect("valid range")
    }

    fn digit_match(value: u64, unit: Option<&str>) -> NumeralMatch {
        NumeralMatch {
            text: format!("{value}"),
            approximator: ApproximatorClass::None,
            value: NumeralValue::Parsed(value),
            is_word: false,
            unit: unit.map(str::to_string),
            span: (0, 0),
        }
    }

    fn classification(
        approximator: ApproximatorClass,
        roundness: Roundness,
        discreteness: Discreteness,
    ) -> Classification {
        Classification {
            approximator,
            roundness,
            discreteness,
        }
    }

    fn plain(discreteness: Discreteness) -> Classification {
        classification(ApproximatorClass::None, Roundness::Round, discreteness)
    }

    #[test]
    fn test_empty_table() {
        let t = table();
        assert_eq!(t.numbers().get(3), 0);
        assert_eq!(t.sum(), 0);
    }

    #[test]
    fn test_invalid_range() {
        assert!(matches!(
            FrequencyTable::new(10, 5),
            Err(EngineError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_oversized_range() {
        assert!(matches!(
            FrequencyTable::new(0, u64::MAX),
            Err(EngineError::RangeTooWide { .. })
        ));
    }

    #[test]
    fn test_counts_accumulate() {
        let mut t = table();
        t.record(&digit_match(5, None), &plain(Discreteness::Discrete));
        t.record(&digit_match(5, None), &plain(Discreteness::Discrete));
        t.record(&digit_match(3, None), &plain(Discreteness::Discrete));
        assert_eq!(t.numbers().get(5), 2);
        assert_eq!(t.numbers().get(3), 1);
        assert_eq!(t.sum(), 3);
    }

    #[test]
    fn test_histogram_boundaries() {
        let mut t = table();
        for v in [0, 10, 11] {
            t.record(&digit_match(v, None), &plain(Discreteness::Discrete));
        }
        assert_eq!(t.numbers().get(0), 1);
        assert_eq!(t.numbers().get(10), 1);
        assert_eq!(t.numbers().get(11), 0);
        assert_eq!(t.sum(), 2);
    }

    #[test]
    fn test_word_and_digit_histograms_are_independent() {
        let mut t = table();
        let mut word = digit_match(7, None);
        word.is_word = true;
        t.record(&word, &plain(Discreteness::Discrete));
        t.record(&digit_match(7, None), &plain(Discreteness::Discrete));
        assert_eq!(t.numbers().get(7), 1);
        assert_eq!(t.number_words().get(7), 1);
    }

    #[test]
    fn test_out_of_range_value_still_classified() {
        // Range filtering applies to the histograms only; the cross
        // table still receives the classification.
        let mut t = table();
        t.record(
            &digit_match(500, Some("people")),
            &classification(
                ApproximatorClass::None,
                Roundness::Round,
                Discreteness::Discrete,
            ),
        );
        assert_eq!(t.sum(), 0);
        assert_eq!(
            t.cross().get(
                ApproximatorClass::None,
                Roundness::Round,
                Discreteness::Discrete
            ),
            1
        );
        assert_eq!(t.units().get("people"), Some(&1));
    }

    #[test]
    fn test_asymmetric_skips_cross_table() {
        let mut t = table();
        t.record(
            &digit_match(5, Some("people")),
            &classification(
                ApproximatorClass::Asymmetric,
                Roundness::Round,
                Discreteness::Discrete,
            ),
        );
        assert_eq!(t.asymmetric(), 1);
        assert_eq!(t.cross().total(), 0);
        // The unit tally still counts asymmetric matches.
        assert_eq!(t.units().get("people"), Some(&1));
        // And the in-range histogram slot is filled.
        assert_eq!(t.numbers().get(5), 1);
    }

    #[test]
    fn test_unclassified_records_both_signals() {
        let mut t = table();
        let m = NumeralMatch {
            text: "100 widgets".to_string(),
            approximator: ApproximatorClass::None,
            value: NumeralValue::Parsed(100),
            is_word: false,
            unit: Some("widgets".to_string()),
            span: (0, 11),
        };
        t.record(&m, &plain(Discreteness::Unclassified));
        assert_eq!(t.unclassified_units(), 1);
        assert_eq!(t.excluded().len(), 1);
        assert_eq!(t.excluded()[0].text, "100 widgets");
        assert_eq!(t.excluded()[0].unit, "widgets");
        assert_eq!(t.cross().total(), 0);
    }

    #[test]
    fn test_cross_table_cells() {
        let mut t = table();
        t.record(
            &digit_match(5, Some("mph")),
            &classification(
                ApproximatorClass::Imprecise,
                Roundness::Round,
                Discreteness::Continuous,
            ),
        );
        assert_eq!(
            t.cross().get(
                ApproximatorClass::Imprecise,
                Roundness::Round,
                Discreteness::Continuous
            ),
            1
        );
        assert_eq!(
            t.cross().get(
                ApproximatorClass::Imprecise,
                Roundness::Round,
                Discreteness::Discrete
            ),
            0
        );
    }

    #[test]
    fn test_malformed_bucket_touches_nothing_else() {
        let mut t = table();
        t.record_malformed("99999999999999999999999");
        assert_eq!(t.malformed().len(), 1);
        assert_eq!(t.sum(), 0);
        assert_eq!(t.cross().total(), 0);
        assert!(t.units().is_empty());
    }

    #[test]
    fn test_reset_keeps_configuration() {
        let mut t = table();
        t.record(&digit_match(5, Some("people")), &plain(Discreteness::Discrete));
        t.record_malformed("junk");
        t.reset();
        assert_eq!(t.sum(), 0);
        assert_eq!(t.cross().total(), 0);
        assert!(t.units().is_empty());
        assert!(t.excluded().is_empty());
        assert!(t.malformed().is_empty());
        assert_eq!((t.min(), t.max()), (0, 10));
        // Still usable after reset.
        t.record(&digit_match(5, None), &plain(Discreteness::Discrete));
        assert_eq!(t.numbers().get(5), 1);
    }

    #[test]
    fn test_merge_sums_element_wise() {
        let mut left = table();
        let mut right = table();
        left.record(&digit_match(5, Some("people")), &plain(Discreteness::Discrete));
        right.record(&digit_match(5, Some("people")), &plain(Discreteness::Discrete));
        right.record(
            &digit_match(3, None),
            &classification(
                ApproximatorClass::Asymmetric,
                Roundness::NonRound,
                Discreteness::Unclassified,
            ),
        );
        left.merge(right).expect("same bounds merge");
        assert_eq!(left.numbers().get(5), 2);
        assert_eq!(left.numbers().get(3), 1);
        assert_eq!(left.asymmetric(), 1);
        assert_eq!(left.units().get("people"), Some(&2));
    }

    #[test]
    fn test_merge_of_disjoint_halves_equals_single_pass() {
        let matches: Vec<NumeralMatch> = (0..=10)
            .map(|v| digit_match(v, Some("people")))
            .collect();

        let mut whole = table();
        for m in &matches {
            whole.record(m, &plain(Discreteness::Discrete));
        }

        let mut first = table();
        let mut second = table();
        for m in &matches[..5] {
            first.record(m, &plain(Discreteness::Discrete));
        }
        for m in &matches[5..] {
            second.record(m, &plain(Discreteness::Discrete));
        }
        first.merge(second).expect("same bounds merge");

        for v in 0..=10 {
            assert_eq!(first.numbers().get(v), whole.numbers().get(v));
        }
        assert_eq!(first.cross(), whole.cross());
        assert_eq!(first.units(), whole.units());
    }

    #[test]
    fn test_merge_rejects_mismatched_bounds() {
        let mut left = FrequencyTable::new(0, 10).expect("valid range");
        let right = FrequencyTable::new(0, 20).expect("valid range");
        assert!(matches!(
            left.merge(right),
            Err(EngineError::RangeMismatch { .. })
        ));
    }

    #[test]
    fn test_units_sorted_descending() {
        let mut t = table();
        for _ in 0..3 {
            t.record(&digit_match(1, Some("people")), &plain(Discreteness::Discrete));
        }
        t.record(&digit_match(2, Some("mph")), &plain(Discreteness::Continuous));
        t.record(&digit_match(3, Some("cars")), &plain(Discreteness::Discrete));
        let sorted = t.units_sorted();
        assert_eq!(sorted[0], ("people", 3));
        // Ties resolve alphabetically.
        assert_eq!(sorted[1], ("cars", 1));
        assert_eq!(sorted[2], ("mph", 1));
    }
}
