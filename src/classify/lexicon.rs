//! File-backed category lexicon
//!
//! A small word-set adapter implementing [`CategoryLookup`]. The built-in
//! vocabulary covers common unit nouns in English and German; corpora with
//! richer vocabularies can load a JSON file mapping category names to word
//! lists, which replaces the defaults wholesale.

use super::CategoryLookup;
use anyhow::{Context, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

const TIME_PERIOD: &[&str] = &[
    "second", "seconds", "minute", "minutes", "hour", "hours", "day", "days", "week", "weeks",
    "month", "months", "year", "years", "decade", "decades", "century", "centuries", "sekunden",
    "minuten", "stunden", "tage", "tagen", "wochen", "monate", "monaten", "jahre", "jahren",
];

const LINEAR_UNIT: &[&str] = &[
    "meter", "meters", "metre", "metres", "mile", "miles", "km", "kilometer", "kilometers",
    "kilometre", "kilometres", "foot", "feet", "inch", "inches", "yard", "yards", "cm",
];

const MONETARY_UNIT: &[&str] = &[
    "dollar", "dollars", "euro", "euros", "cent", "cents", "pound", "pounds", "bucks", "usd",
    "eur", "$", "€",
];

const SPEED_UNIT: &[&str] = &["mph", "kph", "kmh", "km/h", "knots"];

const MASS_UNIT: &[&str] = &[
    "gram", "grams", "kilogram", "kilograms", "kg", "ton", "tons", "tonne", "tonnes", "kilo",
    "kilos",
];

const ORGANISM: &[&str] = &[
    "people", "person", "persons", "men", "women", "children", "kids", "students", "soldiers",
    "workers", "employees", "residents", "inhabitants", "players", "fans", "users", "members",
    "citizens", "passengers", "animals", "dogs", "cats", "birds", "horses", "trees", "leute",
    "menschen", "personen", "kinder", "einwohner", "mitarbeiter", "spieler", "zuschauer",
];

const LOCATION: &[&str] = &[
    "countries", "cities", "towns", "villages", "states", "regions", "islands", "places", "rooms",
    "länder", "städte", "dörfer", "orte",
];

const ARTIFACT: &[&str] = &[
    "cars", "books", "houses", "buildings", "ships", "planes", "phones", "computers", "tables",
    "chairs", "pages", "seats", "autos", "bücher", "häuser", "seiten",
];

const MATERIAL: &[&str] = &[
    "water", "sand", "gold", "oil", "steel", "wood", "rice", "sugar", "salt", "wasser", "öl",
    "holz",
];

/// Word sets per category, queried by the classifier.
#[derive(Debug, Clone)]
pub struct CategoryLexicon {
    sets: FxHashMap<String, FxHashSet<String>>,
}

/// On-disk format: `{ "organism": ["people", ...], ... }`
#[derive(Debug, Deserialize)]
struct LexiconFile(FxHashMap<String, Vec<String>>);

impl CategoryLexicon {
    /// The built-in vocabulary.
    pub fn builtin() -> Self {
        let mut lexicon = Self {
            sets: FxHashMap::default(),
        };
        for (category, words) in [
            ("time-period", TIME_PERIOD),
            ("linear-unit", LINEAR_UNIT),
            ("monetary-unit", MONETARY_UNIT),
            ("speed-unit", SPEED_UNIT),
            ("mass-unit", MASS_UNIT),
            ("organism", ORGANISM),
            ("location", LOCATION),
            ("artifact", ARTIFACT),
            ("material", MATERIAL),
        ] {
            lexicon.insert_all(category, words.iter().copied());
        }
        lexicon
    }

    /// Load a lexicon from a JSON file, replacing the built-in word sets.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lexicon file {}", path.display()))?;
        let parsed: LexiconFile = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse lexicon file {}", path.display()))?;
        let mut lexicon = Self {
            sets: FxHashMap::default(),
        };
        for (category, words) in parsed.0 {
            lexicon.insert_all(&category, words.iter().map(String::as_str));
        }
        debug!(
            categories = lexicon.sets.len(),
            "loaded category lexicon from {}",
            path.display()
        );
        Ok(lexicon)
    }

    /// Empty lexicon, useful as a null lookup.
    pub fn empty() -> Self {
        Self {
            sets: FxHashMap::default(),
        }
    }

    /// Add words to a category, normalizing to lowercase.
    pub fn insert_all<'a>(&mut self, category: &str, words: impl IntoIterator<Item = &'a str>) {
        let set = self.sets.entry(category.to_string()).or_default();
        for word in words {
            set.insert(word.to_lowercase());
        }
    }
}

impl CategoryLookup for CategoryLexicon {
    fn is_in_category(&self, word: &str, category: &str) -> bool {
        self.sets
            .get(category)
            .is_some_and(|set| set.contains(&word.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_lookups() {
        let lexicon = CategoryLexicon::builtin();
        assert!(lexicon.is_in_category("people", "organism"));
        assert!(lexicon.is_in_category("mph", "speed-unit"));
        assert!(lexicon.is_in_category("dollars", "monetary-unit"));
        assert!(lexicon.is_in_category("Leute", "organism"));
        assert!(!lexicon.is_in_category("widgets", "organism"));
        assert!(!lexicon.is_in_category("people", "no-such-category"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let lexicon = CategoryLexicon::builtin();
        assert!(lexicon.is_in_category("People", "organism"));
        assert!(lexicon.is_in_category("MPH", "speed-unit"));
    }

    #[test]
    fn test_empty_lexicon_answers_false() {
        let lexicon = CategoryLexicon::empty();
        assert!(!lexicon.is_in_category("people", "organism"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        write!(
            file,
            r#"{{"organism": ["gnus"], "material": ["plasma"]}}"#
        )
        .expect("write lexicon");
        let lexicon = CategoryLexicon::from_file(file.path()).expect("load lexicon");
        assert!(lexicon.is_in_category("gnus", "organism"));
        assert!(lexicon.is_in_category("plasma", "material"));
        // The file replaces the defaults rather than extending them.
        assert!(!lexicon.is_in_category("people", "organism"));
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        write!(file, "not json").expect("write file");
        assert!(CategoryLexicon::from_file(file.path()).is_err());
    }
}
