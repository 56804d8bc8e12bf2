//! Corpus scanning pipeline
//!
//! Drives the grammar over a stream of text lines: strip the corpus line
//! prefix, enumerate matches, classify each one, fold it into the
//! frequency table. Lines are processed strictly in order and all
//! mutation happens on the processing thread; multiple files run as
//! independent scanner instances on the rayon pool and their tables are
//! merged afterwards, which is the only cross-instance interaction.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::classify::{classify, CategoryLookup};
use crate::error::EngineError;
use crate::grammar::ExpressionGrammar;
use crate::language::Language;
use crate::models::NumeralValue;
use crate::stats::FrequencyTable;
use serde::Serialize;

/// Progress callback, fired with the running line count.
pub type ProgressCallback = Box<dyn Fn(u64) + Send + Sync>;

/// Default progress interval, matching typical corpus sizes.
pub const DEFAULT_PROGRESS_EVERY: u64 = 100_000;

/// Counters describing one scan run, independent of the frequency table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Lines read from the source.
    pub lines: u64,
    /// Lines containing at least one valid numeral expression.
    pub matched_lines: u64,
    /// Digit-written numerals found (including out-of-range values).
    pub numerals: u64,
    /// Spelled-out numerals found (including out-of-range values).
    pub number_words: u64,
}

impl RunStats {
    pub fn merge(&mut self, other: &RunStats) {
        self.lines += other.lines;
        self.matched_lines += other.matched_lines;
        self.numerals += other.numerals;
        self.number_words += other.number_words;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    Streaming,
    Done,
}

/// A single-threaded scan over one line source.
pub struct Scanner<L: CategoryLookup> {
    grammar: ExpressionGrammar,
    lookup: L,
    table: FrequencyTable,
    stats: RunStats,
    state: ScanState,
    progress_every: u64,
    on_progress: Option<ProgressCallback>,
}

impl<L: CategoryLookup + std::fmt::Debug> std::fmt::Debug for Scanner<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("grammar", &self.grammar)
            .field("lookup", &self.lookup)
            .field("table", &self.table)
            .field("stats", &self.stats)
            .field("state", &self.state)
            .field("progress_every", &self.progress_every)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

impl<L: CategoryLookup> Scanner<L> {
    /// Build a scanner for one (language, range) configuration.
    /// Configuration problems fail here, before any line is read.
    pub fn new(language: Language, min: u64, max: u64, lookup: L) -> Result<Self, EngineError> {
        let profile = language.profile();
        let grammar = ExpressionGrammar::compile(&profile, min, max)?;
        let table = FrequencyTable::new(min, max)?;
        Ok(Self {
            grammar,
            lookup,
            table,
            stats: RunStats::default(),
            state: ScanState::Idle,
            progress_every: DEFAULT_PROGRESS_EVERY,
            on_progress: None,
        })
    }

    /// Set the progress interval; 0 disables progress reporting.
    pub fn with_progress_every(mut self, every: u64) -> Self {
        self.progress_every = every;
        self
    }

    /// Install a progress callback fired every progress interval.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Process one line: strip the corpus prefix, match, classify, count.
    ///
    /// Nothing in here can abort the scan; per-match problems are
    /// recorded locally and processing continues.
    pub fn process_line(&mut self, line: &str) {
        self.state = ScanState::Streaming;
        // Lines from indexed corpora have the form `index<TAB>sentence`.
        let sentence = match memchr::memchr(b'\t', line.as_bytes()) {
            Some(tab) => &line[tab + 1..],
            None => line,
        };

        let mut matched = false;
        for m in self.grammar.find_matches(sentence) {
            match m.value {
                NumeralValue::Malformed => {
                    self.table.record_malformed(&m.text);
                }
                NumeralValue::Parsed(_) => {
                    matched = true;
                    if m.is_word {
                        self.stats.number_words += 1;
                    } else {
                        self.stats.numerals += 1;
                    }
                    let classification = classify(&m, &self.lookup);
                    self.table.record(&m, &classification);
                }
            }
        }
        if matched {
            self.stats.matched_lines += 1;
        }

        self.stats.lines += 1;
        if self.progress_every > 0 && self.stats.lines % self.progress_every == 0 {
            if let Some(callback) = &self.on_progress {
                callback(self.stats.lines);
            }
            debug!(lines = self.stats.lines, "scan progress");
        }
    }

    /// Scan a whole line source in order. Only this step performs I/O;
    /// any sequential source works (file, stdin, in-memory buffer).
    pub fn scan<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for line in reader.lines() {
            let line = line.context("failed to read corpus line")?;
            self.process_line(&line);
        }
        self.state = ScanState::Done;
        Ok(())
    }

    /// Zero all counts; configuration (language, range) is untouched.
    pub fn reset(&mut self) {
        self.table.reset();
        self.stats = RunStats::default();
        self.state = ScanState::Idle;
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn is_done(&self) -> bool {
        self.state == ScanState::Done
    }

    /// Consume the scanner, yielding its accumulated state.
    pub fn finish(self) -> (FrequencyTable, RunStats) {
        (self.table, self.stats)
    }
}

/// Scan corpus files in parallel, one scanner per file, and merge the
/// shard tables. `on_file_done` runs after each file, for progress
/// display.
pub fn scan_paths<L>(
    paths: &[PathBuf],
    language: Language,
    min: u64,
    max: u64,
    lookup: &L,
    progress_every: u64,
    on_file_done: impl Fn(&Path, &RunStats) + Send + Sync,
) -> Result<(FrequencyTable, RunStats)>
where
    L: CategoryLookup + Sync,
{
    // Surface configuration failures before touching any file.
    let _ = ExpressionGrammar::compile(&language.profile(), min, max)?;

    let shards: Vec<(FrequencyTable, RunStats)> = paths
        .par_iter()
        .map(|path| -> Result<(FrequencyTable, RunStats)> {
            let file = std::fs::File::open(path)
                .with_context(|| format!("failed to open corpus file {}", path.display()))?;
            let mut scanner = Scanner::new(language, min, max, lookup)?
                .with_progress_every(progress_every);
            scanner.scan(std::io::BufReader::new(file))?;
            let (table, stats) = scanner.finish();
            debug!(path = %path.display(), lines = stats.lines, "scanned corpus file");
            on_file_done(path, &stats);
            Ok((table, stats))
        })
        .collect::<Result<_>>()?;

    let mut table = FrequencyTable::new(min, max)?;
    let mut stats = RunStats::default();
    for (shard_table, shard_stats) in shards {
        table.merge(shard_table)?;
        stats.merge(&shard_stats);
    }
    info!(
        files = paths.len(),
        lines = stats.lines,
        numerals = stats.numerals,
        "corpus scan complete"
    );
    Ok((table, stats))
}
