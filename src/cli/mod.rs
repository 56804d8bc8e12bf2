//! CLI command definitions and handlers

mod languages;
mod scan;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// numcensus - Corpus numeral-expression census
///
/// Scans text corpora sentence by sentence for numeral expressions
/// (approximator + numeral + unit) and reports frequency tables over
/// approximator precision, numeral roundness and unit discreteness.
#[derive(Parser, Debug)]
#[command(name = "numcensus")]
#[command(
    version,
    about = "Find, classify and count numeral expressions in text corpora",
    after_help = "\
Examples:
  numcensus scan corpus.txt                      Scan one corpus file
  numcensus scan shard-*.txt --language de       Scan German shards in parallel
  numcensus scan corpus.txt --min 1 --max 1000   Custom value range
  numcensus scan corpus.txt --format json        JSON output for scripting
  numcensus scan --language en < corpus.txt      Read from stdin
  numcensus languages                            List supported languages"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan corpus files for numeral expressions and report frequencies
    Scan {
        /// Corpus files to scan (stdin when omitted). Lines are plain
        /// sentences or `index<TAB>sentence`.
        paths: Vec<PathBuf>,

        /// Corpus language (en, de)
        #[arg(long, short = 'l')]
        language: Option<String>,

        /// Smallest numeral value to count
        #[arg(long)]
        min: Option<u64>,

        /// Largest numeral value to count
        #[arg(long)]
        max: Option<u64>,

        /// Output format: text, json
        #[arg(long, short = 'f')]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Number of parallel workers (1-64)
        #[arg(long, value_parser = parse_workers)]
        workers: Option<usize>,

        /// Emit progress every N lines (0 disables)
        #[arg(long)]
        progress_every: Option<u64>,

        /// JSON lexicon file mapping categories to unit words
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },

    /// List supported corpus languages
    Languages,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scan {
            paths,
            language,
            min,
            max,
            format,
            output,
            workers,
            progress_every,
            lexicon,
        } => scan::run(scan::ScanArgs {
            paths,
            language,
            min,
            max,
            format,
            output,
            workers,
            progress_every,
            lexicon,
        }),
        Commands::Languages => languages::run(),
    }
}
