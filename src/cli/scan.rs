//! The `scan` command: run the census over corpus files or stdin

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;
use tracing::info;

use crate::classify::lexicon::CategoryLexicon;
use crate::config::{self, ProjectConfig};
use crate::language::Language;
use crate::pipeline::{scan_paths, Scanner, DEFAULT_PROGRESS_EVERY};
use crate::reporters::{self, CensusReport, OutputFormat};

pub struct ScanArgs {
    pub paths: Vec<PathBuf>,
    pub language: Option<String>,
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub workers: Option<usize>,
    pub progress_every: Option<u64>,
    pub lexicon: Option<PathBuf>,
}

/// Flag values with project-config defaults filled in underneath.
struct ResolvedArgs {
    language: Language,
    min: u64,
    max: u64,
    format: OutputFormat,
    workers: usize,
    progress_every: u64,
    lexicon: CategoryLexicon,
}

fn resolve(args: &ScanArgs, project: &ProjectConfig) -> Result<ResolvedArgs> {
    let language = args
        .language
        .clone()
        .or_else(|| project.scan.language.clone())
        .unwrap_or_else(|| "en".to_string());
    let language = Language::from_str(&language)?;

    let min = args.min.or(project.scan.min).unwrap_or(0);
    let max = args.max.or(project.scan.max).unwrap_or(100);

    let format = args
        .format
        .clone()
        .or_else(|| project.defaults.format.clone())
        .unwrap_or_else(|| "text".to_string());
    let format = OutputFormat::from_str(&format)?;

    let lexicon = match args.lexicon.clone().or_else(|| project.lexicon.path.clone()) {
        Some(path) => CategoryLexicon::from_file(&path)?,
        None => CategoryLexicon::builtin(),
    };

    Ok(ResolvedArgs {
        language,
        min,
        max,
        format,
        workers: args.workers.or(project.defaults.workers).unwrap_or(8),
        progress_every: args
            .progress_every
            .or(project.defaults.progress_every)
            .unwrap_or(DEFAULT_PROGRESS_EVERY),
        lexicon,
    })
}

pub fn run(args: ScanArgs) -> Result<()> {
    let start = Instant::now();
    let project = config::load_project_config(&std::env::current_dir()?);
    let resolved = resolve(&args, &project)?;

    info!(
        language = %resolved.language,
        min = resolved.min,
        max = resolved.max,
        files = args.paths.len(),
        "starting census scan"
    );

    let (table, stats) = if args.paths.is_empty() {
        // Single-threaded scan over stdin.
        let mut scanner = Scanner::new(
            resolved.language,
            resolved.min,
            resolved.max,
            &resolved.lexicon,
        )?
        .with_progress_every(resolved.progress_every);
        scanner.scan(std::io::stdin().lock())?;
        scanner.finish()
    } else {
        let bar = file_progress_bar(args.paths.len());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(resolved.workers)
            .build()
            .context("failed to build worker pool")?;
        let result = pool.install(|| {
            scan_paths(
                &args.paths,
                resolved.language,
                resolved.min,
                resolved.max,
                &resolved.lexicon,
                resolved.progress_every,
                |path, shard_stats| {
                    bar.inc(1);
                    bar.set_message(format!(
                        "{} ({} lines)",
                        path.display(),
                        shard_stats.lines
                    ));
                },
            )
        })?;
        bar.finish_and_clear();
        result
    };

    let report = CensusReport {
        language: resolved.language,
        min: resolved.min,
        max: resolved.max,
        stats: &stats,
        table: &table,
    };
    let rendered = reporters::render(resolved.format, &report)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            eprintln!(
                "{} report written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{rendered}"),
    }

    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        lines = stats.lines,
        "scan finished"
    );
    Ok(())
}

/// Per-file progress bar, hidden when stderr is not a terminal.
fn file_progress_bar(files: usize) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(files as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid progress template"),
    );
    bar
}
