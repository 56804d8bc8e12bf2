//! numcensus - Corpus numeral-expression census
//!
//! Scans natural-language corpora sentence by sentence for numeral
//! expressions (approximator + numeral + unit), classifies each
//! occurrence by approximator precision, numeral roundness and unit
//! discreteness, and accumulates frequency tables for reporting.

// Allow dead code for public API methods exposed for library users and future features
#![allow(dead_code)]

pub mod classify;
mod cli;
pub mod config;
mod error;
pub mod grammar;
pub mod language;
pub mod models;
mod pipeline;
mod reporters;
pub mod stats;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins; the --log-level flag is the fallback.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
