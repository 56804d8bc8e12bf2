//! Output reporters for census results
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::language::Language;
use crate::pipeline::RunStats;
use crate::stats::FrequencyTable;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("unknown output format '{}' (use text or json)", s)),
        }
    }
}

/// Everything a reporter needs to render one finished run.
#[derive(Debug, Serialize)]
pub struct CensusReport<'a> {
    pub language: Language,
    pub min: u64,
    pub max: u64,
    pub stats: &'a RunStats,
    pub table: &'a FrequencyTable,
}

/// Render a report in the requested format.
pub fn render(format: OutputFormat, report: &CensusReport<'_>) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
    }
}
