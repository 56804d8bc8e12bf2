//! JSON reporter
//!
//! Outputs the full census report as pretty-printed JSON: run statistics,
//! both histograms, the cross table, the unit tally and the excluded and
//! malformed logs. Useful for machine consumption or piping to jq.

use super::CensusReport;
use anyhow::Result;

/// Render a report as JSON
pub fn render(report: &CensusReport<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render a report as compact JSON (single line)
#[allow(dead_code)] // Public API helper
pub fn render_compact(report: &CensusReport<'_>) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}
