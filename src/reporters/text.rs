//! Text (terminal) reporter with colors and formatting

use super::CensusReport;
use anyhow::Result;
use console::style;

/// How many units to show in the tally section.
const TOP_UNITS: usize = 15;

/// Render a finished run as formatted terminal output
pub fn render(report: &CensusReport<'_>) -> Result<String> {
    let mut out = String::new();
    let stats = report.stats;
    let table = report.table;

    out.push_str(&format!(
        "\n{}\n",
        style(format!(
            "Numeral census ({}, range {}-{})",
            report.language.name(),
            report.min,
            report.max
        ))
        .bold()
    ));
    out.push_str(&format!(
        "{}\n",
        style("──────────────────────────────────────").dim()
    ));

    let matched_pct = if stats.lines > 0 {
        stats.matched_lines * 100 / stats.lines
    } else {
        0
    };
    out.push_str(&format!(
        "Processed {} lines; {} ({}%) contained numeral expressions\n",
        stats.lines, stats.matched_lines, matched_pct
    ));
    out.push_str(&format!(
        "Numerals found: {} in digits ({} in range), {} spelled out ({} in range)\n\n",
        stats.numerals,
        table.numbers().sum(),
        stats.number_words,
        table.number_words().sum()
    ));

    out.push_str(&format!(
        "{}\n",
        style("APPROXIMATION × ROUNDNESS × DISCRETENESS").bold()
    ));
    for (label, count) in table.cross().iter() {
        out.push_str(&format!("  {label:<16} {count}\n"));
    }
    out.push_str(&format!(
        "  {:<16} {}\n",
        "asymmetric",
        table.asymmetric()
    ));
    out.push_str(&format!(
        "  {:<16} {}\n",
        "unclassified",
        table.unclassified_units()
    ));
    if !table.malformed().is_empty() {
        out.push_str(&format!(
            "  {:<16} {}\n",
            "malformed",
            table.malformed().len()
        ));
    }

    let mut values: Vec<(u64, u64)> = table.numbers().nonzero().collect();
    values.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    if !values.is_empty() {
        out.push_str(&format!("\n{}\n", style("TOP VALUES").bold()));
        for (value, count) in values.iter().take(TOP_UNITS) {
            out.push_str(&format!("  {value:<20} {count}\n"));
        }
    }

    let units = table.units_sorted();
    if !units.is_empty() {
        out.push_str(&format!("\n{}\n", style("TOP UNITS").bold()));
        for (unit, count) in units.iter().take(TOP_UNITS) {
            out.push_str(&format!("  {unit:<20} {count}\n"));
        }
        if units.len() > TOP_UNITS {
            out.push_str(&format!(
                "  {}\n",
                style(format!("... and {} more", units.len() - TOP_UNITS)).dim()
            ));
        }
    }

    if !table.excluded().is_empty() {
        out.push_str(&format!(
            "\n{} ({} matches)\n",
            style("UNCLASSIFIED UNITS").bold(),
            table.excluded().len()
        ));
        for excluded in table.excluded().iter().take(10) {
            out.push_str(&format!("  {:<20} \"{}\"\n", excluded.unit, excluded.text));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_run;
    use super::*;

    #[test]
    fn test_text_render_mentions_counts() {
        let (language, min, max, stats, table) = test_run();
        let report = CensusReport {
            language,
            min,
            max,
            stats: &stats,
            table: &table,
        };
        let rendered = render(&report).expect("render text");
        assert!(rendered.contains("Processed 3 lines"));
        for label in ["impr-round-cont", "asymmetric", "unclassified"] {
            assert!(rendered.contains(label), "missing {label} in:\n{rendered}");
        }
        assert!(rendered.contains("mph"));
        assert!(rendered.contains("flurbs"));
    }

    #[test]
    fn test_text_render_empty_run() {
        let table = crate::stats::FrequencyTable::new(0, 10).expect("valid range");
        let stats = crate::pipeline::RunStats::default();
        let report = CensusReport {
            language: crate::language::Language::English,
            min: 0,
            max: 10,
            stats: &stats,
            table: &table,
        };
        let rendered = render(&report).expect("render text");
        assert!(rendered.contains("Processed 0 lines"));
        assert!(!rendered.contains("TOP UNITS"));
    }
}
