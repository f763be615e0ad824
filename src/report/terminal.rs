use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use url_checkr::models::CheckOutcome;

/// Counts per outcome kind, for the summary box.
#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub safe: usize,
    pub malicious: usize,
    pub invalid: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[CheckOutcome]) -> Self {
        let mut summary = Summary {
            total: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                CheckOutcome::Success { analysis, .. } if analysis.is_malicious => {
                    summary.malicious += 1
                }
                CheckOutcome::Success { .. } => summary.safe += 1,
                CheckOutcome::Invalid { .. } => summary.invalid += 1,
                CheckOutcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

/// Render a colored terminal report.
pub fn render(outcomes: &[CheckOutcome], verbose: bool, quiet: bool) -> Result<()> {
    let summary = Summary::from_outcomes(outcomes);

    if quiet {
        println!(
            "Total: {}  Safe: {}  Malicious: {}  Invalid: {}  Failed: {}",
            summary.total,
            summary.safe.to_string().green(),
            summary.malicious.to_string().red(),
            summary.invalid.to_string().yellow(),
            summary.failed.to_string().yellow(),
        );
        return Ok(());
    }

    println!("\n {} v{}\n", "url-checkr".bold(), env!("CARGO_PKG_VERSION"));

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("URLs checked       : {}", summary.total));
    println!(
        " │  {:<48} │",
        format!("{}  Safe            : {:>4}", "✓".green(), summary.safe)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Malicious       : {:>4}", "✗".red(), summary.malicious)
    );
    println!(
        " │  {:<48} │",
        format!(
            "{}  Not scanned     : {:>4}",
            "⚠".yellow(),
            summary.invalid + summary.failed
        )
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    render_table(outcomes);
    println!();

    for outcome in outcomes {
        match outcome {
            CheckOutcome::Success { url, analysis } if verbose || analysis.is_malicious => {
                let tag = if analysis.is_malicious {
                    "[MALICIOUS]".red().bold()
                } else {
                    "[SAFE]".green().bold()
                };
                println!(" {} {}\n", tag, url);
                for line in analysis.report.lines() {
                    println!("   {}", line);
                }
                println!();
            }
            CheckOutcome::Invalid { input, message } => {
                println!(" {} {:?}: {}\n", "[INVALID]".yellow().bold(), input, message);
            }
            CheckOutcome::Failed { url, message } => {
                println!(" {} {}: {}\n", "[ERROR]".yellow().bold(), url, message);
            }
            CheckOutcome::Success { .. } => {}
        }
    }

    Ok(())
}

fn render_table(outcomes: &[CheckOutcome]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("URL").add_attribute(Attribute::Bold),
            Cell::new("Verdict").add_attribute(Attribute::Bold),
            Cell::new("Score").add_attribute(Attribute::Bold),
            Cell::new("Findings").add_attribute(Attribute::Bold),
        ]);

    for outcome in outcomes {
        let (verdict, color, score, findings) = match outcome {
            CheckOutcome::Success { analysis, .. } => {
                let (verdict, color) = if analysis.is_malicious {
                    ("malicious", Color::Red)
                } else {
                    ("safe", Color::Green)
                };
                (
                    verdict,
                    color,
                    format!("{:.2}", analysis.maliciousness_score),
                    finding_count(&analysis.report).to_string(),
                )
            }
            CheckOutcome::Invalid { .. } => ("invalid", Color::Yellow, "-".into(), "-".into()),
            CheckOutcome::Failed { .. } => ("error", Color::Yellow, "-".into(), "-".into()),
        };

        table.add_row(vec![
            Cell::new(outcome.url()),
            Cell::new(verdict).fg(color),
            Cell::new(score).set_alignment(CellAlignment::Right),
            Cell::new(findings).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");
}

fn finding_count(report: &str) -> usize {
    report.lines().filter(|l| l.starts_with("- ")).count()
}
