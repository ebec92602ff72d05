use std::path::Path;

use propaudit::{PortfolioReport, RuleConfig};

use crate::cli::ReportFormat;

pub fn run(file: &Path, format: &ReportFormat, max_pages: Option<usize>) -> Result<(), i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    let mut config = RuleConfig::default();
    if let Some(cap) = max_pages {
        config.max_pages = cap;
    }

    let report = propaudit::audit_file(file, &config).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    match format {
        ReportFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: failed to serialize report: {e}");
                return Err(1);
            }
        },
        ReportFormat::Text => print_text(&report),
    }

    Ok(())
}

fn print_text(report: &PortfolioReport) {
    let total = report.property_count();
    let failing = report.failing_count();
    println!(
        "Audited {total} propert{}: {} passing, {failing} failing",
        if total == 1 { "y" } else { "ies" },
        total - failing,
    );

    if !report.failing_summary.is_empty() {
        println!();
        println!("Properties with failures:");
        for entry in &report.failing_summary {
            println!("  {}: {}", entry.property, entry.failed_checks.join(", "));
        }
    }

    for property in &report.detailed_checks {
        println!();
        println!("{}", property.property);
        for result in &property.results {
            println!(
                "  [{}] {}: {} (expected: {})",
                result.status, result.check, result.value, result.expected
            );
        }
    }
}
