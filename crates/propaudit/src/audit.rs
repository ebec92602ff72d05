//! Audit entry points and per-property orchestration.

use std::path::Path;

use propaudit_core::{
    AuditError, FailingProperty, PortfolioReport, PropertyReport, RentRollOutcome, RuleConfig,
    evaluate_property, extract_fields, locate_rent_roll, segment_pages, sum_negative_past_due,
};
use propaudit_parse::DocumentIndex;
use tracing::{debug, info};

/// Audit a statement from raw PDF bytes.
///
/// One call is one request: the document is decoded, segmented into
/// property regions, each region's fields and rent roll are extracted,
/// and the business rules produce a [`PortfolioReport`]. Everything is
/// request-scoped; the decoded document and its backing file are released
/// before evaluation begins.
///
/// # Errors
///
/// [`AuditError::DecodeError`] when the bytes are not a readable PDF;
/// [`AuditError::IoError`] when staging the document fails. A failed
/// decode produces no partial report.
pub fn audit_bytes(bytes: &[u8], config: &RuleConfig) -> Result<PortfolioReport, AuditError> {
    let index = DocumentIndex::from_bytes(bytes, config.max_pages)?;
    Ok(audit_document(&index, config))
}

/// Audit a statement read from a file path. Convenience wrapper around
/// [`audit_bytes`].
pub fn audit_file(
    path: impl AsRef<Path>,
    config: &RuleConfig,
) -> Result<PortfolioReport, AuditError> {
    let index = DocumentIndex::open_file(path.as_ref(), config.max_pages)?;
    Ok(audit_document(&index, config))
}

/// Run segmentation, extraction, and validation over a decoded document.
fn audit_document(index: &DocumentIndex, config: &RuleConfig) -> PortfolioReport {
    let regions = segment_pages(index.pages());
    info!(
        pages = index.page_count(),
        properties = regions.len(),
        "segmented statement"
    );

    let mut report = PortfolioReport::default();

    for (key, page_numbers) in &regions {
        let label = key.label();

        let region_text = page_numbers
            .iter()
            .filter_map(|&n| index.pages().get(n))
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let region_lines: Vec<&str> = region_text.lines().collect();
        let fields = extract_fields(&region_lines);

        let rent_roll = match locate_rent_roll(index.pages(), page_numbers) {
            Some(table) => RentRollOutcome::Sum(sum_negative_past_due(&table)),
            None => RentRollOutcome::Missing,
        };
        debug!(property = %label, ?fields, ?rent_roll, "extracted property");

        let evaluation = evaluate_property(&fields, &rent_roll, config);
        if !evaluation.failed_checks.is_empty() {
            report.failing_summary.push(FailingProperty {
                property: label.clone(),
                failed_checks: evaluation.failed_checks,
            });
        }
        report.detailed_checks.push(PropertyReport {
            property: label,
            results: evaluation.results,
        });
    }

    info!(
        properties = report.property_count(),
        failing = report.failing_count(),
        "audit complete"
    );
    report
}
