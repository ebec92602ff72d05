//! Report types produced by the audit and consumed by the caller.
//!
//! The serialized field names (`detailed_checks`, `failing_summary`,
//! `property`, `results`, `check`, `value`, `expected`, `status`,
//! `failed_checks`) are the external contract with whatever renders the
//! report; do not rename them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Verdict of a single business-rule check.
///
/// INFO means "not evaluable" (a required input was absent), not a
/// judgment; it never contributes to the failing summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
    Info,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
            CheckStatus::Info => write!(f, "INFO"),
        }
    }
}

/// One evaluated check for one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check name, e.g. "Actual Ending Cash Positive".
    pub check: String,
    /// Observed value, formatted for display ("$1,000.00", "N/A (Not Found)").
    pub value: String,
    /// Description of the expected condition.
    pub expected: String,
    /// Verdict.
    pub status: CheckStatus,
}

impl CheckResult {
    pub fn new(
        check: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
        status: CheckStatus,
    ) -> Self {
        Self {
            check: check.into(),
            value: value.into(),
            expected: expected.into(),
            status,
        }
    }
}

/// All check results for one property, in fixed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyReport {
    /// Property label: `"{code} - {address}"`.
    pub property: String,
    pub results: Vec<CheckResult>,
}

/// One failing property in the portfolio summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailingProperty {
    pub property: String,
    /// Names of the checks (or fee sub-checks) that failed.
    pub failed_checks: Vec<String>,
}

/// The full audit output: detailed per-property checks plus the
/// failing-properties summary. A property appears in `failing_summary`
/// iff at least one of its checks is FAIL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub detailed_checks: Vec<PropertyReport>,
    pub failing_summary: Vec<FailingProperty>,
}

impl PortfolioReport {
    /// Number of properties audited.
    pub fn property_count(&self) -> usize {
        self.detailed_checks.len()
    }

    /// Number of properties with at least one failing check.
    pub fn failing_count(&self) -> usize {
        self.failing_summary.len()
    }
}

/// Format an amount with thousands separators and two decimals
/// ("1,234.56", "-50.00").
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Format a dollar amount ("$1,234.56", "$-50.00").
pub fn format_usd(value: f64) -> String {
    format!("${}", format_amount(value))
}
