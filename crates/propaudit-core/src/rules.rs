//! Deterministic business-rule evaluation for one property.
//!
//! Each rule turns extracted values into a PASS/FAIL/INFO verdict. Absent
//! inputs always degrade to INFO (never FAIL, never an error), so a
//! property with sparse extraction still gets a complete result set.

use crate::config::RuleConfig;
use crate::fields::ExtractedFields;
use crate::rentroll::RentRollOutcome;
use crate::report::{CheckResult, CheckStatus, format_amount, format_usd};

/// Check names as they appear in reports.
pub const CHECK_CASH_OPERATING: &str = "Cash in Bank - Operating Positive";
pub const CHECK_ENDING_CASH: &str = "Actual Ending Cash Positive";
pub const CHECK_FEE_DOLLAR: &str = "Management Fee ($) in Range";
pub const CHECK_FEE_PERCENT: &str = "Management Fee (%) in Range";
pub const CHECK_PREPAID: &str = "Prepaid Rent Liability Non-Negative";
pub const CHECK_RENT_ROLL: &str = "Sum of Negative Past Due (Rent Roll)";

/// Failure labels recorded in the portfolio summary for the two fee
/// sub-checks (the displayed rows share one verdict, but the summary
/// distinguishes which side was out of policy).
pub const FAILED_FEE_DOLLAR: &str = "Management Fee ($) out of Range";
pub const FAILED_FEE_PERCENT: &str = "Management Fee (%) out of Range";

const NOT_FOUND: &str = "N/A (Not Found)";

/// Evaluated checks for one property plus the failure names feeding the
/// portfolio summary.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEvaluation {
    /// Results in fixed order: cash-operating, ending-cash, fee-dollar,
    /// fee-percent, prepaid-liability, rent-roll-sum.
    pub results: Vec<CheckResult>,
    /// Empty iff no check failed.
    pub failed_checks: Vec<String>,
}

/// Apply all business rules to one property's extracted values.
pub fn evaluate_property(
    fields: &ExtractedFields,
    rent_roll: &RentRollOutcome,
    config: &RuleConfig,
) -> PropertyEvaluation {
    let mut results = Vec::with_capacity(6);
    let mut failed_checks = Vec::new();

    positive_check(
        CHECK_CASH_OPERATING,
        fields.cash_in_bank_operating,
        &mut results,
        &mut failed_checks,
    );
    positive_check(
        CHECK_ENDING_CASH,
        fields.actual_ending_cash,
        &mut results,
        &mut failed_checks,
    );
    fee_checks(fields, config, &mut results, &mut failed_checks);
    prepaid_check(fields.prepaid_rent_liability, &mut results, &mut failed_checks);
    rent_roll_check(
        rent_roll,
        fields.prepaid_rent_liability,
        config,
        &mut results,
        &mut failed_checks,
    );

    PropertyEvaluation {
        results,
        failed_checks,
    }
}

/// value > 0 passes; value <= 0 fails; absent is INFO.
fn positive_check(
    name: &str,
    value: Option<f64>,
    results: &mut Vec<CheckResult>,
    failed_checks: &mut Vec<String>,
) {
    match value {
        Some(v) => {
            let status = if v > 0.0 {
                CheckStatus::Pass
            } else {
                CheckStatus::Fail
            };
            if status == CheckStatus::Fail {
                failed_checks.push(name.to_string());
            }
            results.push(CheckResult::new(name, format_usd(v), "> $0", status));
        }
        None => results.push(CheckResult::new(name, NOT_FOUND, "> $0", CheckStatus::Info)),
    }
}

/// The management fee passes when the dollar amount is inside the
/// configured range or the percent is one of the allowed values. Both
/// displayed rows share the verdict; with both values absent the check is
/// INFO.
fn fee_checks(
    fields: &ExtractedFields,
    config: &RuleConfig,
    results: &mut Vec<CheckResult>,
    failed_checks: &mut Vec<String>,
) {
    let dollar = fields.management_fee_dollar;
    let percent = fields.management_fee_percent;

    let dollar_ok = dollar.is_some_and(|d| {
        d >= config.management_fee_dollar_min && d <= config.management_fee_dollar_max
    });
    let percent_ok = percent.is_some_and(|p| {
        config
            .management_fee_percent_allowed
            .iter()
            .any(|&allowed| allowed == p)
    });

    let status = if dollar.is_none() && percent.is_none() {
        CheckStatus::Info
    } else if dollar_ok || percent_ok {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    };

    if status == CheckStatus::Fail {
        if dollar.is_some() && !dollar_ok {
            failed_checks.push(FAILED_FEE_DOLLAR.to_string());
        }
        if percent.is_some() && !percent_ok {
            failed_checks.push(FAILED_FEE_PERCENT.to_string());
        }
    }

    let dollar_expected = format!(
        "${:.2} - ${:.2}",
        config.management_fee_dollar_min, config.management_fee_dollar_max
    );
    match dollar {
        Some(d) => results.push(CheckResult::new(
            CHECK_FEE_DOLLAR,
            format_usd(d),
            dollar_expected,
            status,
        )),
        None => results.push(CheckResult::new(
            CHECK_FEE_DOLLAR,
            NOT_FOUND,
            dollar_expected,
            CheckStatus::Info,
        )),
    }

    let percent_expected = format!(
        "One of: {}",
        allowed_percent_list(&config.management_fee_percent_allowed)
    );
    match percent {
        Some(p) => results.push(CheckResult::new(
            CHECK_FEE_PERCENT,
            format!("{p:.2}%"),
            percent_expected,
            status,
        )),
        None => results.push(CheckResult::new(
            CHECK_FEE_PERCENT,
            NOT_FOUND,
            percent_expected,
            CheckStatus::Info,
        )),
    }
}

/// Render the allowed percent set: integers without decimals, others with
/// two ("3%, 3.50%, 3.75%, 4%, ...").
fn allowed_percent_list(allowed: &[f64]) -> String {
    allowed
        .iter()
        .map(|&v| {
            if v.fract() == 0.0 {
                format!("{}%", v as i64)
            } else {
                format!("{v:.2}%")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// value >= 0 passes; negative fails; absent is INFO.
fn prepaid_check(
    value: Option<f64>,
    results: &mut Vec<CheckResult>,
    failed_checks: &mut Vec<String>,
) {
    match value {
        Some(v) => {
            let status = if v >= 0.0 {
                CheckStatus::Pass
            } else {
                CheckStatus::Fail
            };
            if status == CheckStatus::Fail {
                failed_checks.push(CHECK_PREPAID.to_string());
            }
            results.push(CheckResult::new(
                CHECK_PREPAID,
                format_usd(v),
                ">= $0",
                status,
            ));
        }
        None => results.push(CheckResult::new(
            CHECK_PREPAID,
            NOT_FOUND,
            ">= $0",
            CheckStatus::Info,
        )),
    }
}

/// Reconcile the rent-roll negative sum against the prepaid liability.
///
/// With a negative sum and a known liability, the absolute sum must match
/// the liability within the configured epsilon. Both exactly zero is also
/// a match. A non-negative sum, or an unknown liability, leaves nothing to
/// compare (INFO). A missing rent-roll section is INFO with no value.
fn rent_roll_check(
    rent_roll: &RentRollOutcome,
    prepaid: Option<f64>,
    config: &RuleConfig,
    results: &mut Vec<CheckResult>,
    failed_checks: &mut Vec<String>,
) {
    let sum = match rent_roll {
        RentRollOutcome::Missing => {
            results.push(CheckResult::new(
                CHECK_RENT_ROLL,
                "N/A (No Rent Roll Found)",
                "N/A (Calculated Sum)",
                CheckStatus::Info,
            ));
            return;
        }
        RentRollOutcome::Sum(sum) => *sum,
    };

    let value = if sum < 0.0 {
        format_usd(sum)
    } else {
        "N/A (No negative values found)".to_string()
    };

    let (expected, status) = if sum < 0.0 {
        match prepaid {
            Some(liability) => {
                if (sum.abs() - liability).abs() < config.reconciliation_epsilon {
                    ("Match".to_string(), CheckStatus::Pass)
                } else {
                    failed_checks.push(CHECK_RENT_ROLL.to_string());
                    (
                        format!("No Match (Expected {})", format_amount(liability)),
                        CheckStatus::Fail,
                    )
                }
            }
            None => (
                "N/A (Prepaid Liability Not Found for Comparison)".to_string(),
                CheckStatus::Info,
            ),
        }
    } else if sum == 0.0 && prepaid == Some(0.0) {
        (
            "Match (No Negative Past Due, No Prepaid Liability)".to_string(),
            CheckStatus::Pass,
        )
    } else {
        (
            "N/A (No Negative Past Due to Compare)".to_string(),
            CheckStatus::Info,
        )
    };

    results.push(CheckResult::new(CHECK_RENT_ROLL, value, expected, status));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ExtractedFields {
        ExtractedFields::default()
    }

    fn evaluate(fields: &ExtractedFields, rent_roll: RentRollOutcome) -> PropertyEvaluation {
        evaluate_property(fields, &rent_roll, &RuleConfig::default())
    }

    fn status_of<'a>(eval: &'a PropertyEvaluation, check: &str) -> &'a CheckResult {
        eval.results
            .iter()
            .find(|r| r.check == check)
            .expect("check present")
    }

    #[test]
    fn results_come_in_fixed_order() {
        let eval = evaluate(&fields(), RentRollOutcome::Missing);
        let names: Vec<&str> = eval.results.iter().map(|r| r.check.as_str()).collect();
        assert_eq!(
            names,
            vec![
                CHECK_CASH_OPERATING,
                CHECK_ENDING_CASH,
                CHECK_FEE_DOLLAR,
                CHECK_FEE_PERCENT,
                CHECK_PREPAID,
                CHECK_RENT_ROLL,
            ]
        );
    }

    #[test]
    fn absent_inputs_are_all_info_and_never_fail() {
        let eval = evaluate(&fields(), RentRollOutcome::Missing);
        assert!(eval.results.iter().all(|r| r.status == CheckStatus::Info));
        assert!(eval.failed_checks.is_empty());
    }

    #[test]
    fn positive_cash_passes_and_zero_fails() {
        let mut f = fields();
        f.cash_in_bank_operating = Some(1000.0);
        f.actual_ending_cash = Some(0.0);
        let eval = evaluate(&f, RentRollOutcome::Missing);
        let cash = status_of(&eval, CHECK_CASH_OPERATING);
        assert_eq!(cash.status, CheckStatus::Pass);
        assert_eq!(cash.value, "$1,000.00");
        let ending = status_of(&eval, CHECK_ENDING_CASH);
        assert_eq!(ending.status, CheckStatus::Fail);
        assert_eq!(eval.failed_checks, vec![CHECK_ENDING_CASH.to_string()]);
    }

    #[test]
    fn negative_ending_cash_fails_with_formatted_value() {
        let mut f = fields();
        f.actual_ending_cash = Some(-50.0);
        let eval = evaluate(&f, RentRollOutcome::Missing);
        let ending = status_of(&eval, CHECK_ENDING_CASH);
        assert_eq!(ending.status, CheckStatus::Fail);
        assert_eq!(ending.value, "$-50.00");
    }

    #[test]
    fn fee_dollar_bounds_are_inclusive() {
        for amount in [95.0, 250.0] {
            let mut f = fields();
            f.management_fee_dollar = Some(amount);
            let eval = evaluate(&f, RentRollOutcome::Missing);
            assert_eq!(
                status_of(&eval, CHECK_FEE_DOLLAR).status,
                CheckStatus::Pass,
                "{amount} should pass"
            );
        }
        for amount in [94.99, 250.01] {
            let mut f = fields();
            f.management_fee_dollar = Some(amount);
            let eval = evaluate(&f, RentRollOutcome::Missing);
            assert_eq!(
                status_of(&eval, CHECK_FEE_DOLLAR).status,
                CheckStatus::Fail,
                "{amount} should fail"
            );
            assert_eq!(eval.failed_checks, vec![FAILED_FEE_DOLLAR.to_string()]);
        }
    }

    #[test]
    fn fee_percent_must_be_in_allowed_set() {
        let mut f = fields();
        f.management_fee_percent = Some(3.75);
        let eval = evaluate(&f, RentRollOutcome::Missing);
        assert_eq!(status_of(&eval, CHECK_FEE_PERCENT).status, CheckStatus::Pass);

        // 3.6% lies inside the old 3-6 band but is not an allowed value.
        let mut f = fields();
        f.management_fee_percent = Some(3.6);
        let eval = evaluate(&f, RentRollOutcome::Missing);
        assert_eq!(status_of(&eval, CHECK_FEE_PERCENT).status, CheckStatus::Fail);
        assert_eq!(eval.failed_checks, vec![FAILED_FEE_PERCENT.to_string()]);
    }

    #[test]
    fn passing_percent_rescues_out_of_range_dollar() {
        let mut f = fields();
        f.management_fee_dollar = Some(50.0);
        f.management_fee_percent = Some(4.0);
        let eval = evaluate(&f, RentRollOutcome::Missing);
        assert_eq!(status_of(&eval, CHECK_FEE_DOLLAR).status, CheckStatus::Pass);
        assert_eq!(status_of(&eval, CHECK_FEE_PERCENT).status, CheckStatus::Pass);
        assert!(eval.failed_checks.is_empty());
    }

    #[test]
    fn both_fee_values_failing_record_both_labels() {
        let mut f = fields();
        f.management_fee_dollar = Some(50.0);
        f.management_fee_percent = Some(10.0);
        let eval = evaluate(&f, RentRollOutcome::Missing);
        assert_eq!(
            eval.failed_checks,
            vec![FAILED_FEE_DOLLAR.to_string(), FAILED_FEE_PERCENT.to_string()]
        );
    }

    #[test]
    fn absent_percent_row_is_info_even_when_dollar_fails() {
        let mut f = fields();
        f.management_fee_dollar = Some(50.0);
        let eval = evaluate(&f, RentRollOutcome::Missing);
        assert_eq!(status_of(&eval, CHECK_FEE_DOLLAR).status, CheckStatus::Fail);
        assert_eq!(status_of(&eval, CHECK_FEE_PERCENT).status, CheckStatus::Info);
    }

    #[test]
    fn percent_expected_lists_allowed_values() {
        let eval = evaluate(&fields(), RentRollOutcome::Missing);
        assert_eq!(
            status_of(&eval, CHECK_FEE_PERCENT).expected,
            "One of: 3%, 3.50%, 3.75%, 4%, 4.50%, 5%, 5.50%, 6%"
        );
    }

    #[test]
    fn prepaid_zero_passes_and_negative_fails() {
        let mut f = fields();
        f.prepaid_rent_liability = Some(0.0);
        let eval = evaluate(&f, RentRollOutcome::Missing);
        assert_eq!(status_of(&eval, CHECK_PREPAID).status, CheckStatus::Pass);

        let mut f = fields();
        f.prepaid_rent_liability = Some(-10.0);
        let eval = evaluate(&f, RentRollOutcome::Missing);
        assert_eq!(status_of(&eval, CHECK_PREPAID).status, CheckStatus::Fail);
        assert_eq!(eval.failed_checks, vec![CHECK_PREPAID.to_string()]);
    }

    #[test]
    fn rent_roll_match_within_epsilon_passes() {
        let mut f = fields();
        f.prepaid_rent_liability = Some(1500.0);
        let eval = evaluate(&f, RentRollOutcome::Sum(-1500.0));
        let check = status_of(&eval, CHECK_RENT_ROLL);
        assert_eq!(check.status, CheckStatus::Pass);
        assert_eq!(check.value, "$-1,500.00");
        assert_eq!(check.expected, "Match");
    }

    #[test]
    fn rent_roll_mismatch_fails_with_expected_liability() {
        let mut f = fields();
        f.prepaid_rent_liability = Some(1400.0);
        let eval = evaluate(&f, RentRollOutcome::Sum(-1500.0));
        let check = status_of(&eval, CHECK_RENT_ROLL);
        assert_eq!(check.status, CheckStatus::Fail);
        assert_eq!(check.expected, "No Match (Expected 1,400.00)");
        assert_eq!(eval.failed_checks, vec![CHECK_RENT_ROLL.to_string()]);
    }

    #[test]
    fn rent_roll_without_liability_is_info() {
        let eval = evaluate(&fields(), RentRollOutcome::Sum(-1500.0));
        let check = status_of(&eval, CHECK_RENT_ROLL);
        assert_eq!(check.status, CheckStatus::Info);
        assert_eq!(
            check.expected,
            "N/A (Prepaid Liability Not Found for Comparison)"
        );
    }

    #[test]
    fn zero_sum_and_zero_liability_match() {
        let mut f = fields();
        f.prepaid_rent_liability = Some(0.0);
        let eval = evaluate(&f, RentRollOutcome::Sum(0.0));
        let check = status_of(&eval, CHECK_RENT_ROLL);
        assert_eq!(check.status, CheckStatus::Pass);
        assert_eq!(
            check.expected,
            "Match (No Negative Past Due, No Prepaid Liability)"
        );
    }

    #[test]
    fn zero_sum_with_nonzero_liability_is_info() {
        let mut f = fields();
        f.prepaid_rent_liability = Some(500.0);
        let eval = evaluate(&f, RentRollOutcome::Sum(0.0));
        let check = status_of(&eval, CHECK_RENT_ROLL);
        assert_eq!(check.status, CheckStatus::Info);
        assert_eq!(check.expected, "N/A (No Negative Past Due to Compare)");
    }

    #[test]
    fn missing_section_is_info_with_placeholder_value() {
        let eval = evaluate(&fields(), RentRollOutcome::Missing);
        let check = status_of(&eval, CHECK_RENT_ROLL);
        assert_eq!(check.status, CheckStatus::Info);
        assert_eq!(check.value, "N/A (No Rent Roll Found)");
        assert_eq!(check.expected, "N/A (Calculated Sum)");
    }

    #[test]
    fn epsilon_boundary() {
        let mut f = fields();
        f.prepaid_rent_liability = Some(1500.0);
        // Off by more than epsilon: fail.
        let eval = evaluate(&f, RentRollOutcome::Sum(-1500.01));
        assert_eq!(
            status_of(&eval, CHECK_RENT_ROLL).status,
            CheckStatus::Fail
        );
        // Off by less than epsilon: pass.
        let eval = evaluate(&f, RentRollOutcome::Sum(-1500.0005));
        assert_eq!(status_of(&eval, CHECK_RENT_ROLL).status, CheckStatus::Pass);
    }
}
