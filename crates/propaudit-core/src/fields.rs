//! Label-anchored scalar field extraction from region text.
//!
//! Statements render each figure as a label line followed by a bare number
//! line, so extraction is a single pass over line-indexed text: find the
//! label, parse the standalone number that follows it. Every field is
//! optional; a missing label or a non-numeric follower yields `None`,
//! never an error.

use regex::Regex;

/// Label for the operating cash balance.
pub const CASH_IN_BANK_OPERATING: &str = "Cash in Bank - Operating";
/// Label for the ending cash balance.
pub const ACTUAL_ENDING_CASH: &str = "Actual Ending Cash";
/// Label preceding the management fee dollar/percent pair.
pub const MANAGEMENT_FEES: &str = "Management Fees";
/// Label for the prepaid rent liability amount.
pub const PREPAID_RENT_LIABILITY: &str = "Prepaid Rent Liability";

/// A line containing nothing but a signed decimal amount: optional sign,
/// digits with optional thousands separators, optional up-to-two decimals.
const STANDALONE_AMOUNT: &str = r"^\s*(-?[\d,]+\.?\d{0,2})\s*$";

/// The prepaid label with an inline trailing amount on the same line.
const PREPAID_INLINE: &str = r"(?i)Prepaid Rent Liability.*?(-?[\d,]+\.?\d{0,2})";

/// Per-property scalar field bag. Absence means the label was never found
/// (or never followed by a number), which is semantically distinct from
/// zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub cash_in_bank_operating: Option<f64>,
    pub actual_ending_cash: Option<f64>,
    pub management_fee_dollar: Option<f64>,
    pub management_fee_percent: Option<f64>,
    pub prepaid_rent_liability: Option<f64>,
}

/// Parse an amount token, tolerating thousands separators and a currency
/// sign. Returns `None` for anything that is not a number.
pub fn parse_amount(token: &str) -> Option<f64> {
    token
        .replace(',', "")
        .replace('$', "")
        .trim()
        .parse()
        .ok()
}

/// The amount at line index `i`, if that line is a standalone number.
fn amount_on_line(standalone: &Regex, lines: &[&str], i: usize) -> Option<f64> {
    lines
        .get(i)
        .and_then(|line| standalone.captures(line.trim()))
        .and_then(|caps| parse_amount(&caps[1]))
}

/// Extract all scalar fields from the concatenated, line-split text of one
/// property region.
///
/// - The two cash balances match a line whose trimmed text equals the
///   label, followed by a standalone-number line; first match wins, each
///   scanned independently.
/// - `Management Fees` takes the next line as the dollar amount and the
///   line after that as the percent amount; the percent is only read when
///   the dollar line matched. Scanning stops at the first label line.
/// - `Prepaid Rent Liability` accepts an inline trailing amount or a
///   standalone number on the next line; stops at the first label line.
pub fn extract_fields(lines: &[&str]) -> ExtractedFields {
    let standalone = Regex::new(STANDALONE_AMOUNT).unwrap();
    let prepaid_inline = Regex::new(PREPAID_INLINE).unwrap();

    let mut fields = ExtractedFields::default();

    for (i, line) in lines.iter().enumerate() {
        let stripped = line.trim();
        if stripped == CASH_IN_BANK_OPERATING && fields.cash_in_bank_operating.is_none() {
            fields.cash_in_bank_operating = amount_on_line(&standalone, lines, i + 1);
        }
        if stripped == ACTUAL_ENDING_CASH && fields.actual_ending_cash.is_none() {
            fields.actual_ending_cash = amount_on_line(&standalone, lines, i + 1);
        }
    }

    for (i, line) in lines.iter().enumerate() {
        if line.trim() == MANAGEMENT_FEES && fields.management_fee_dollar.is_none() {
            if let Some(dollar) = amount_on_line(&standalone, lines, i + 1) {
                fields.management_fee_dollar = Some(dollar);
                fields.management_fee_percent = amount_on_line(&standalone, lines, i + 2);
            }
            break;
        }
    }

    for (i, line) in lines.iter().enumerate() {
        let stripped = line.trim();
        if stripped.contains(PREPAID_RENT_LIABILITY) && fields.prepaid_rent_liability.is_none() {
            fields.prepaid_rent_liability = prepaid_inline
                .captures(stripped)
                .and_then(|caps| parse_amount(&caps[1]));
            if fields.prepaid_rent_liability.is_none() {
                fields.prepaid_rent_liability = amount_on_line(&standalone, lines, i + 1);
            }
            break;
        }
    }

    fields
}
