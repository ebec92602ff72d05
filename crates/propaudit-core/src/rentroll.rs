//! Geometric location and aggregation of the rent-roll table.
//!
//! The rent roll has no table semantics in the PDF, only words with
//! boxes. Location is a two-stage search: find the "Rent Roll" title pair,
//! then find the header row below it by matching every expected column
//! phrase in order. The "Past Due" header's box defines the target column's
//! x-range; aggregation then sums qualifying negative values from the rows
//! beneath the header.

use regex::{Regex, RegexBuilder};

use crate::fields::parse_amount;
use crate::rows::{Row, cluster_rows};
use crate::word::{StatementPage, Word};

/// Column header phrases that must appear, in order, on the header row.
const HEADER_PHRASES: [&str; 10] = [
    "Unit",
    "Tenant",
    "Additional Tenants",
    "Status",
    "Rent",
    "Deposit",
    "Move-in",
    "Lease From",
    "Lease To",
    "Past Due",
];

/// Vertical band below the title top still considered title matter.
const TITLE_SKIP: f64 = 30.0;
/// Maximum vertical offset for two words to count as the same line.
const SAME_LINE: f64 = 5.0;
/// Maximum horizontal gap for two words to count as adjacent.
const ADJACENT_GAP: f64 = 10.0;
/// Padding added around the past-due header box to form the column x-range.
const COLUMN_PADDING: f64 = 5.0;
/// Extra horizontal slack when testing a word for column membership.
const COLUMN_SLACK: f64 = 5.0;
/// Tolerance for clustering table words into rows.
const ROW_TOLERANCE: f64 = 1.0;
/// Minimum row index before a separator line is trusted as a table end.
const MIN_SEPARATOR_ROW: usize = 5;

/// A located rent-roll table on one page.
#[derive(Debug, Clone)]
pub struct RentRollTable {
    /// Reconstructed rows of the title page, below the title band.
    pub rows: Vec<Row>,
    /// Index of the header row within `rows`.
    pub header_idx: usize,
    /// Rounded top coordinate of the header row.
    pub header_y: f64,
    /// Left edge of the past-due column x-range (padded).
    pub col_x0: f64,
    /// Right edge of the past-due column x-range (padded).
    pub col_x1: f64,
}

/// Result of locating and aggregating the rent roll for one property.
#[derive(Debug, Clone, PartialEq)]
pub enum RentRollOutcome {
    /// No rent-roll title, or no complete header row, was found.
    Missing,
    /// Sum of qualifying negative past-due values; non-positive by
    /// construction.
    Sum(f64),
}

fn word_regex(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .unwrap()
}

/// Find the "Rent Roll" title across the region's pages, in page order.
///
/// Words are scanned sorted by `(top, x0)`. The most recent word matching
/// `rent` is tracked; a later word matching `roll` on approximately the
/// same line and immediately to its right is the title. A word matching
/// neither resets the tracked word. Returns the page number and the title
/// word's top coordinate.
fn find_title(pages: &[StatementPage], region: &[usize]) -> Option<(usize, f64)> {
    let rent_re = word_regex("rent");
    let roll_re = word_regex("roll");

    for &page_no in region {
        let Some(page) = pages.get(page_no) else {
            continue;
        };
        let mut words: Vec<&Word> = page.words.iter().collect();
        words.sort_by(|a, b| {
            a.bbox
                .top
                .total_cmp(&b.bbox.top)
                .then(a.bbox.x0.total_cmp(&b.bbox.x0))
        });

        let mut last_rent: Option<&Word> = None;
        for word in words {
            if rent_re.is_match(&word.text) {
                last_rent = Some(word);
            } else if roll_re.is_match(&word.text) {
                if let Some(rent) = last_rent {
                    if (word.bbox.top - rent.bbox.top).abs() < SAME_LINE
                        && word.bbox.x0 - rent.bbox.x1 < ADJACENT_GAP
                    {
                        return Some((page_no, rent.bbox.top));
                    }
                }
            } else {
                last_rent = None;
            }
        }
    }

    None
}

/// Locate the "Past Due" header box on a candidate header row.
///
/// Either two adjacent words ("Past" then "Due", contiguous horizontally
/// and vertically aligned) or a single word already containing both tokens.
/// Returns the combined box's x-range, unpadded.
fn past_due_box(row: &Row) -> Option<(f64, f64)> {
    let past_re = word_regex(r"\bPast\b");
    let due_re = word_regex(r"\bDue\b");
    let combined_re = word_regex(r"\bPast\s*Due\b");

    let mut past: Option<&Word> = None;
    let mut due: Option<&Word> = None;
    for word in &row.words {
        if past_re.is_match(&word.text) {
            past = Some(word);
        } else if due_re.is_match(&word.text) {
            due = Some(word);
        }

        if let (Some(p), Some(d)) = (past, due) {
            if (d.bbox.top - p.bbox.top).abs() < SAME_LINE
                && d.bbox.x0 - p.bbox.x1 < ADJACENT_GAP
            {
                return Some((p.bbox.x0, d.bbox.x1));
            }
        }
        if combined_re.is_match(&word.text) {
            return Some((word.bbox.x0, word.bbox.x1));
        }
    }

    None
}

/// Scan rows top-to-bottom for one containing every header phrase in
/// order, with a locatable past-due box. Phrase matching is
/// case-insensitive and word-bounded; each match narrows the remaining
/// search text to what follows it.
fn find_header(rows: &[Row]) -> Option<(usize, f64, f64, f64)> {
    let phrase_res: Vec<Regex> = HEADER_PHRASES
        .iter()
        .map(|phrase| word_regex(&format!(r"\b{}\b", regex::escape(phrase))))
        .collect();

    'rows: for (idx, row) in rows.iter().enumerate() {
        let text = row.text();
        let mut search: &str = &text;
        let mut pd_range: Option<(f64, f64)> = None;

        for (phrase, re) in HEADER_PHRASES.iter().zip(&phrase_res) {
            let Some(m) = re.find(search) else {
                continue 'rows;
            };
            if *phrase == "Past Due" {
                pd_range = past_due_box(row);
                if pd_range.is_none() {
                    continue 'rows;
                }
            }
            search = &search[m.end()..];
        }

        if let Some((x0, x1)) = pd_range {
            return Some((idx, row.y_key(), x0, x1));
        }
    }

    None
}

/// Locate the rent-roll table inside a property region.
///
/// Returns `None` when no title pair or no complete header row exists;
/// the caller reports the section as absent (an INFO check) and skips
/// aggregation, leaving the property's other checks untouched.
pub fn locate_rent_roll(pages: &[StatementPage], region: &[usize]) -> Option<RentRollTable> {
    let (page_no, title_y) = find_title(pages, region)?;
    let page = pages.get(page_no)?;

    let below: Vec<Word> = page
        .words
        .iter()
        .filter(|w| w.bbox.top > title_y + TITLE_SKIP)
        .cloned()
        .collect();
    let rows = cluster_rows(&below, ROW_TOLERANCE);

    let (header_idx, header_y, x0, x1) = find_header(&rows)?;
    Some(RentRollTable {
        rows,
        header_idx,
        header_y,
        col_x0: x0 - COLUMN_PADDING,
        col_x1: x1 + COLUMN_PADDING,
    })
}

/// Sum the qualifying negative values of the past-due column.
///
/// Starting below the header row: a row's column content is the joined
/// text of its words overlapping the column x-range (with slack). The scan
/// stops entirely at a "Grand Total" row below the header, or at a long
/// separator row far enough below the header and deep enough into the
/// page. A row contributes its first number-like token only when the value
/// is negative and the row is not a summary/aggregate line, contains no
/// percentage token, and does not match the recurring tenant-code false
/// positive. Unparseable content contributes nothing.
pub fn sum_negative_past_due(table: &RentRollTable) -> f64 {
    let number_re = Regex::new(r"(-?[\d,]+\.?\d{0,2})").unwrap();
    let grand_total_re = word_regex(r"\bGrand\s*Total\b");
    let separator_re = Regex::new(r"^\s*[-=]{10,}\s*$").unwrap();
    let summary_re = word_regex(
        r"\b(Total|Summary|Grand Total|Subtotal|Current Due|Current\s*Activity|Balance|Activity|Actual)\b",
    );
    let percent_re = word_regex(r"\d{1,3}(?:[,\.]\d{3})*(?:[,\.]\d+)?\s*%");
    // Recurring tenant-code line that carries a spurious negative amount.
    let tenant_code_re = word_regex(r"walnut\d+ - \d+");

    let mut sum = 0.0;

    for (idx, row) in table.rows.iter().enumerate().skip(table.header_idx + 1) {
        let y_key = row.y_key();
        if y_key == table.header_y {
            continue;
        }
        let text = row.text();

        let grand_total = grand_total_re.is_match(&text) && y_key > table.header_y;
        let separator = separator_re.is_match(&text)
            && y_key > table.header_y + 10.0
            && idx > MIN_SEPARATOR_ROW;
        if grand_total || separator {
            break;
        }
        if y_key <= table.header_y {
            continue;
        }

        let column_content = row
            .words
            .iter()
            .filter(|w| {
                w.bbox.x0 < table.col_x1 + COLUMN_SLACK && w.bbox.x1 > table.col_x0 - COLUMN_SLACK
            })
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        if column_content.trim().is_empty() {
            continue;
        }

        let Some(caps) = number_re.captures(&column_content) else {
            continue;
        };
        let Some(value) = parse_amount(&caps[1]) else {
            continue;
        };

        let excluded = summary_re.is_match(&text)
            || percent_re.is_match(&text)
            || tenant_code_re.is_match(&text);
        if value < 0.0 && !excluded {
            sum += value;
        }
    }

    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;

    fn word(text: &str, x0: f64, top: f64, width: f64) -> Word {
        Word::new(text, BBox::new(x0, top, x0 + width, top + 10.0))
    }

    /// A page with a title at top=40 and a full header row at top=100.
    /// The past-due column sits around x=500.
    fn table_page(data_rows: &[(f64, &str)]) -> StatementPage {
        let mut words = vec![word("Rent", 72.0, 40.0, 25.0), word("Roll", 99.0, 40.0, 22.0)];
        for (i, header) in [
            "Unit", "Tenant", "Additional", "Tenants", "Status", "Rent", "Deposit", "Move-in",
            "Lease", "From", "Lease", "To",
        ]
        .iter()
        .enumerate()
        {
            words.push(word(header, 40.0 + 38.0 * i as f64, 100.0, 30.0));
        }
        words.push(word("Past", 500.0, 100.0, 20.0));
        words.push(word("Due", 522.0, 100.0, 18.0));

        for &(top, value) in data_rows {
            words.push(word("101", 40.0, top, 15.0));
            words.push(word("Jane", 80.0, top, 22.0));
            words.push(word("Doe", 104.0, top, 20.0));
            words.push(word(value, 500.0, top, 35.0));
        }

        StatementPage::new("", words)
    }

    fn locate(page: &StatementPage) -> Option<RentRollTable> {
        let pages = vec![page.clone()];
        locate_rent_roll(&pages, &[0])
    }

    #[test]
    fn locates_title_and_header() {
        let page = table_page(&[(120.0, "-200.00")]);
        let table = locate(&page).unwrap();
        assert_eq!(table.header_y, 100.0);
        assert_eq!(table.col_x0, 495.0);
        assert_eq!(table.col_x1, 545.0);
    }

    #[test]
    fn no_title_returns_none() {
        let page = StatementPage::new("", vec![word("Operating", 72.0, 40.0, 60.0)]);
        let pages = vec![page];
        assert!(locate_rent_roll(&pages, &[0]).is_none());
    }

    #[test]
    fn title_words_must_be_adjacent() {
        // "Roll" is 50 units to the right of "Rent"'s right edge.
        let page = StatementPage::new(
            "",
            vec![word("Rent", 72.0, 40.0, 25.0), word("Roll", 147.0, 40.0, 22.0)],
        );
        let pages = vec![page];
        assert!(locate_rent_roll(&pages, &[0]).is_none());
    }

    #[test]
    fn intervening_word_resets_title_search() {
        let page = StatementPage::new(
            "",
            vec![
                word("Rent", 72.0, 40.0, 25.0),
                word("and", 99.0, 40.0, 18.0),
                word("Roll", 119.0, 40.0, 22.0),
            ],
        );
        let pages = vec![page];
        assert!(locate_rent_roll(&pages, &[0]).is_none());
    }

    #[test]
    fn header_requires_all_phrases() {
        // Drop the "Status" column from the header.
        let mut words = vec![word("Rent", 72.0, 40.0, 25.0), word("Roll", 99.0, 40.0, 22.0)];
        for (i, header) in [
            "Unit", "Tenant", "Additional", "Tenants", "Rent", "Deposit", "Move-in", "Lease",
            "From", "Lease", "To", "Past", "Due",
        ]
        .iter()
        .enumerate()
        {
            words.push(word(header, 40.0 + 38.0 * i as f64, 100.0, 30.0));
        }
        let pages = vec![StatementPage::new("", words)];
        assert!(locate_rent_roll(&pages, &[0]).is_none());
    }

    #[test]
    fn single_word_containing_both_tokens_accepted() {
        // Some layouts keep "Past Due" as one token (non-breaking space).
        let mut words = vec![word("Rent", 72.0, 40.0, 25.0), word("Roll", 99.0, 40.0, 22.0)];
        for (i, header) in [
            "Unit", "Tenant", "Additional", "Tenants", "Status", "Rent", "Deposit", "Move-in",
            "Lease", "From", "Lease", "To",
        ]
        .iter()
        .enumerate()
        {
            words.push(word(header, 40.0 + 38.0 * i as f64, 100.0, 30.0));
        }
        words.push(word("Past Due", 500.0, 100.0, 40.0));
        let pages = vec![StatementPage::new("", words)];
        let table = locate_rent_roll(&pages, &[0]).unwrap();
        assert_eq!(table.col_x0, 495.0);
        assert_eq!(table.col_x1, 545.0);
    }

    #[test]
    fn sums_negative_column_values() {
        let page = table_page(&[(120.0, "-200.00"), (140.0, "-1,300.00")]);
        let table = locate(&page).unwrap();
        assert_eq!(sum_negative_past_due(&table), -1500.0);
    }

    #[test]
    fn positive_values_do_not_contribute() {
        let page = table_page(&[(120.0, "450.00"), (140.0, "-25.00")]);
        let table = locate(&page).unwrap();
        assert_eq!(sum_negative_past_due(&table), -25.0);
    }

    #[test]
    fn non_numeric_column_content_is_skipped() {
        let page = table_page(&[(120.0, "n/a"), (140.0, "-25.00")]);
        let table = locate(&page).unwrap();
        assert_eq!(sum_negative_past_due(&table), -25.0);
    }

    #[test]
    fn words_outside_column_are_ignored() {
        let mut page = table_page(&[(120.0, "-200.00")]);
        // A negative amount far to the left of the column.
        page.words.push(word("-999.00", 200.0, 120.0, 35.0));
        let table = locate(&page).unwrap();
        assert_eq!(sum_negative_past_due(&table), -200.0);
    }

    #[test]
    fn grand_total_row_stops_the_scan() {
        let mut page = table_page(&[(120.0, "-200.00")]);
        page.words.push(word("Grand", 40.0, 140.0, 30.0));
        page.words.push(word("Total", 72.0, 140.0, 28.0));
        page.words.push(word("-500.00", 500.0, 140.0, 35.0));
        // A further data row below the stop marker must not be reached.
        page.words.push(word("-50.00", 500.0, 160.0, 35.0));
        let table = locate(&page).unwrap();
        assert_eq!(sum_negative_past_due(&table), -200.0);
    }

    #[test]
    fn summary_rows_are_excluded() {
        let mut page = table_page(&[(120.0, "-200.00")]);
        page.words.push(word("Balance", 40.0, 140.0, 45.0));
        page.words.push(word("-75.00", 500.0, 140.0, 35.0));
        let table = locate(&page).unwrap();
        assert_eq!(sum_negative_past_due(&table), -200.0);
    }

    #[test]
    fn percent_rows_are_excluded() {
        let mut page = table_page(&[(120.0, "-200.00")]);
        page.words.push(word("3.5%", 40.0, 140.0, 25.0));
        page.words.push(word("-75.00", 500.0, 140.0, 35.0));
        let table = locate(&page).unwrap();
        assert_eq!(sum_negative_past_due(&table), -200.0);
    }

    #[test]
    fn tenant_code_false_positive_is_excluded() {
        let mut page = table_page(&[(120.0, "-200.00")]);
        page.words.push(word("walnut12", 40.0, 140.0, 45.0));
        page.words.push(word("-", 90.0, 140.0, 6.0));
        page.words.push(word("3", 100.0, 140.0, 8.0));
        page.words.push(word("-75.00", 500.0, 140.0, 35.0));
        let table = locate(&page).unwrap();
        assert_eq!(sum_negative_past_due(&table), -200.0);
    }

    #[test]
    fn separator_near_top_does_not_stop_the_scan() {
        // A separator directly under the header (row index <= 5) is layout
        // noise, not a table end.
        let mut page = table_page(&[(140.0, "-200.00")]);
        page.words.push(word("----------", 40.0, 120.0, 80.0));
        let table = locate(&page).unwrap();
        assert_eq!(sum_negative_past_due(&table), -200.0);
    }

    #[test]
    fn deep_separator_stops_the_scan() {
        let rows: Vec<(f64, &str)> = vec![
            (120.0, "-10.00"),
            (140.0, "-10.00"),
            (160.0, "-10.00"),
            (180.0, "-10.00"),
            (200.0, "-10.00"),
            (220.0, "-10.00"),
        ];
        let mut page = table_page(&rows);
        page.words.push(word("==========", 40.0, 240.0, 80.0));
        page.words.push(word("-500.00", 500.0, 260.0, 35.0));
        let table = locate(&page).unwrap();
        assert_eq!(sum_negative_past_due(&table), -60.0);
    }

    #[test]
    fn empty_table_sums_to_zero() {
        let page = table_page(&[]);
        let table = locate(&page).unwrap();
        assert_eq!(sum_negative_past_due(&table), 0.0);
    }
}
