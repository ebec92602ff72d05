use std::collections::BTreeSet;
use std::path::Path;

use propaudit::{DocumentIndex, RuleConfig};

/// Open a statement PDF with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not
/// found or cannot be decoded.
pub fn open_document(file: &Path) -> Result<DocumentIndex, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    DocumentIndex::open_file(file, RuleConfig::default().max_pages).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}

/// Resolve an optional page range string into 0-indexed page indices.
///
/// `None` means all pages. Range syntax is 1-indexed, comma-separated,
/// with dashed spans: "1,3-5".
pub fn resolve_pages(pages: Option<&str>, page_count: usize) -> Result<Vec<usize>, i32> {
    match pages {
        Some(range) => parse_page_range(range, page_count).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok((0..page_count).collect()),
    }
}

/// Parse a page range like "1,3-5" into sorted, deduplicated 0-indexed
/// page numbers, validated against the document's page count.
fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = BTreeSet::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (start, end) = match part.split_once('-') {
            Some((a, b)) => (parse_page_number(a)?, parse_page_number(b)?),
            None => {
                let page = parse_page_number(part)?;
                (page, page)
            }
        };
        for page in start..=end {
            if page > page_count {
                return Err(format!(
                    "page {page} exceeds document page count ({page_count})"
                ));
            }
            pages.insert(page - 1);
        }
    }

    Ok(pages.into_iter().collect())
}

fn parse_page_number(text: &str) -> Result<usize, String> {
    let page: usize = text
        .trim()
        .parse()
        .map_err(|_| format!("invalid page number: '{}'", text.trim()))?;
    if page == 0 {
        return Err("page 0 is invalid (pages start at 1)".to_string());
    }
    Ok(page)
}
