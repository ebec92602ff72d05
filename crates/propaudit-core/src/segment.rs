//! Partitioning of a multi-page statement into per-property page regions.

use indexmap::IndexMap;

use crate::word::StatementPage;

/// Marker token that introduces a property header line.
pub const PROPERTY_MARKER: &str = "Properties:";

/// Identity of one property within a statement.
///
/// Uniqueness is by value equality; two regions with the same key are
/// merged, pages concatenated in page order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyKey {
    pub code: String,
    pub address: String,
}

impl PropertyKey {
    pub fn new(code: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            address: address.into(),
        }
    }

    /// Sentinel key for pages seen before any property header.
    pub fn unassigned() -> Self {
        Self::new("UNASSIGNED", "NO_HEADER")
    }

    /// Display label used in reports: `"{code} - {address}"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.address)
    }
}

/// Parse the remainder of a marker line into a property key.
///
/// The content is split on the first hyphen into `(code, address)`; with no
/// hyphen the whole content is the code and the address is `"N/A"`.
fn parse_header(content: &str) -> PropertyKey {
    match content.split_once('-') {
        Some((code, address)) => PropertyKey::new(code.trim(), address.trim()),
        None => PropertyKey::new(content.trim(), "N/A"),
    }
}

/// Partition pages into contiguous per-property regions.
///
/// Each page's text is scanned for the first line starting with
/// [`PROPERTY_MARKER`]. A marker line updates the current property only
/// when its parsed key differs from the current one, so repeated headers
/// across a multi-page property are no-ops. Every page is assigned to the
/// current property at the time it is scanned; pages before any marker
/// collect under [`PropertyKey::unassigned`]. The returned map preserves
/// first-seen order.
pub fn segment_pages(pages: &[StatementPage]) -> IndexMap<PropertyKey, Vec<usize>> {
    let mut regions: IndexMap<PropertyKey, Vec<usize>> = IndexMap::new();
    let mut current: Option<PropertyKey> = None;

    for (page_no, page) in pages.iter().enumerate() {
        let header = page
            .text
            .lines()
            .find_map(|line| line.trim().strip_prefix(PROPERTY_MARKER));

        if let Some(content) = header {
            let key = parse_header(content.trim());
            if current.as_ref() != Some(&key) {
                regions.entry(key.clone()).or_default();
                current = Some(key);
            }
        }

        let key = current.clone().unwrap_or_else(PropertyKey::unassigned);
        regions.entry(key).or_default().push(page_no);
    }

    regions
}
