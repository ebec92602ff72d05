use crate::geometry::BBox;

/// A positioned text token on a statement page.
///
/// Produced once per page by the PDF decoder and immutable for the lifetime
/// of one audit. All downstream geometry (row clustering, column membership,
/// title detection) works on these boxes alone.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Word {
    /// The token text, whitespace-free.
    pub text: String,
    /// Bounding box in top-left page coordinates.
    pub bbox: BBox,
}

impl Word {
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// One decoded page: plain text plus the page's positioned words.
///
/// The plain text is the reading view of the page (words grouped into
/// visual lines, top to bottom) and is used for label-anchored scanning
/// where exact word boxes are unnecessary.
#[derive(Debug, Clone, Default)]
pub struct StatementPage {
    /// Full plain-text content of the page, one visual line per text line.
    pub text: String,
    /// Positioned words of the page.
    pub words: Vec<Word>,
}

impl StatementPage {
    pub fn new(text: impl Into<String>, words: Vec<Word>) -> Self {
        Self {
            text: text.into(),
            words,
        }
    }
}
