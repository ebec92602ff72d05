//! Reconstruction of visual table rows from positioned words.
//!
//! PDFs expose word boxes, not table structure; rows have to be inferred
//! from near-collinear vertical centers, because baseline jitter and font
//! metrics make exact top-coordinate equality unreliable.

use crate::word::Word;

/// A reconstructed visual line of words, sorted left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub words: Vec<Word>,
}

impl Row {
    /// Rounded top coordinate of the first word; the row's vertical identity.
    pub fn y_key(&self) -> f64 {
        self.words.first().map(|w| w.bbox.top.round()).unwrap_or(0.0)
    }

    /// The row's words joined with single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Cluster words into visual rows by vertical-center proximity.
///
/// Words are sorted by `(top, x0)`, then a greedy single pass grows the
/// current row while the next word's vertical center stays within
/// `y_tolerance` of the running average vertical center of the group; a
/// word outside tolerance starts a new row. Each row is then sorted by
/// `x0`, yielding rows in top-to-bottom, left-to-right order.
pub fn cluster_rows(words: &[Word], y_tolerance: f64) -> Vec<Row> {
    let mut sorted: Vec<&Word> = words.iter().collect();
    sorted.sort_by(|a, b| {
        a.bbox
            .top
            .total_cmp(&b.bbox.top)
            .then(a.bbox.x0.total_cmp(&b.bbox.x0))
    });

    let mut rows: Vec<Row> = Vec::new();
    let mut group: Vec<Word> = Vec::new();
    let mut center_sum = 0.0;

    for word in sorted {
        let center = word.bbox.v_center();
        if group.is_empty() {
            center_sum = center;
            group.push(word.clone());
            continue;
        }
        let group_center = center_sum / group.len() as f64;
        if (center - group_center).abs() < y_tolerance {
            center_sum += center;
            group.push(word.clone());
        } else {
            rows.push(finish_row(group));
            center_sum = center;
            group = vec![word.clone()];
        }
    }
    if !group.is_empty() {
        rows.push(finish_row(group));
    }

    rows
}

fn finish_row(mut words: Vec<Word>) -> Row {
    words.sort_by(|a, b| a.bbox.x0.total_cmp(&b.bbox.x0));
    Row { words }
}
