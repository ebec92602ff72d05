//! Document opening and eager page decoding.

use std::io::Write;
use std::path::Path;

use propaudit_core::StatementPage;

use crate::content;
use crate::error::BackendError;

/// A decoded statement: per-page plain text and positioned words.
///
/// Opening is eager: every page (up to the cap) is decoded up front and
/// the underlying lopdf document and temporary backing file are released
/// before the index is returned. The index itself is a read-only view for
/// the rest of the audit.
#[derive(Debug)]
pub struct DocumentIndex {
    pages: Vec<StatementPage>,
}

impl DocumentIndex {
    /// Decode a statement from raw PDF bytes.
    ///
    /// The bytes are staged to a named temporary file for the decoder and
    /// the file is removed on every exit path, success or failure, by the
    /// guard's drop. Pages beyond `max_pages` are not decoded, bounding
    /// resource use on adversarially large inputs. A page whose content
    /// stream cannot be read decodes to an empty page rather than failing
    /// the document.
    ///
    /// # Errors
    ///
    /// [`BackendError::Parse`] when the bytes are not a PDF that lopdf can
    /// open, [`BackendError::Io`] when staging fails.
    pub fn from_bytes(bytes: &[u8], max_pages: usize) -> Result<Self, BackendError> {
        let mut backing = tempfile::NamedTempFile::new()?;
        backing.write_all(bytes)?;
        backing.flush()?;

        let doc = lopdf::Document::load(backing.path())
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;
        if doc.is_encrypted() {
            return Err(BackendError::Parse("document is encrypted".to_string()));
        }

        // get_pages returns a BTreeMap with 1-based page numbers, already
        // in document order.
        let mut pages = Vec::new();
        for (index, (_, page_id)) in doc.get_pages().into_iter().enumerate() {
            if index >= max_pages {
                break;
            }
            let page = content::extract_page(&doc, page_id).unwrap_or_default();
            pages.push(page);
        }

        Ok(Self { pages })
    }

    /// Read a statement from a file path. Convenience wrapper around
    /// [`DocumentIndex::from_bytes`].
    pub fn open_file(path: impl AsRef<Path>, max_pages: usize) -> Result<Self, BackendError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes, max_pages)
    }

    /// Number of decoded pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The decoded pages, in document order.
    pub fn pages(&self) -> &[StatementPage] {
        &self.pages
    }
}
