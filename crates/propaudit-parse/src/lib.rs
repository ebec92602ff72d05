//! propaudit-parse: lopdf-backed statement decoding.
//!
//! Turns raw PDF bytes into [`propaudit_core::StatementPage`]s (per-page
//! plain text plus positioned words) via a text-only content stream walk.
//! The walk is deliberately narrow: it tracks the transformation and text
//! matrices, resolves glyph advances from font width data, and ignores
//! every painting operator, because the audit engine only ever needs word
//! boxes and reading text.

pub mod content;
pub mod document;
pub mod error;
pub mod fonts;

pub use document::DocumentIndex;
pub use error::BackendError;
