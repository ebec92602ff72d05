//! propaudit: audit multi-property statement PDFs.
//!
//! This is the public API facade crate. It re-exports types from
//! propaudit-core and uses propaudit-parse for PDF decoding.
//!
//! # Architecture
//!
//! - **propaudit-core**: Backend-independent data types and algorithms
//! - **propaudit-parse**: lopdf-backed decoding into page text and words
//! - **propaudit** (this crate): audit entry points tying them together
//!
//! # Example
//!
//! ```ignore
//! let config = RuleConfig::default();
//! let report = propaudit::audit_file("statement.pdf", &config)?;
//! for failing in &report.failing_summary {
//!     println!("{}: {}", failing.property, failing.failed_checks.join(", "));
//! }
//! ```

mod audit;

pub use audit::{audit_bytes, audit_file};
pub use propaudit_core::{
    AuditError, BBox, CheckResult, CheckStatus, ExtractedFields, FailingProperty, PortfolioReport,
    PropertyKey, PropertyReport, RentRollOutcome, RuleConfig, StatementPage, Word,
};
pub use propaudit_parse::DocumentIndex;
