//! propaudit-core: Backend-independent data types and audit algorithms.
//!
//! This crate provides the foundational types (BBox, Word, StatementPage,
//! Row) and the audit pipeline stages that operate on them: property
//! segmentation, label-anchored field extraction, geometric rent-roll
//! reconstruction, and the business-rule engine. It knows nothing about
//! PDF parsing: every function here works on plain text and positioned
//! words, so the whole pipeline is unit-testable with synthetic fixtures.

pub mod config;
pub mod error;
pub mod fields;
pub mod geometry;
pub mod rentroll;
pub mod report;
pub mod rows;
pub mod rules;
pub mod segment;
pub mod word;

pub use config::RuleConfig;
pub use error::AuditError;
pub use fields::{ExtractedFields, extract_fields, parse_amount};
pub use geometry::BBox;
pub use rentroll::{RentRollOutcome, RentRollTable, locate_rent_roll, sum_negative_past_due};
pub use report::{
    CheckResult, CheckStatus, FailingProperty, PortfolioReport, PropertyReport, format_amount,
    format_usd,
};
pub use rows::{Row, cluster_rows};
pub use rules::{PropertyEvaluation, evaluate_property};
pub use segment::{PROPERTY_MARKER, PropertyKey, segment_pages};
pub use word::{StatementPage, Word};
