//! # Argus Findings — detector-scoped findings resolution
//!
//! Findings are persisted by the alerting subsystem per monitor, not per
//! detector. This crate translates between the two worlds:
//! - expand a detector (or set of detectors) into its monitor ids,
//!   excluding the chained-findings aggregation monitor from per-rule
//!   attribution,
//! - build one composite search predicate from caller filters,
//! - issue a single search against the alerting subsystem,
//! - reassemble the raw per-monitor records into detector-scoped findings,
//!   synthesizing rule attribution for bucket-level monitors.
//!
//! Read-only: nothing here creates, mutates, or deletes findings.

pub mod client;
pub mod engine;
pub mod projection;
pub mod query;
pub mod topology;
pub mod types;

pub use client::{AlertingSearch, DetectorStore};
pub use engine::FindingsEngine;
pub use types::{
    DetectorFinding, Finding, FindingDocument, FindingFilters, FindingWithDocs, FindingsResponse,
    MonitorMapping, RawFindingsPage, RuleQuery, TableParams,
};
