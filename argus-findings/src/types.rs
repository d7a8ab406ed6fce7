//! Data types crossing the findings resolution boundary.

use argus_core::Detector;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Paging and sort parameters. Opaque to this engine; handed to the
/// alerting subsystem untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableParams {
    pub sort_order: String,
    pub sort_string: String,
    pub size: usize,
    pub start_index: usize,
    pub search_string: String,
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            sort_order: "asc".into(),
            sort_string: "timestamp".into(),
            size: 20,
            start_index: 0,
            search_string: String::new(),
        }
    }
}

/// Caller-supplied findings filters. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingFilters {
    /// Free-text severity tag; matches any rule tag on the finding.
    pub severity: Option<String>,
    /// `"threat"` (any case) selects threat-intel rules; any other
    /// non-blank value excludes them.
    pub detection_type: Option<String>,
    /// Allow-list of finding ids.
    pub finding_ids: Option<Vec<String>>,
    /// Inclusive lower bound; only applied together with `end_time`.
    pub start_time: Option<DateTime<Utc>>,
    /// Inclusive upper bound; only applied together with `start_time`.
    pub end_time: Option<DateTime<Utc>>,
}

/// Per-rule query descriptor attached to a finding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleQuery {
    pub id: String,
    pub name: String,
    pub query: String,
    pub tags: Vec<String>,
    pub fields: Vec<String>,
}

impl RuleQuery {
    /// Descriptor synthesized for bucket-level findings: rule id only.
    pub fn for_rule(rule_id: impl Into<String>) -> Self {
        Self {
            id: rule_id.into(),
            ..Self::default()
        }
    }
}

/// Raw finding as persisted by the alerting subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub monitor_id: String,
    pub related_doc_ids: Vec<String>,
    /// Source index the matched documents live in.
    pub index: String,
    /// Empty for bucket-level monitors, which record no per-rule queries.
    pub queries: Vec<RuleQuery>,
    pub timestamp: DateTime<Utc>,
}

/// A raw finding together with the documents it matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingWithDocs {
    pub finding: Finding,
    pub documents: Vec<FindingDocument>,
}

/// One matched document body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingDocument {
    pub index: String,
    pub id: String,
    pub found: bool,
    pub document: String,
}

/// Detector-scoped view of a finding — the externally visible result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorFinding {
    pub detector_id: String,
    pub id: String,
    pub related_doc_ids: Vec<String>,
    pub index: String,
    pub queries: Vec<RuleQuery>,
    pub timestamp: DateTime<Utc>,
    pub documents: Vec<FindingDocument>,
}

/// Aggregated findings response delivered to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingsResponse {
    pub total_findings: u64,
    pub findings: Vec<DetectorFinding>,
}

/// One page of raw findings from the alerting subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFindingsPage {
    pub total_findings: u64,
    pub findings: Vec<FindingWithDocs>,
}

/// Monitor id → owning detector lookup, built fresh per request and
/// dropped with it.
pub type MonitorMapping<'a> = HashMap<String, &'a Detector>;
