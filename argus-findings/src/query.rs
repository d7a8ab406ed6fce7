//! Findings search predicate construction.
//!
//! Pure translation of caller filters into the alerting subsystem's
//! bool-query DSL. Each present filter contributes exactly one clause;
//! absent filters contribute nothing. Execution belongs to the search
//! client, not here.

use serde_json::{json, Value};

use crate::types::FindingFilters;

/// Rule-query id prefix marking threat-intelligence rules.
pub const THREAT_INTEL_RULE_PREFIX: &str = "threat_intel_";

/// Composable bool predicate. `must`/`filter` clauses combine with AND;
/// rendered to the search DSL with [`BoolQuery::to_value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    must: Vec<Value>,
    filter: Vec<Value>,
}

impl BoolQuery {
    pub fn push_must(&mut self, clause: Value) {
        self.must.push(clause);
    }

    pub fn push_filter(&mut self, clause: Value) {
        self.filter.push(clause);
    }

    pub fn must_clauses(&self) -> &[Value] {
        &self.must
    }

    pub fn filter_clauses(&self) -> &[Value] {
        &self.filter
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.filter.is_empty()
    }

    /// Render as a search body; an empty predicate renders as a bare bool
    /// query, which matches everything.
    pub fn to_value(&self) -> Value {
        let mut bool_body = serde_json::Map::new();
        if !self.must.is_empty() {
            bool_body.insert("must".into(), Value::Array(self.must.clone()));
        }
        if !self.filter.is_empty() {
            bool_body.insert("filter".into(), Value::Array(self.filter.clone()));
        }
        json!({ "bool": bool_body })
    }
}

/// Clause over the nested per-rule query descriptors; never affects
/// relevance scoring.
fn nested_queries(inner: Value) -> Value {
    json!({
        "nested": {
            "path": "queries",
            "query": inner,
            "score_mode": "none"
        }
    })
}

/// Build the composite findings predicate from caller filters.
pub fn build_findings_query(filters: &FindingFilters) -> BoolQuery {
    let mut query = BoolQuery::default();

    if let Some(detection_type) = filters
        .detection_type
        .as_deref()
        .filter(|v| !v.trim().is_empty())
    {
        // "threat" selects threat-intel rules; every other value excludes
        // them.
        let inner = if detection_type.eq_ignore_ascii_case("threat") {
            json!({
                "bool": {
                    "filter": [{ "prefix": { "queries.id": THREAT_INTEL_RULE_PREFIX } }]
                }
            })
        } else {
            json!({
                "bool": {
                    "must_not": [{ "prefix": { "queries.id": THREAT_INTEL_RULE_PREFIX } }]
                }
            })
        };
        query.push_must(nested_queries(inner));
    }

    if let Some(ids) = filters.finding_ids.as_ref().filter(|ids| !ids.is_empty()) {
        query.push_filter(json!({ "terms": { "id": ids } }));
    }

    // Both bounds or no range clause at all.
    if let (Some(start), Some(end)) = (filters.start_time, filters.end_time) {
        query.push_filter(json!({
            "range": {
                "timestamp": {
                    "gte": start.timestamp_millis(),
                    "lte": end.timestamp_millis()
                }
            }
        }));
    }

    if let Some(severity) = filters.severity.as_deref() {
        // The finding qualifies if any of its rules carries the tag.
        query.push_must(nested_queries(json!({
            "bool": {
                "should": [{ "match": { "queries.tags": severity } }]
            }
        })));
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn all_filters() -> FindingFilters {
        FindingFilters {
            severity: Some("high".into()),
            detection_type: Some("threat".into()),
            finding_ids: Some(vec!["f1".into(), "f2".into()]),
            start_time: Some(Utc.timestamp_millis_opt(1_000).unwrap()),
            end_time: Some(Utc.timestamp_millis_opt(2_000).unwrap()),
        }
    }

    #[test]
    fn clause_presence_tracks_filter_presence() {
        let empty = build_findings_query(&FindingFilters::default());
        assert!(empty.is_empty());
        assert_eq!(empty.to_value(), serde_json::json!({ "bool": {} }));

        let full = build_findings_query(&all_filters());
        // detection type + severity in must, ids + range in filter
        assert_eq!(full.must_clauses().len(), 2);
        assert_eq!(full.filter_clauses().len(), 2);

        let ids_only = build_findings_query(&FindingFilters {
            finding_ids: Some(vec!["f1".into(), "f2".into()]),
            ..Default::default()
        });
        assert!(ids_only.must_clauses().is_empty());
        assert_eq!(
            ids_only.to_value(),
            json!({ "bool": { "filter": [{ "terms": { "id": ["f1", "f2"] } }] } })
        );
    }

    #[test]
    fn threat_detection_type_is_case_insensitive() {
        for value in ["threat", "THREAT", "Threat"] {
            let query = build_findings_query(&FindingFilters {
                detection_type: Some(value.into()),
                ..Default::default()
            });
            let rendered = serde_json::to_string(&query.to_value()).unwrap();
            assert!(rendered.contains(r#""filter":[{"prefix""#), "value {value}");
            assert!(!rendered.contains("must_not"), "value {value}");
        }
    }

    #[test]
    fn other_detection_type_excludes_threat_intel_rules() {
        let query = build_findings_query(&FindingFilters {
            detection_type: Some("rules".into()),
            ..Default::default()
        });
        let rendered = serde_json::to_string(&query.to_value()).unwrap();
        assert!(rendered.contains("must_not"));
        assert!(rendered.contains(THREAT_INTEL_RULE_PREFIX));
    }

    #[test]
    fn blank_detection_type_adds_no_clause() {
        let query = build_findings_query(&FindingFilters {
            detection_type: Some("   ".into()),
            ..Default::default()
        });
        assert!(query.is_empty());
    }

    #[test]
    fn single_time_bound_adds_no_range_clause() {
        let query = build_findings_query(&FindingFilters {
            start_time: Some(Utc.timestamp_millis_opt(1_000).unwrap()),
            ..Default::default()
        });
        assert!(query.is_empty());

        let query = build_findings_query(&FindingFilters {
            end_time: Some(Utc.timestamp_millis_opt(2_000).unwrap()),
            ..Default::default()
        });
        assert!(query.is_empty());
    }

    #[test]
    fn time_range_is_inclusive_epoch_millis() {
        let query = build_findings_query(&FindingFilters {
            start_time: Some(Utc.timestamp_millis_opt(1_000).unwrap()),
            end_time: Some(Utc.timestamp_millis_opt(2_000).unwrap()),
            ..Default::default()
        });
        assert_eq!(
            query.filter_clauses(),
            &[json!({ "range": { "timestamp": { "gte": 1_000, "lte": 2_000 } } })]
        );
    }

    #[test]
    fn severity_matches_any_nested_rule_tag() {
        let query = build_findings_query(&FindingFilters {
            severity: Some("high".into()),
            ..Default::default()
        });
        assert_eq!(
            query.must_clauses(),
            &[json!({
                "nested": {
                    "path": "queries",
                    "query": {
                        "bool": { "should": [{ "match": { "queries.tags": "high" } }] }
                    },
                    "score_mode": "none"
                }
            })]
        );
    }

    #[test]
    fn severity_clause_is_independent_of_other_filters() {
        let mut filters = all_filters();
        filters.detection_type = None;
        filters.finding_ids = None;
        let query = build_findings_query(&filters);
        let rendered = serde_json::to_string(&query.to_value()).unwrap();
        assert!(rendered.contains(r#""queries.tags":"high""#));
    }
}
