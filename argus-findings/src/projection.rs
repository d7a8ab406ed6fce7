//! Detector-scoped finding projection.
//!
//! Raw findings carry a monitor id but no notion of detector; the detector
//! comes from the caller's monitor mapping. Document-level findings carry
//! their rule queries inline; bucket-level findings don't, so attribution
//! is recovered through the detector's rule map.

use argus_core::Detector;

use crate::types::{DetectorFinding, FindingWithDocs, RuleQuery};

/// Project one raw record into its detector-scoped view. Pure and
/// idempotent; independent of other records in the batch.
pub fn project_finding(raw: &FindingWithDocs, detector: &Detector) -> DetectorFinding {
    let finding = &raw.finding;
    let queries = if finding.queries.is_empty() {
        // Bucket-level monitor: synthesize attribution from the rule map.
        // No matching rule leaves the list empty rather than failing.
        detector
            .rule_for_monitor(&finding.monitor_id)
            .map(|rule_id| vec![RuleQuery::for_rule(rule_id)])
            .unwrap_or_default()
    } else {
        finding.queries.clone()
    };

    DetectorFinding {
        detector_id: detector.id.clone(),
        id: finding.id.clone(),
        related_doc_ids: finding.related_doc_ids.clone(),
        index: finding.index.clone(),
        queries,
        timestamp: finding.timestamp,
        documents: raw.documents.clone(),
    }
}
