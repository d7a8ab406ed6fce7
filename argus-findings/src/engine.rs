//! Findings resolution orchestrator.
//!
//! Three entry points, top down:
//! - [`FindingsEngine::findings_by_detector_id`] — fetch the detector,
//!   resolve its monitor topology, delegate.
//! - [`FindingsEngine::findings_for_detectors`] — topology over a caller-
//!   supplied detector set, delegate.
//! - [`FindingsEngine::findings_by_monitor_ids`] — the only entry that
//!   performs search I/O: build the predicate, one search round trip,
//!   project every record back to its owning detector.
//!
//! At most two sequential awaits per call (detector fetch, then search);
//! no per-monitor fan-out. Failures propagate without retries, logged once
//! at this boundary.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use argus_core::{monitor_config, ArgusError, ArgusResult, Detector};
use tracing::{debug, error, warn};

use crate::client::{AlertingSearch, DetectorStore};
use crate::projection::project_finding;
use crate::query::build_findings_query;
use crate::topology::{detector_monitor_mapping, multi_detector_mapping};
use crate::types::{FindingFilters, FindingsResponse, MonitorMapping, TableParams};

pub struct FindingsEngine {
    detectors: Arc<dyn DetectorStore>,
    search: Arc<dyn AlertingSearch>,
    total_requests: AtomicU64,
    total_findings_returned: AtomicU64,
}

impl FindingsEngine {
    pub fn new(detectors: Arc<dyn DetectorStore>, search: Arc<dyn AlertingSearch>) -> Self {
        Self {
            detectors,
            search,
            total_requests: AtomicU64::new(0),
            total_findings_returned: AtomicU64::new(0),
        }
    }

    /// Findings generated by one detector, looked up by id.
    ///
    /// The chained-findings monitor is excluded from attribution; the
    /// findings index pattern comes from the detector's log-source type.
    /// Detector-fetch failures propagate unchanged.
    pub async fn findings_by_detector_id(
        &self,
        detector_id: &str,
        table: &TableParams,
        filters: &FindingFilters,
    ) -> ArgusResult<FindingsResponse> {
        let detector = self.detectors.get_detector(detector_id).await?;

        let mapping = detector_monitor_mapping(&detector);
        let monitor_ids: Vec<String> = mapping.keys().cloned().collect();
        let index_pattern = monitor_config::findings_index_pattern(&detector.detector_type);

        let response = self
            .findings_by_monitor_ids(&mapping, &monitor_ids, &index_pattern, table, filters)
            .await
            .map_err(|e| {
                error!(detector_id, error = %e, "failed to fetch findings for detector");
                ArgusError::wrap(format!("detector {detector_id}"), e)
            })?;

        Ok(merge_responses([response]))
    }

    /// Findings across a detector set whose records the caller already
    /// holds. The index pattern is selected by `log_type`, not by any one
    /// detector; no chained-findings exclusion applies here.
    pub async fn findings_for_detectors(
        &self,
        detectors: &[Detector],
        log_type: &str,
        table: &TableParams,
        filters: &FindingFilters,
    ) -> ArgusResult<FindingsResponse> {
        if detectors.is_empty() {
            return Err(ArgusError::EmptyDetectorList);
        }

        let mapping = multi_detector_mapping(detectors);
        // Union of owned monitor ids, duplicates preserved.
        let monitor_ids: Vec<String> = detectors
            .iter()
            .flat_map(|d| d.monitor_ids.iter().cloned())
            .collect();
        let index_pattern = monitor_config::findings_index_pattern(log_type);

        self.findings_by_monitor_ids(&mapping, &monitor_ids, &index_pattern, table, filters)
            .await
            .map_err(|e| {
                let ids: Vec<&str> = detectors.iter().map(|d| d.id.as_str()).collect();
                error!(detector_ids = ?ids, error = %e, "failed to fetch findings for detectors");
                ArgusError::wrap(format!("detectors [{}]", ids.join(",")), e)
            })
    }

    /// Lowest-level entry point and the only one that performs search I/O.
    ///
    /// The search itself spans every relevant monitor in one request via
    /// the index pattern; `monitor_ids` document the request scope.
    /// Records whose monitor id is missing from `mapping` are skipped.
    pub async fn findings_by_monitor_ids(
        &self,
        mapping: &MonitorMapping<'_>,
        monitor_ids: &[String],
        index_pattern: &str,
        table: &TableParams,
        filters: &FindingFilters,
    ) -> ArgusResult<FindingsResponse> {
        self.total_requests.fetch_add(1, Ordering::Relaxed);

        let query = build_findings_query(filters).to_value();
        debug!(
            monitors = monitor_ids.len(),
            index_pattern, "issuing findings search"
        );

        let page = self
            .search
            .search_findings(table, filters.severity.as_deref(), &query, index_pattern)
            .await?;

        let findings: Vec<_> = page
            .findings
            .iter()
            .filter_map(|raw| match mapping.get(&raw.finding.monitor_id) {
                Some(detector) => Some(project_finding(raw, detector)),
                None => {
                    warn!(
                        monitor_id = %raw.finding.monitor_id,
                        finding_id = %raw.finding.id,
                        "finding from unmapped monitor, skipping"
                    );
                    None
                }
            })
            .collect();

        self.total_findings_returned
            .fetch_add(findings.len() as u64, Ordering::Relaxed);

        Ok(FindingsResponse {
            total_findings: page.total_findings,
            findings,
        })
    }

    /// Search requests issued since construction.
    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    /// Findings returned to callers since construction.
    pub fn total_findings_returned(&self) -> u64 {
        self.total_findings_returned.load(Ordering::Relaxed)
    }
}

/// Fold per-call responses into one immutable aggregate.
fn merge_responses(responses: impl IntoIterator<Item = FindingsResponse>) -> FindingsResponse {
    responses
        .into_iter()
        .fold(FindingsResponse::default(), |mut merged, response| {
            merged.total_findings += response.total_findings;
            merged.findings.extend(response.findings);
            merged
        })
}
