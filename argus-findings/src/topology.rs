//! Monitor topology resolution.
//!
//! Builds the request-scoped monitor id → owning detector mapping used to
//! attribute raw findings back to detectors. Pure data transformation, no
//! I/O.

use argus_core::Detector;

use crate::types::MonitorMapping;

/// Mapping for a single detector, excluding its chained-findings monitor.
///
/// The chained monitor still participates in the underlying findings
/// indices, but its matches must not double-count against per-rule
/// attribution.
pub fn detector_monitor_mapping(detector: &Detector) -> MonitorMapping<'_> {
    let chained = detector.chained_findings_monitor_id();
    detector
        .monitor_ids
        .iter()
        .filter(|monitor_id| chained != Some(monitor_id.as_str()))
        .map(|monitor_id| (monitor_id.clone(), detector))
        .collect()
}

/// Union mapping over a detector set, no chained-findings exclusion.
/// On monitor-id collision the later detector wins.
pub fn multi_detector_mapping(detectors: &[Detector]) -> MonitorMapping<'_> {
    let mut mapping = MonitorMapping::new();
    for detector in detectors {
        for monitor_id in &detector.monitor_ids {
            mapping.insert(monitor_id.clone(), detector);
        }
    }
    mapping
}
