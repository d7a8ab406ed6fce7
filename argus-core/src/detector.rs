//! Detector model.
//!
//! A detector is a user-defined detection unit backed by one or more
//! monitors (scheduled query jobs) in the alerting subsystem. The alerting
//! subsystem persists findings per monitor, so everything detector-scoped
//! goes through the `rule_monitor_map` and `monitor_ids` recorded here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reserved rule-map key naming the chained-findings aggregation monitor.
pub const CHAINED_FINDINGS_MONITOR: &str = "chained_findings_monitor";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detector {
    pub id: String,
    pub name: String,
    /// Log-source category; selects the findings index pattern.
    pub detector_type: String,
    pub enabled: bool,
    /// Monitor ids owned by this detector, in registration order.
    /// Every id here appears as a value in `rule_monitor_map` or is the
    /// chained-findings monitor.
    pub monitor_ids: Vec<String>,
    /// Rule id → monitor id. The reserved [`CHAINED_FINDINGS_MONITOR`] key
    /// points at the chained-findings aggregation monitor.
    pub rule_monitor_map: HashMap<String, String>,
}

impl Detector {
    /// Monitor id of the chained-findings monitor, when one is registered.
    pub fn chained_findings_monitor_id(&self) -> Option<&str> {
        self.rule_monitor_map
            .get(CHAINED_FINDINGS_MONITOR)
            .map(String::as_str)
    }

    /// Reverse lookup: the rule id whose monitor produced `monitor_id`.
    ///
    /// Bucket-level monitors don't record rule queries on their findings,
    /// so attribution has to come back through this map. Arbitrary pick if
    /// several rules map to the same monitor.
    pub fn rule_for_monitor(&self, monitor_id: &str) -> Option<&str> {
        self.rule_monitor_map
            .iter()
            .find(|(_, mapped)| mapped.as_str() == monitor_id)
            .map(|(rule_id, _)| rule_id.as_str())
    }
}
