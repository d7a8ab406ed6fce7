//! Index naming for detector monitors.
//!
//! The alerting subsystem writes findings into per-log-type indices named
//! `.argus-<log_type>-findings-<suffix>`; searches span all of them with
//! the wildcard pattern built here.

const FINDINGS_INDEX_PREFIX: &str = ".argus-";

/// Pattern matching every findings index of one log-source category.
pub fn findings_index_pattern(log_type: &str) -> String {
    format!(
        "{}{}-findings*",
        FINDINGS_INDEX_PREFIX,
        log_type.to_lowercase()
    )
}
