//! Collaborator seams: detector storage and alerting search.
//!
//! The engine never talks to a network itself; both round trips go through
//! these traits. Implementations are shared, stateless, and reentrant —
//! the engine holds them behind `Arc` and does no locking.

use argus_core::{ArgusResult, Detector};

use crate::types::{RawFindingsPage, TableParams};

/// Detector storage, owned by a separate service.
#[async_trait::async_trait]
pub trait DetectorStore: Send + Sync {
    /// Fetch one detector by id. `ArgusError::DetectorNotFound` when no
    /// such detector exists.
    async fn get_detector(&self, detector_id: &str) -> ArgusResult<Detector>;
}

/// The alerting subsystem's findings search.
#[async_trait::async_trait]
pub trait AlertingSearch: Send + Sync {
    /// One search round trip against `index_pattern`, constrained by the
    /// rendered bool `query`. `table` passes through uninterpreted;
    /// `severity` mirrors the alerting request shape but the predicate
    /// already encodes it. No retries, no internal paging.
    async fn search_findings(
        &self,
        table: &TableParams,
        severity: Option<&str>,
        query: &serde_json::Value,
        index_pattern: &str,
    ) -> ArgusResult<RawFindingsPage>;
}
