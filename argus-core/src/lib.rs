//! # Argus Core — shared platform model
//!
//! Types every Argus component links against: the detector model, the
//! platform error taxonomy, and monitor/index naming conventions.

pub mod detector;
pub mod error;
pub mod monitor_config;

pub use detector::{Detector, CHAINED_FINDINGS_MONITOR};
pub use error::{ArgusError, ArgusResult, StatusKind};
