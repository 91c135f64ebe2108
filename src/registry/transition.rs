//! Stage transition audit records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stage::ModelStage;

/// Record of a single stage change.
///
/// Every call to `set_stage` appends exactly one record, so an observer
/// replaying the log always sees each change individually (a promotion
/// that retires the old Production version shows up as two records).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTransition {
    /// Model name
    pub model_name: String,
    /// Version that changed stage
    pub version: u32,
    /// Previous stage
    pub from_stage: ModelStage,
    /// New stage
    pub to_stage: ModelStage,
    /// When the transition happened
    pub timestamp: DateTime<Utc>,
    /// Optional reason (e.g., "archived on promotion of v5")
    pub reason: Option<String>,
}
