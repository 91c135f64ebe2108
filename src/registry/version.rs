//! Model version metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stage::ModelStage;

/// A single registered version of a logical model.
///
/// `version` and `run_id` are immutable after creation; `stage` is the
/// only mutable field and only changes through the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVersion {
    /// Model name (e.g., "house-price")
    pub name: String,
    /// Version number, monotonically increasing per model
    pub version: u32,
    /// Opaque reference to the artifact-store run that produced this version
    pub run_id: String,
    /// Current lifecycle stage
    pub stage: ModelStage,
    /// When this version was registered
    pub created_at: DateTime<Utc>,
    /// When the stage last changed (None if never transitioned)
    pub promoted_at: Option<DateTime<Utc>>,
}

impl ModelVersion {
    /// Create a new version at stage `None`.
    pub fn new(name: &str, version: u32, run_id: &str) -> Self {
        Self {
            name: name.to_string(),
            version,
            run_id: run_id.to_string(),
            stage: ModelStage::None,
            created_at: Utc::now(),
            promoted_at: None,
        }
    }

    /// Set the initial stage (builder-style, for test fixtures).
    pub fn with_stage(mut self, stage: ModelStage) -> Self {
        self.stage = stage;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_version_new() {
        let mv = ModelVersion::new("house-price", 1, "run-8027");
        assert_eq!(mv.name, "house-price");
        assert_eq!(mv.version, 1);
        assert_eq!(mv.run_id, "run-8027");
        assert_eq!(mv.stage, ModelStage::None);
        assert!(mv.promoted_at.is_none());
    }

    #[test]
    fn test_model_version_with_stage() {
        let mv = ModelVersion::new("house-price", 2, "run-x").with_stage(ModelStage::Staging);
        assert_eq!(mv.stage, ModelStage::Staging);
    }

    #[test]
    fn test_model_version_serde_roundtrip() {
        let mv = ModelVersion::new("m", 3, "r").with_stage(ModelStage::Production);
        let json = serde_json::to_string(&mv).unwrap();
        let back: ModelVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mv);
    }
}
