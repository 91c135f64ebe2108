//! Model lifecycle stages

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle stage of a registered model version.
///
/// Versions are created at `None`, validated in `Staging`, serve traffic
/// in `Production`, and retire to `Archived`. Archived is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelStage {
    /// Newly registered, not assigned to any stage
    None,
    /// Being tested/validated
    Staging,
    /// Serving traffic
    Production,
    /// Retired from active use
    Archived,
}

impl ModelStage {
    /// Check whether a transition to `target` is legal.
    ///
    /// Legal transitions:
    /// - same stage (no-op)
    /// - `None` -> `Staging`
    /// - `Staging` -> `Production`
    /// - any non-archived stage -> `Archived`
    ///
    /// There is no demotion path out of `Production` other than archival,
    /// and nothing leaves `Archived`.
    pub fn can_transition_to(self, target: ModelStage) -> bool {
        match (self, target) {
            (a, b) if a == b => true,
            (ModelStage::Archived, _) => false,
            (_, ModelStage::Archived) => true,
            (ModelStage::None, ModelStage::Staging) => true,
            (ModelStage::Staging, ModelStage::Production) => true,
            _ => false,
        }
    }

    /// Display name, matching the registry query surface strings.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelStage::None => "None",
            ModelStage::Staging => "Staging",
            ModelStage::Production => "Production",
            ModelStage::Archived => "Archived",
        }
    }
}

impl std::fmt::Display for ModelStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModelStage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "None" => Ok(ModelStage::None),
            "Staging" => Ok(ModelStage::Staging),
            "Production" => Ok(ModelStage::Production),
            "Archived" => Ok(ModelStage::Archived),
            other => Err(format!("unknown stage: {other}")),
        }
    }
}
