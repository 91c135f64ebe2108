//! In-memory model registry implementation

use chrono::Utc;
use std::collections::{BTreeMap, HashMap};

use super::error::{RegistryError, Result};
use super::stage::ModelStage;
use super::traits::ModelRegistry;
use super::transition::StageTransition;
use super::version::ModelVersion;

/// In-memory model registry.
///
/// Backs tests and single-process serving; the file-backed
/// [`JsonFileRegistry`](super::JsonFileRegistry) reuses its behavior
/// through the same trait.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    /// Versions by model name, ordered by version number
    models: HashMap<String, BTreeMap<u32, ModelVersion>>,
    /// Append-only stage transition log
    transitions: Vec<StageTransition>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next version number for a model (1-based, never reused).
    fn next_version(&self, name: &str) -> u32 {
        self.models
            .get(name)
            .and_then(|versions| versions.keys().max().copied())
            .unwrap_or(0)
            + 1
    }

    fn apply_transition(
        &mut self,
        name: &str,
        version: u32,
        target: ModelStage,
        reason: Option<String>,
    ) -> Result<ModelVersion> {
        let mv = self
            .models
            .get_mut(name)
            .and_then(|versions| versions.get_mut(&version))
            .ok_or_else(|| RegistryError::VersionNotFound(name.to_string(), version))?;

        if !mv.stage.can_transition_to(target) {
            return Err(RegistryError::InvalidTransition(
                mv.stage,
                target,
                name.to_string(),
                version,
            ));
        }

        let from_stage = mv.stage;
        mv.stage = target;
        mv.promoted_at = Some(Utc::now());
        let snapshot = mv.clone();

        self.transitions.push(StageTransition {
            model_name: name.to_string(),
            version,
            from_stage,
            to_stage: target,
            timestamp: Utc::now(),
            reason,
        });

        Ok(snapshot)
    }
}

impl ModelRegistry for InMemoryRegistry {
    fn create_version(&mut self, name: &str, run_id: &str) -> Result<ModelVersion> {
        let version = self.next_version(name);
        let mv = ModelVersion::new(name, version, run_id);

        self.models
            .entry(name.to_string())
            .or_default()
            .insert(version, mv.clone());

        Ok(mv)
    }

    fn get_version(&self, name: &str, version: u32) -> Result<ModelVersion> {
        self.models
            .get(name)
            .and_then(|versions| versions.get(&version))
            .cloned()
            .ok_or_else(|| RegistryError::VersionNotFound(name.to_string(), version))
    }

    fn latest_versions(&self, name: &str, stage: ModelStage) -> Result<Vec<ModelVersion>> {
        Ok(self
            .models
            .get(name)
            .map(|versions| {
                versions
                    .values()
                    .rev()
                    .filter(|mv| mv.stage == stage)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn set_stage(
        &mut self,
        name: &str,
        version: u32,
        target: ModelStage,
        archive_existing: bool,
    ) -> Result<ModelVersion> {
        if archive_existing && target == ModelStage::Production {
            let others: Vec<u32> = self
                .latest_versions(name, ModelStage::Production)?
                .into_iter()
                .map(|mv| mv.version)
                .filter(|&v| v != version)
                .collect();
            for other in others {
                self.apply_transition(
                    name,
                    other,
                    ModelStage::Archived,
                    Some(format!("archived on promotion of v{version}")),
                )?;
            }
        }

        self.apply_transition(name, version, target, None)
    }

    fn list_versions(&self, name: &str) -> Result<Vec<ModelVersion>> {
        Ok(self
            .models
            .get(name)
            .map(|versions| versions.values().cloned().collect())
            .unwrap_or_default())
    }

    fn transition_history(&self, name: &str) -> Result<Vec<StageTransition>> {
        Ok(self
            .transitions
            .iter()
            .filter(|t| t.model_name == name)
            .cloned()
            .collect())
    }
}
