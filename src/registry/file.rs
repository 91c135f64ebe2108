//! JSON file-backed model registry
//!
//! Stores each model as a single JSON document `{name}.json` in a
//! directory. Every mutation rewrites the whole document, so a record on
//! disk is always a complete, consistent snapshot of the model's
//! versions and transition log.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{RegistryError, Result};
use super::stage::ModelStage;
use super::traits::ModelRegistry;
use super::transition::StageTransition;
use super::version::ModelVersion;

/// On-disk document for a single model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ModelRecord {
    versions: Vec<ModelVersion>,
    transitions: Vec<StageTransition>,
}

impl ModelRecord {
    fn find_mut(&mut self, version: u32) -> Option<&mut ModelVersion> {
        self.versions.iter_mut().find(|mv| mv.version == version)
    }

    fn transition(
        &mut self,
        name: &str,
        version: u32,
        target: ModelStage,
        reason: Option<String>,
    ) -> Result<ModelVersion> {
        let mv = self
            .find_mut(version)
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

/// File-backed registry, one JSON document per model.
///
/// # Example
///
/// ```no_run
/// use servir::registry::{JsonFileRegistry, ModelRegistry};
///
/// let mut registry = JsonFileRegistry::new("/var/lib/servir/registry");
/// let mv = registry.create_version("house-price", "run-8027").unwrap();
/// ```
#[derive(Debug)]
pub struct JsonFileRegistry {
    dir: PathBuf,
}

impl JsonFileRegistry {
    /// Create a registry rooted at `dir`, creating it lazily on first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn model_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Load the on-disk record for `name`.
    ///
    /// A missing file is an empty record (the model has no versions yet);
    /// an unreadable or unparseable file is an error, never silently
    /// treated as empty.
    fn load(&self, name: &str) -> Result<ModelRecord> {
        let path = self.model_path(name);
        if !path.exists() {
            return Ok(ModelRecord::default());
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, name: &str, record: &ModelRecord) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(self.model_path(name), json)?;
        Ok(())
    }
}

impl ModelRegistry for JsonFileRegistry {
    fn create_version(&mut self, name: &str, run_id: &str) -> Result<ModelVersion> {
        let mut record = self.load(name)?;
        let version = record.versions.iter().map(|mv| mv.version).max().unwrap_or(0) + 1;
        let mv = ModelVersion::new(name, version, run_id);
        record.versions.push(mv.clone());
        self.save(name, &record)?;
        Ok(mv)
    }

    fn get_version(&self, name: &str, version: u32) -> Result<ModelVersion> {
        self.load(name)?
            .versions
            .into_iter()
            .find(|mv| mv.version == version)
            .ok_or_else(|| RegistryError::VersionNotFound(name.to_string(), version))
    }

    fn latest_versions(&self, name: &str, stage: ModelStage) -> Result<Vec<ModelVersion>> {
        let mut matching: Vec<ModelVersion> = self
            .load(name)?
            .versions
            .into_iter()
            .filter(|mv| mv.stage == stage)
            .collect();
        matching.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(matching)
    }

    fn set_stage(
        &mut self,
        name: &str,
        version: u32,
        target: ModelStage,
        archive_existing: bool,
    ) -> Result<ModelVersion> {
        let mut record = self.load(name)?;

        if archive_existing && target == ModelStage::Production {
            let others: Vec<u32> = record
                .versions
                .iter()
                .filter(|mv| mv.stage == ModelStage::Production && mv.version != version)
                .map(|mv| mv.version)
                .collect();
            for other in others {
                record.transition(
                    name,
                    other,
                    ModelStage::Archived,
                    Some(format!("archived on promotion of v{version}")),
                )?;
            }
        }

        let mv = record.transition(name, version, target, None)?;
        // Persist only after every transition validated; all-or-nothing per call
        self.save(name, &record)?;
        Ok(mv)
    }

    fn list_versions(&self, name: &str) -> Result<Vec<ModelVersion>> {
        let mut versions = self.load(name)?.versions;
        versions.sort_by_key(|mv| mv.version);
        Ok(versions)
    }

    fn transition_history(&self, name: &str) -> Result<Vec<StageTransition>> {
        Ok(self.load(name)?.transitions)
    }
}
