//! Thread-safe registry wrapper

use std::sync::{Arc, Mutex, PoisonError};

use super::error::Result;
use super::stage::ModelStage;
use super::traits::ModelRegistry;
use super::transition::StageTransition;
use super::version::ModelVersion;

/// Cloneable, thread-safe wrapper around any [`ModelRegistry`].
///
/// All operations take the same lock, so stage mutations are linearized:
/// two concurrent promotions cannot both observe "no current Production"
/// and leave two versions in Production.
#[derive(Debug)]
pub struct SharedRegistry<R: ModelRegistry> {
    inner: Arc<Mutex<R>>,
}

impl<R: ModelRegistry> Clone for SharedRegistry<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: ModelRegistry> SharedRegistry<R> {
    /// Wrap a registry for shared use.
    pub fn new(registry: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Run a closure against the locked registry.
    ///
    /// Composite operations (query then mutate, like a promotion) must go
    /// through here so the whole sequence holds the lock.
    pub fn with<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl<R: ModelRegistry> ModelRegistry for SharedRegistry<R> {
    fn create_version(&mut self, name: &str, run_id: &str) -> Result<ModelVersion> {
        self.with(|r| r.create_version(name, run_id))
    }

    fn get_version(&self, name: &str, version: u32) -> Result<ModelVersion> {
        self.with(|r| r.get_version(name, version))
    }

    fn latest_versions(&self, name: &str, stage: ModelStage) -> Result<Vec<ModelVersion>> {
        self.with(|r| r.latest_versions(name, stage))
    }

    fn set_stage(
        &mut self,
        name: &str,
        version: u32,
        target: ModelStage,
        archive_existing: bool,
    ) -> Result<ModelVersion> {
        self.with(|r| r.set_stage(name, version, target, archive_existing))
    }

    fn list_versions(&self, name: &str) -> Result<Vec<ModelVersion>> {
        self.with(|r| r.list_versions(name))
    }

    fn transition_history(&self, name: &str) -> Result<Vec<StageTransition>> {
        self.with(|r| r.transition_history(name))
    }
}
