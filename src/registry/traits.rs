//! Model registry trait definition

use super::error::Result;
use super::stage::ModelStage;
use super::transition::StageTransition;
use super::version::ModelVersion;

/// Versioned model catalog with stage lifecycle management.
///
/// Implementations must keep version numbers strictly increasing per
/// model and must funnel every stage change through [`set_stage`] so the
/// transition log stays complete.
///
/// [`set_stage`]: ModelRegistry::set_stage
pub trait ModelRegistry: Send + Sync {
    /// Register a new version for `name`, allocating the next version
    /// number. The version starts at stage `None`.
    fn create_version(&mut self, name: &str, run_id: &str) -> Result<ModelVersion>;

    /// Get a specific version.
    fn get_version(&self, name: &str, version: u32) -> Result<ModelVersion>;

    /// All versions of `name` currently at `stage`, ordered by version
    /// descending (newest first). Empty for unknown models or empty
    /// stages; "no versions" is a normal outcome. Errors only when the
    /// backing store cannot be read.
    fn latest_versions(&self, name: &str, stage: ModelStage) -> Result<Vec<ModelVersion>>;

    /// Transition a version to `target`. The sole mutator of `stage`.
    ///
    /// When `archive_existing` is true and `target` is Production, every
    /// other Production version of the model is archived as a side effect
    /// of this one call. The promotion engine always passes `false`,
    /// preferring one audit record per stage change.
    fn set_stage(
        &mut self,
        name: &str,
        version: u32,
        target: ModelStage,
        archive_existing: bool,
    ) -> Result<ModelVersion>;

    /// All versions of `name`, ascending by version. Empty for unknown
    /// models.
    fn list_versions(&self, name: &str) -> Result<Vec<ModelVersion>>;

    /// Stage transition history for `name`, in the order the transitions
    /// happened.
    fn transition_history(&self, name: &str) -> Result<Vec<StageTransition>>;
}
