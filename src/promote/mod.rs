//! Stage Transition Engine
//!
//! Promotes the newest Staging version of a model to Production and
//! retires the previous Production version to Archived.
//!
//! The archive and the promotion are two separate `set_stage` calls by
//! design: every stage change lands in the transition log individually,
//! so an observer replaying history sees a legal intermediate state (old
//! Production archived, then the new version promoted) rather than an
//! opaque swap. The registry's `archive_existing` flag is always held
//! `false` here for that reason.
//!
//! # Example
//!
//! ```
//! use servir::promote::promote_to_production;
//! use servir::registry::{InMemoryRegistry, ModelRegistry, ModelStage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = InMemoryRegistry::new();
//! registry.create_version("house-price", "run-1")?;
//! registry.set_stage("house-price", 1, ModelStage::Staging, false)?;
//!
//! let outcome = promote_to_production(&mut registry, "house-price")?;
//! assert_eq!(outcome.promoted, 1);
//! assert_eq!(outcome.archived, None);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::{ModelRegistry, ModelStage, RegistryError};

/// Final state report of a completed promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionOutcome {
    /// Model the promotion applied to
    pub model_name: String,
    /// Production version that was archived (None on first promotion)
    pub archived: Option<u32>,
    /// Version now in Production
    pub promoted: u32,
}

impl std::fmt::Display for PromotionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.archived {
            Some(old) => write!(
                f,
                "{}: archived v{old}, promoted v{} to Production",
                self.model_name, self.promoted
            ),
            None => write!(
                f,
                "{}: no current Production, promoted v{} to Production",
                self.model_name, self.promoted
            ),
        }
    }
}

/// Errors from the promotion engine.
#[derive(Debug, Error)]
pub enum PromoteError {
    /// No version is in Staging; the registry was left untouched.
    #[error("no version of '{0}' is in the Staging stage")]
    NoStagingCandidate(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result type for promotion operations
pub type Result<T> = std::result::Result<T, PromoteError>;

/// Promote the newest Staging version of `name` to Production.
///
/// 1. Pick the highest-numbered Staging version; with no candidate the
///    call fails with [`PromoteError::NoStagingCandidate`] and performs
///    no writes. Other Staging versions are ignored, never demoted. An
///    unreadable registry surfaces as [`PromoteError::Registry`], never
///    as a missing candidate.
/// 2. If a Production version exists, archive the highest-numbered one.
///    An empty Production stage is the normal first-promotion case.
/// 3. Transition the candidate to Production.
///
/// Callers promoting concurrently for the same model must serialize
/// through a [`SharedRegistry`](crate::registry::SharedRegistry) so both
/// cannot observe an empty Production stage at once.
pub fn promote_to_production<R: ModelRegistry>(
    registry: &mut R,
    name: &str,
) -> Result<PromotionOutcome> {
    let staging = registry.latest_versions(name, ModelStage::Staging)?;
    let candidate = staging
        .first()
        .ok_or_else(|| PromoteError::NoStagingCandidate(name.to_string()))?
        .version;

    let production = registry.latest_versions(name, ModelStage::Production)?;
    let archived = match production.first() {
        Some(current) => {
            let retiring = current.version;
            registry.set_stage(name, retiring, ModelStage::Archived, false)?;
            Some(retiring)
        }
        // Normal first-promotion case, not an error
        None => None,
    };

    registry.set_stage(name, candidate, ModelStage::Production, false)?;

    Ok(PromotionOutcome {
        model_name: name.to_string(),
        archived,
        promoted: candidate,
    })
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::registry::InMemoryRegistry;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_at_most_one_production(ops in prop::collection::vec(0u8..3, 1..40)) {
            let mut registry = InMemoryRegistry::new();
            let mut next_run = 0u32;

            for op in ops {
                match op {
                    // Register a new version
                    0 => {
                        next_run += 1;
                        registry.create_version("m", &format!("run-{next_run}")).unwrap();
                    }
                    // Stage the newest None version, if any
                    1 => {
                        let candidate = registry
                            .latest_versions("m", ModelStage::None)
                            .unwrap()
                            .first()
                            .map(|mv| mv.version);
                        if let Some(v) = candidate {
                            registry.set_stage("m", v, ModelStage::Staging, false).unwrap();
                        }
                    }
                    // Promote
                    _ => {
                        let _ = promote_to_production(&mut registry, "m");
                    }
                }

                let in_production = registry.latest_versions("m", ModelStage::Production).unwrap();
                prop_assert!(in_production.len() <= 1);
            }
        }
    }
}
