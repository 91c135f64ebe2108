//! Prediction pipeline error types

use thiserror::Error;

use crate::registry::{ModelStage, RegistryError};

/// Prediction pipeline errors.
///
/// No lower-level error crosses the pipeline boundary unconverted: the
/// artifact store, the registry, artifact parsing, and inference all map
/// into one of these variants.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The symbolic "current Production" selector found nothing.
    #[error("no version of '{0}' is in the Production stage")]
    NoProductionVersion(String),

    /// A symbolic selector for a non-Production stage found nothing.
    #[error("no version of '{0}' is in the {1} stage")]
    NoVersionInStage(String, ModelStage),

    /// Caller-supplied features do not match the scaler's fit-time schema.
    #[error("feature schema mismatch: expected [{}], got [{}]",
            expected.join(", "), got.join(", "))]
    FeatureSchemaMismatch {
        expected: Vec<String>,
        got: Vec<String>,
    },

    /// Scaler-to-model column renaming failed; a configuration bug in the
    /// stored mapping, never silently worked around.
    #[error("column mapping error: {0}")]
    ColumnMapping(String),

    /// The artifact store could not supply a blob.
    #[error("artifact unavailable: {0}")]
    ArtifactUnavailable(String),

    /// A stored artifact failed to parse or is internally inconsistent.
    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Catch-all for unexpected inference failures; always carries the
    /// underlying message.
    #[error("prediction failed: {0}")]
    Prediction(String),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PredictError>;
