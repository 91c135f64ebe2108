//! Registry error types

use thiserror::Error;

use super::stage::ModelStage;

/// Registry errors.
///
/// Querying an unknown model name is not an error; stage queries return
/// an empty list. Errors cover mutations on missing versions, illegal
/// stage transitions, and persistence failures.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("version not found: {0} v{1}")]
    VersionNotFound(String, u32),

    #[error("invalid stage transition from {0} to {1} for {2} v{3}")]
    InvalidTransition(ModelStage, ModelStage, String, u32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
