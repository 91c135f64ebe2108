//! Serving configuration
//!
//! Startup-time configuration resolved from the process environment.
//! Missing credentials are a fatal configuration error, surfaced before
//! any request is served, never per request.

use std::path::PathBuf;

use thiserror::Error;

/// Environment variable holding the registry bearer token.
pub const TOKEN_VAR: &str = "SERVIR_TRACKING_TOKEN";
/// Environment variable overriding the registry directory.
pub const REGISTRY_DIR_VAR: &str = "SERVIR_REGISTRY_DIR";
/// Environment variable overriding the artifact directory.
pub const ARTIFACT_DIR_VAR: &str = "SERVIR_ARTIFACT_DIR";

/// Configuration errors. All fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{TOKEN_VAR} environment variable is not set")]
    MissingToken,
}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Serving configuration.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Opaque bearer token for the tracking backend
    pub token: String,
    /// Directory holding registry documents
    pub registry_dir: PathBuf,
    /// Directory holding run artifacts
    pub artifact_dir: PathBuf,
}

impl ServeConfig {
    /// Load configuration from the process environment.
    ///
    /// The token is required; directories fall back to `./registry` and
    /// `./artifacts`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_VAR).map_err(|_| ConfigError::MissingToken)?;
        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }

        let registry_dir = std::env::var(REGISTRY_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("registry"));
        let artifact_dir = std::env::var(ARTIFACT_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("artifacts"));

        Ok(Self {
            token,
            registry_dir,
            artifact_dir,
        })
    }

    /// Build a config with an explicit token (tests, embedding callers).
    pub fn with_token(token: &str) -> Self {
        Self {
            token: token.to_string(),
            registry_dir: PathBuf::from("registry"),
            artifact_dir: PathBuf::from("artifacts"),
        }
    }

    /// Override the registry directory.
    pub fn with_registry_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.registry_dir = dir.into();
        self
    }

    /// Override the artifact directory.
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }
}
