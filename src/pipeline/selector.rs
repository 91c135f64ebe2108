//! Version selectors and model URIs

use std::str::FromStr;

use crate::registry::{ModelRegistry, ModelStage, ModelVersion};

use super::error::{PredictError, Result};

/// How the pipeline picks the model version to serve.
///
/// Resolution is a pure function of the selector and a registry
/// snapshot; no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSelector {
    /// A pinned version number
    Explicit(u32),
    /// The newest version at a stage (normally Production)
    Symbolic(ModelStage),
}

impl VersionSelector {
    /// Shorthand for the common "current Production" selector.
    pub fn production() -> Self {
        VersionSelector::Symbolic(ModelStage::Production)
    }

    /// Resolve against a registry snapshot.
    ///
    /// An empty Production stage fails with
    /// [`PredictError::NoProductionVersion`]; other empty symbolic
    /// stages fail with [`PredictError::NoVersionInStage`].
    pub fn resolve<R: ModelRegistry>(&self, registry: &R, name: &str) -> Result<ModelVersion> {
        match *self {
            VersionSelector::Explicit(version) => Ok(registry.get_version(name, version)?),
            VersionSelector::Symbolic(stage) => registry
                .latest_versions(name, stage)?
                .into_iter()
                .next()
                .ok_or_else(|| match stage {
                    ModelStage::Production => PredictError::NoProductionVersion(name.to_string()),
                    other => PredictError::NoVersionInStage(name.to_string(), other),
                }),
        }
    }
}

/// URI-like model reference, as written in run logs and load calls:
///
/// - `runs:/<run_id>/<artifact_path>` - a direct artifact-store reference
/// - `models:/<model_name>/<version>` - a registry reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelUri {
    /// Direct run reference, bypassing the registry
    Runs { run_id: String, path: String },
    /// Registry reference by name and version
    Models { name: String, version: u32 },
}

impl FromStr for ModelUri {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(rest) = s.strip_prefix("runs:/") {
            let (run_id, path) = rest.split_once('/').ok_or_else(|| {
                PredictError::Prediction(format!("malformed runs URI: {s}"))
            })?;
            if run_id.is_empty() || path.is_empty() {
                return Err(PredictError::Prediction(format!("malformed runs URI: {s}")));
            }
            return Ok(ModelUri::Runs {
                run_id: run_id.to_string(),
                path: path.to_string(),
            });
        }

        if let Some(rest) = s.strip_prefix("models:/") {
            let (name, version) = rest.rsplit_once('/').ok_or_else(|| {
                PredictError::Prediction(format!("malformed models URI: {s}"))
            })?;
            let version: u32 = version.parse().map_err(|_| {
                PredictError::Prediction(format!("non-numeric version in models URI: {s}"))
            })?;
            if name.is_empty() {
                return Err(PredictError::Prediction(format!("malformed models URI: {s}")));
            }
            return Ok(ModelUri::Models {
                name: name.to_string(),
                version,
            });
        }

        Err(PredictError::Prediction(format!(
            "unsupported model URI scheme: {s}"
        )))
    }
}

impl std::fmt::Display for ModelUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelUri::Runs { run_id, path } => write!(f, "runs:/{run_id}/{path}"),
            ModelUri::Models { name, version } => write!(f, "models:/{name}/{version}"),
        }
    }
}
