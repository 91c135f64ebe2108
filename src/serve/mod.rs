//! Serving boundary
//!
//! Collaborator-facing request/response surface for prediction serving.
//! The HTTP adapter itself lives outside this crate; what ships here is
//! the contract it calls into: an ordered set of named numeric features
//! in, a numeric prediction or an error string out, no other response
//! shape. Per-request failures never cross this boundary as panics.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactStore;
use crate::pipeline::{PairCache, VersionSelector};
use crate::promote::{self, PromotionOutcome, Result as PromoteResult};
use crate::registry::{ModelRegistry, SharedRegistry};

/// One named numeric feature value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub value: f64,
}

/// Prediction request: a fixed-arity ordered list of named features,
/// optionally pinned to an explicit version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Features in schema order
    pub features: Vec<Feature>,
    /// Pin a version instead of resolving current Production
    pub version: Option<u32>,
}

/// Prediction response: a number or an error string, nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Whether the request was successful
    pub success: bool,
    /// Prediction (if successful)
    pub prediction: Option<f64>,
    /// Error message (if failed)
    pub error: Option<String>,
}

impl PredictResponse {
    /// Create success response
    pub fn success(prediction: f64) -> Self {
        Self {
            success: true,
            prediction: Some(prediction),
            error: None,
        }
    }

    /// Create error response
    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            prediction: None,
            error: Some(message.to_string()),
        }
    }
}

/// Shared serving state for one model: registry handle, artifact store,
/// and the load-once pair cache.
#[derive(Debug)]
pub struct ServeState<R: ModelRegistry, S: ArtifactStore> {
    registry: SharedRegistry<R>,
    store: S,
    cache: Mutex<PairCache>,
    model_name: String,
}

impl<R: ModelRegistry, S: ArtifactStore> ServeState<R, S> {
    /// Build serving state for `model_name`.
    pub fn new(registry: SharedRegistry<R>, store: S, model_name: &str) -> Self {
        Self {
            registry,
            store,
            cache: Mutex::new(PairCache::new()),
            model_name: model_name.to_string(),
        }
    }

    /// The model this state serves.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Handle one prediction request.
    ///
    /// Resolves current Production unless the request pins a version,
    /// serving from the pair cache when possible. Every pipeline failure
    /// is converted to an error response here.
    pub fn handle_predict(&self, request: &PredictRequest) -> PredictResponse {
        let selector = match request.version {
            Some(version) => VersionSelector::Explicit(version),
            None => VersionSelector::production(),
        };

        let features: Vec<(String, f64)> = request
            .features
            .iter()
            .map(|f| (f.name.clone(), f.value))
            .collect();

        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let loaded = self.registry.with(|registry| {
            cache.get_or_load(registry, &self.store, &self.model_name, &selector)
        });

        match loaded.and_then(|pair| pair.predict(&features)) {
            Ok(prediction) => PredictResponse::success(prediction),
            Err(e) => PredictResponse::error(&e.to_string()),
        }
    }

    /// Promote the newest Staging version to Production and invalidate
    /// the cache so the next request serves the new version.
    pub fn promote(&self) -> PromoteResult<PromotionOutcome> {
        let outcome = self
            .registry
            .with(|registry| promote::promote_to_production(registry, &self.model_name))?;

        self.cache
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .invalidate(&self.model_name);

        Ok(outcome)
    }
}
