//! Loaded (scaler, mapping, model) artifact triples

use std::collections::HashMap;
use std::sync::Arc;

use crate::artifact::{ArtifactStore, COLUMNS_ARTIFACT, MODEL_ARTIFACT, SCALER_ARTIFACT};
use crate::registry::{ModelRegistry, ModelVersion};

use super::error::{PredictError, Result};
use super::mapping::ColumnMapping;
use super::model::LinearModel;
use super::scaler::StandardScaler;
use super::selector::{ModelUri, VersionSelector};

/// A resolved, immutable preprocessing + model pair for one version.
///
/// The scaler and the model were fit together in one training run; the
/// registry's `run_id` back-reference is what keeps them paired. Once
/// loaded, the pair is immutable and a prediction is a pure function of
/// the input features.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictivePair {
    /// Model this pair serves
    pub model_name: String,
    /// Registered version number (0 for direct run references)
    pub version: u32,
    /// Run that produced the artifacts
    pub run_id: String,
    scaler: StandardScaler,
    mapping: ColumnMapping,
    model: LinearModel,
}

fn fetch_json<S: ArtifactStore, T: serde::de::DeserializeOwned>(
    store: &S,
    run_id: &str,
    name: &str,
) -> Result<T> {
    let bytes = store
        .get(run_id, name)
        .map_err(|e| PredictError::ArtifactUnavailable(e.to_string()))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| PredictError::InvalidArtifact(format!("{name} for run {run_id}: {e}")))
}

impl PredictivePair {
    /// Assemble a pair from already-validated parts (fixtures, tests).
    pub fn from_parts(
        model_name: &str,
        version: u32,
        run_id: &str,
        scaler: StandardScaler,
        mapping: ColumnMapping,
        model: LinearModel,
    ) -> Self {
        Self {
            model_name: model_name.to_string(),
            version,
            run_id: run_id.to_string(),
            scaler,
            mapping,
            model,
        }
    }

    /// Resolve a version through the registry and load its artifact
    /// triple from the store.
    pub fn load<R, S>(
        registry: &R,
        store: &S,
        model_name: &str,
        selector: &VersionSelector,
    ) -> Result<Self>
    where
        R: ModelRegistry,
        S: ArtifactStore,
    {
        let resolved = selector.resolve(registry, model_name)?;
        Self::load_resolved(store, &resolved)
    }

    /// Load the artifact triple for an already-resolved version.
    pub fn load_resolved<S: ArtifactStore>(store: &S, version: &ModelVersion) -> Result<Self> {
        Self::load_run(
            store,
            &version.name,
            version.version,
            &version.run_id,
        )
    }

    /// Load from a model URI. `models:/` goes through the registry;
    /// `runs:/` reads the artifact store directly.
    pub fn load_uri<R, S>(registry: &R, store: &S, uri: &ModelUri) -> Result<Self>
    where
        R: ModelRegistry,
        S: ArtifactStore,
    {
        match uri {
            ModelUri::Models { name, version } => {
                Self::load(registry, store, name, &VersionSelector::Explicit(*version))
            }
            ModelUri::Runs { run_id, path } => Self::load_run(store, path, 0, run_id),
        }
    }

    fn load_run<S: ArtifactStore>(
        store: &S,
        model_name: &str,
        version: u32,
        run_id: &str,
    ) -> Result<Self> {
        let scaler: StandardScaler = fetch_json(store, run_id, SCALER_ARTIFACT)?;
        scaler.validate()?;
        let mapping: ColumnMapping = fetch_json(store, run_id, COLUMNS_ARTIFACT)?;
        let model: LinearModel = fetch_json(store, run_id, MODEL_ARTIFACT)?;
        model.validate()?;

        Ok(Self {
            model_name: model_name.to_string(),
            version,
            run_id: run_id.to_string(),
            scaler,
            mapping,
            model,
        })
    }

    /// Produce a prediction from ordered named features.
    ///
    /// Validates the feature schema, applies the stored scaling, renames
    /// scaler columns to model columns, and runs inference. Every
    /// failure surfaces as a typed [`PredictError`].
    pub fn predict(&self, features: &[(String, f64)]) -> Result<f64> {
        let raw = self.scaler.check_schema(features)?;
        let scaled = self.scaler.transform(&raw);
        let renamed = self
            .mapping
            .rename(&self.scaler.columns, &scaled, &self.model.columns)?;
        self.model.predict_row(&renamed)
    }

    /// The feature names a caller must supply, in order.
    pub fn feature_names(&self) -> &[String] {
        &self.scaler.columns
    }
}

/// Process-wide load-once cache of predictive pairs.
///
/// Keyed by `(model name, version)`. The working set is a single active
/// version per model, so there is no eviction; promotion invalidates the
/// model's entries explicitly.
#[derive(Debug, Default)]
pub struct PairCache {
    entries: HashMap<(String, u32), Arc<PredictivePair>>,
}

impl PairCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a cached pair, or load and cache it.
    pub fn get_or_load<R, S>(
        &mut self,
        registry: &R,
        store: &S,
        model_name: &str,
        selector: &VersionSelector,
    ) -> Result<Arc<PredictivePair>>
    where
        R: ModelRegistry,
        S: ArtifactStore,
    {
        // Resolve first so a symbolic selector and the explicit version
        // it points at share one cache entry.
        let resolved = selector.resolve(registry, model_name)?;
        let key = (resolved.name.clone(), resolved.version);

        if let Some(pair) = self.entries.get(&key) {
            return Ok(Arc::clone(pair));
        }

        let pair = Arc::new(PredictivePair::load_resolved(store, &resolved)?);
        self.entries.insert(key, Arc::clone(&pair));
        Ok(pair)
    }

    /// Drop every cached version of a model. Called on promotion so the
    /// next request resolves the new Production version.
    pub fn invalidate(&mut self, model_name: &str) {
        self.entries.retain(|(name, _), _| name != model_name);
    }

    /// Number of cached pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::InMemoryStore;
    use crate::registry::{InMemoryRegistry, ModelStage};
    use approx::assert_abs_diff_eq;

    fn seed_run(store: &mut InMemoryStore, run_id: &str) {
        let scaler = StandardScaler::new(
            vec!["MedInc".into(), "HouseAge".into(), "AveRooms".into()],
            vec![3.87, 28.6, 5.4],
            vec![1.9, 12.6, 2.5],
        )
        .unwrap();
        let mapping = ColumnMapping::new(vec![
            ("MedInc".into(), "median_income".into()),
            ("HouseAge".into(), "housing_median_age".into()),
            ("AveRooms".into(), "total_rooms".into()),
        ]);
        let model = LinearModel::new(
            vec![
                "housing_median_age".into(),
                "total_rooms".into(),
                "median_income".into(),
            ],
            vec![0.2, 0.3, 1.1],
            2.068,
        )
        .unwrap();

        store
            .put(run_id, SCALER_ARTIFACT, &serde_json::to_vec(&scaler).unwrap())
            .unwrap();
        store
            .put(run_id, COLUMNS_ARTIFACT, &serde_json::to_vec(&mapping).unwrap())
            .unwrap();
        store
            .put(run_id, MODEL_ARTIFACT, &serde_json::to_vec(&model).unwrap())
            .unwrap();
    }

    fn production_registry(run_id: &str) -> InMemoryRegistry {
        let mut registry = InMemoryRegistry::new();
        registry.create_version("house-price", run_id).unwrap();
        registry.set_stage("house-price", 1, ModelStage::Staging, false).unwrap();
        registry.set_stage("house-price", 1, ModelStage::Production, false).unwrap();
        registry
    }

    fn housing_features() -> Vec<(String, f64)> {
        vec![
            ("MedInc".into(), 8.3),
            ("HouseAge".into(), 41.0),
            ("AveRooms".into(), 6.9),
        ]
    }

    #[test]
    fn test_pair_load_production_and_predict() {
        let mut store = InMemoryStore::new();
        seed_run(&mut store, "run-1");
        let registry = production_registry("run-1");

        let pair = PredictivePair::load(
            &registry,
            &store,
            "house-price",
            &VersionSelector::production(),
        )
        .unwrap();
        assert_eq!(pair.version, 1);
        assert_eq!(pair.run_id, "run-1");

        let y = pair.predict(&housing_features()).unwrap();

        // Hand-computed: scale, rename into model order, dot, intercept
        let scaled = [
            (8.3 - 3.87) / 1.9,
            (41.0 - 28.6) / 12.6,
            (6.9 - 5.4) / 2.5,
        ];
        let expected = 2.068 + 0.2 * scaled[1] + 0.3 * scaled[2] + 1.1 * scaled[0];
        assert_abs_diff_eq!(y, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_pair_load_no_production_version() {
        let mut store = InMemoryStore::new();
        seed_run(&mut store, "run-1");
        let mut registry = InMemoryRegistry::new();
        registry.create_version("house-price", "run-1").unwrap();

        let result = PredictivePair::load(
            &registry,
            &store,
            "house-price",
            &VersionSelector::production(),
        );
        assert!(matches!(result, Err(PredictError::NoProductionVersion(_))));
    }

    #[test]
    fn test_pair_load_missing_artifact() {
        let store = InMemoryStore::new();
        let registry = production_registry("run-1");

        let result = PredictivePair::load(
            &registry,
            &store,
            "house-price",
            &VersionSelector::production(),
        );
        assert!(matches!(result, Err(PredictError::ArtifactUnavailable(_))));
    }

    #[test]
    fn test_pair_load_corrupt_artifact() {
        let mut store = InMemoryStore::new();
        store.put("run-1", SCALER_ARTIFACT, b"not json").unwrap();
        let registry = production_registry("run-1");

        let result = PredictivePair::load(
            &registry,
            &store,
            "house-price",
            &VersionSelector::production(),
        );
        assert!(matches!(result, Err(PredictError::InvalidArtifact(_))));
    }

    #[test]
    fn test_pair_predict_schema_mismatch() {
        let mut store = InMemoryStore::new();
        seed_run(&mut store, "run-1");
        let registry = production_registry("run-1");
        let pair = PredictivePair::load(
            &registry,
            &store,
            "house-price",
            &VersionSelector::production(),
        )
        .unwrap();

        let short: Vec<(String, f64)> =
            vec![("MedInc".into(), 8.3), ("HouseAge".into(), 41.0)];
        let result = pair.predict(&short);
        assert!(matches!(result, Err(PredictError::FeatureSchemaMismatch { .. })));
    }

    #[test]
    fn test_pair_load_uri_runs() {
        let mut store = InMemoryStore::new();
        seed_run(&mut store, "run-9");
        let registry = InMemoryRegistry::new();

        let uri: ModelUri = "runs:/run-9/house-price".parse().unwrap();
        let pair = PredictivePair::load_uri(&registry, &store, &uri).unwrap();
        assert_eq!(pair.run_id, "run-9");
        assert_eq!(pair.version, 0);
        assert!(pair.predict(&housing_features()).is_ok());
    }

    #[test]
    fn test_pair_load_uri_models() {
        let mut store = InMemoryStore::new();
        seed_run(&mut store, "run-1");
        let registry = production_registry("run-1");

        let uri: ModelUri = "models:/house-price/1".parse().unwrap();
        let pair = PredictivePair::load_uri(&registry, &store, &uri).unwrap();
        assert_eq!(pair.version, 1);
    }

    #[test]
    fn test_cache_loads_once() {
        let mut store = InMemoryStore::new();
        seed_run(&mut store, "run-1");
        let registry = production_registry("run-1");
        let mut cache = PairCache::new();

        let first = cache
            .get_or_load(&registry, &store, "house-price", &VersionSelector::production())
            .unwrap();
        let second = cache
            .get_or_load(&registry, &store, "house-price", &VersionSelector::production())
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_symbolic_and_explicit_share_entry() {
        let mut store = InMemoryStore::new();
        seed_run(&mut store, "run-1");
        let registry = production_registry("run-1");
        let mut cache = PairCache::new();

        cache
            .get_or_load(&registry, &store, "house-price", &VersionSelector::production())
            .unwrap();
        cache
            .get_or_load(&registry, &store, "house-price", &VersionSelector::Explicit(1))
            .unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_invalidate() {
        let mut store = InMemoryStore::new();
        seed_run(&mut store, "run-1");
        let registry = production_registry("run-1");
        let mut cache = PairCache::new();

        cache
            .get_or_load(&registry, &store, "house-price", &VersionSelector::production())
            .unwrap();
        cache.invalidate("house-price");
        assert!(cache.is_empty());
    }
}
