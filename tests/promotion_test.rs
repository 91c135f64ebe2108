//! End-to-end promotion workflow tests

use servir::promote::{promote_to_production, PromoteError};
use servir::registry::{
    InMemoryRegistry, JsonFileRegistry, ModelRegistry, ModelStage, SharedRegistry,
};

#[test]
fn test_promotion_archives_v1_and_promotes_v2() {
    let mut registry = InMemoryRegistry::new();

    // Version 1 already in Production
    registry.create_version("house-price", "run-1").unwrap();
    registry.set_stage("house-price", 1, ModelStage::Staging, false).unwrap();
    registry.set_stage("house-price", 1, ModelStage::Production, false).unwrap();

    // Version 2 created and staged
    registry.create_version("house-price", "run-2").unwrap();
    registry.set_stage("house-price", 2, ModelStage::Staging, false).unwrap();

    let outcome = promote_to_production(&mut registry, "house-price").unwrap();
    assert_eq!(outcome.archived, Some(1));
    assert_eq!(outcome.promoted, 2);

    let production = registry
        .latest_versions("house-price", ModelStage::Production)
        .unwrap();
    assert_eq!(production.len(), 1);
    assert_eq!(production[0].version, 2);

    assert_eq!(
        registry.get_version("house-price", 1).unwrap().stage,
        ModelStage::Archived
    );
}

#[test]
fn test_first_promotion_has_nothing_to_archive() {
    let mut registry = InMemoryRegistry::new();
    registry.create_version("house-price", "run-1").unwrap();
    registry.set_stage("house-price", 1, ModelStage::Staging, false).unwrap();

    let outcome = promote_to_production(&mut registry, "house-price").unwrap();
    assert_eq!(outcome.archived, None);
    assert_eq!(outcome.promoted, 1);
}

#[test]
fn test_repeat_promotion_is_a_reported_noop() {
    let mut registry = InMemoryRegistry::new();
    registry.create_version("house-price", "run-1").unwrap();
    registry.set_stage("house-price", 1, ModelStage::Staging, false).unwrap();
    promote_to_production(&mut registry, "house-price").unwrap();

    let snapshot = registry.list_versions("house-price").unwrap();
    let history_len = registry.transition_history("house-price").unwrap().len();

    let second = promote_to_production(&mut registry, "house-price");
    assert!(matches!(second, Err(PromoteError::NoStagingCandidate(_))));

    // Registry state unchanged by the failed call
    assert_eq!(registry.list_versions("house-price").unwrap(), snapshot);
    assert_eq!(
        registry.transition_history("house-price").unwrap().len(),
        history_len
    );
}

#[test]
fn test_promotion_through_file_registry() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut registry = JsonFileRegistry::new(dir.path());

    registry.create_version("house-price", "run-1").unwrap();
    registry.set_stage("house-price", 1, ModelStage::Staging, false).unwrap();
    registry.set_stage("house-price", 1, ModelStage::Production, false).unwrap();
    registry.create_version("house-price", "run-2").unwrap();
    registry.set_stage("house-price", 2, ModelStage::Staging, false).unwrap();

    let outcome = promote_to_production(&mut registry, "house-price").unwrap();
    assert_eq!(outcome.archived, Some(1));
    assert_eq!(outcome.promoted, 2);

    // Both sub-transitions landed in the persisted audit log
    let history = registry.transition_history("house-price").unwrap();
    let last_two: Vec<_> = history.iter().rev().take(2).collect();
    assert_eq!(last_two[1].to_stage, ModelStage::Archived);
    assert_eq!(last_two[0].to_stage, ModelStage::Production);
}

#[test]
fn test_concurrent_promotions_keep_single_production() {
    // Both threads promote the same model; the shared lock serializes
    // them so one wins and the other reports NoStagingCandidate.
    let shared = SharedRegistry::new(InMemoryRegistry::new());
    {
        let mut setup = shared.clone();
        setup.create_version("house-price", "run-1").unwrap();
        setup.set_stage("house-price", 1, ModelStage::Staging, false).unwrap();
    }

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let registry = shared.clone();
            std::thread::spawn(move || {
                registry.with(|r| promote_to_production(r, "house-price"))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let production = shared
        .latest_versions("house-price", ModelStage::Production)
        .unwrap();
    assert_eq!(production.len(), 1);
}

#[test]
fn test_promotion_on_corrupt_store_surfaces_registry_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut registry = JsonFileRegistry::new(dir.path());
    registry.create_version("house-price", "run-1").unwrap();
    registry.set_stage("house-price", 1, ModelStage::Staging, false).unwrap();

    // A staged candidate exists, but the document is no longer readable;
    // the engine must report the read failure, not a missing candidate.
    std::fs::write(dir.path().join("house-price.json"), "{not json").unwrap();

    let result = promote_to_production(&mut registry, "house-price");
    assert!(matches!(result, Err(PromoteError::Registry(_))));
}
