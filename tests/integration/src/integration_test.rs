//! End-to-end integration test for the convergence flow
//!
//! Exercises the complete path: manifest loading -> planning -> reconcile
//! against an in-memory provider -> state recorded on disk.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use warden_client::MemoryBackend;
use warden_core::{Manifest, ReconcileStatus, Reconciler, StateFile, plan_update};
use warden_model::AccessRule;
use warden_test_utils::TestWorkspace;

fn load_manifest(workspace: &TestWorkspace) -> Manifest {
    Manifest::load(&workspace.manifest_path())
        .unwrap()
        .validated()
        .unwrap()
}

#[tokio::test]
async fn first_reconcile_creates_the_service_and_records_state() {
    let workspace = TestWorkspace::new();
    workspace.write_sample_manifest();
    let manifest = load_manifest(&workspace);

    let backend = Arc::new(MemoryBackend::new());
    let engine = Reconciler::new(backend.clone());

    let outcome = engine.reconcile(None, &manifest.service).await.unwrap();
    assert_eq!(outcome.status, ReconcileStatus::Created);
    assert_eq!(outcome.snapshot.config, manifest.service);
    assert_eq!(backend.len().await, 1);

    let mut state = StateFile::load_or_new(&workspace.state_path()).unwrap();
    state.record(&outcome.snapshot);
    state.save(&workspace.state_path()).unwrap();

    let reloaded = StateFile::load(&workspace.state_path()).unwrap();
    let snapshot = reloaded.snapshot().unwrap();
    assert_eq!(snapshot.id, outcome.snapshot.id);
    assert_eq!(snapshot.config, manifest.service);
}

#[tokio::test]
async fn full_convergence_cycle() {
    let workspace = TestWorkspace::new();
    workspace.write_sample_manifest();

    // 1. Load and validate the manifest
    let manifest = load_manifest(&workspace);

    // 2. First reconcile provisions the service
    let backend = Arc::new(MemoryBackend::new());
    let engine = Reconciler::new(backend.clone());
    let outcome = engine.reconcile(None, &manifest.service).await.unwrap();
    assert_eq!(outcome.status, ReconcileStatus::Created);

    // 3. Record what was applied
    let mut state = StateFile::load_or_new(&workspace.state_path()).unwrap();
    state.record(&outcome.snapshot);
    state.save(&workspace.state_path()).unwrap();

    // 4. Re-planning against the recorded state finds nothing to do
    let observed = StateFile::load(&workspace.state_path())
        .unwrap()
        .snapshot()
        .unwrap();
    let plan = plan_update(&observed.config, &manifest.service).unwrap();
    assert!(plan.is_noop());

    // 5. Edit the desired config: open an office range, raise the ceiling
    let mut desired = manifest.service.clone();
    desired
        .access_rules
        .push(AccessRule::new("203.0.113.0/24", "office"));
    desired.max_total_memory_gb = 720;

    let plan = plan_update(&observed.config, &desired).unwrap();
    assert!(plan.identity.is_some());
    assert!(plan.scaling.is_some());

    // 6. Reconcile converges the provider onto the edits
    let outcome = engine.reconcile(Some(&observed), &desired).await.unwrap();
    assert_eq!(outcome.status, ReconcileStatus::Updated);
    assert_eq!(outcome.snapshot.config, desired);

    // 7. The provider's own view agrees with the reported snapshot
    let remote = engine.refresh(&observed.id).await.unwrap();
    assert_eq!(remote.config, desired);

    // 8. Recording again carries the new settings into the state file
    state.record(&outcome.snapshot);
    state.save(&workspace.state_path()).unwrap();
    assert!(workspace.read_state().contains("203.0.113.0/24"));
    assert!(workspace.read_state().contains("max_total_memory_gb = 720"));
}

#[tokio::test]
async fn destroy_then_recreate_gets_a_fresh_identity() {
    let workspace = TestWorkspace::new();
    workspace.write_sample_manifest();
    let manifest = load_manifest(&workspace);

    let backend = Arc::new(MemoryBackend::new());
    let engine = Reconciler::new(backend.clone());

    let first = engine.reconcile(None, &manifest.service).await.unwrap();
    engine.destroy(&first.snapshot.id).await.unwrap();
    assert!(backend.is_empty().await);

    let second = engine.reconcile(None, &manifest.service).await.unwrap();
    assert_eq!(second.status, ReconcileStatus::Created);
    assert_ne!(second.snapshot.id, first.snapshot.id);
}

#[tokio::test]
async fn refresh_surfaces_changes_made_behind_our_back() {
    let workspace = TestWorkspace::new();
    workspace.write_sample_manifest();
    let manifest = load_manifest(&workspace);

    let backend = Arc::new(MemoryBackend::new());
    let engine = Reconciler::new(backend.clone());
    let outcome = engine.reconcile(None, &manifest.service).await.unwrap();

    // Someone renames the service outside of this workflow.
    let mut drifted = manifest.service.clone();
    drifted.name = "analytics-renamed".to_string();
    backend
        .seed(warden_model::ServiceSnapshot::new(
            outcome.snapshot.id.clone(),
            drifted.clone(),
        ))
        .await;

    let remote = engine.refresh(&outcome.snapshot.id).await.unwrap();
    assert_eq!(remote.config, drifted);

    // Planning against the refreshed view schedules the rename back.
    let plan = plan_update(&remote.config, &manifest.service).unwrap();
    let identity = plan.identity.expect("rename should be planned");
    assert_eq!(identity.name.as_deref(), Some("analytics"));
}
