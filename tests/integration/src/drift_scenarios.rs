//! Scenario tests for the reconcile engine against an instrumented backend
//!
//! Each scenario drifts the observed service away from the desired config in
//! a particular way, then asserts exactly which provider calls the engine
//! makes and what it reports when a call fails or is cancelled mid-run.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;
use warden_core::{Error, ImmutableField, ReconcileOptions, ReconcileStatus, Reconciler, RemoteCall};
use warden_model::ServiceSnapshot;
use warden_test_utils::{BackendCall, RecordingBackend, sample_config, sample_config_with_rules};

async fn seeded(backend: RecordingBackend) -> (Arc<RecordingBackend>, ServiceSnapshot) {
    let snapshot = ServiceSnapshot::new("svc-under-test", sample_config());
    backend.seed(snapshot.clone()).await;
    (Arc::new(backend), snapshot)
}

#[tokio::test]
async fn converged_service_triggers_no_remote_calls() {
    let (backend, observed) = seeded(RecordingBackend::new()).await;
    let engine = Reconciler::new(backend.clone());

    let outcome = engine
        .reconcile(Some(&observed), &sample_config())
        .await
        .unwrap();

    assert_eq!(outcome.status, ReconcileStatus::Unchanged);
    assert_eq!(outcome.snapshot, observed);
    assert_eq!(backend.calls(), vec![]);
}

#[tokio::test]
async fn renaming_touches_only_the_identity_endpoint() {
    let (backend, observed) = seeded(RecordingBackend::new()).await;
    let engine = Reconciler::new(backend.clone());

    let mut desired = sample_config();
    desired.name = "analytics-v2".to_string();

    let outcome = engine.reconcile(Some(&observed), &desired).await.unwrap();

    assert_eq!(outcome.status, ReconcileStatus::Updated);
    assert_eq!(outcome.snapshot.config.name, "analytics-v2");
    assert_eq!(backend.calls(), vec![BackendCall::UpdateIdentity]);
}

#[tokio::test]
async fn rescaling_touches_only_the_scaling_endpoint() {
    let (backend, observed) = seeded(RecordingBackend::new()).await;
    let engine = Reconciler::new(backend.clone());

    let mut desired = sample_config();
    desired.min_total_memory_gb = 48;

    let outcome = engine.reconcile(Some(&observed), &desired).await.unwrap();

    assert_eq!(outcome.status, ReconcileStatus::Updated);
    assert_eq!(outcome.snapshot.config.min_total_memory_gb, 48);
    assert_eq!(backend.calls(), vec![BackendCall::UpdateScaling]);
}

#[tokio::test]
async fn identity_always_lands_before_scaling() {
    let (backend, observed) = seeded(RecordingBackend::new()).await;
    let engine = Reconciler::new(backend.clone());

    let mut desired = sample_config();
    desired.name = "analytics-v2".to_string();
    desired.max_total_memory_gb = 720;

    let outcome = engine.reconcile(Some(&observed), &desired).await.unwrap();

    assert_eq!(outcome.snapshot.config, desired);
    assert_eq!(
        backend.calls(),
        vec![BackendCall::UpdateIdentity, BackendCall::UpdateScaling]
    );
}

#[tokio::test]
async fn scaling_failure_reports_what_already_landed() {
    let (backend, observed) =
        seeded(RecordingBackend::new().failing_on(BackendCall::UpdateScaling)).await;
    let engine = Reconciler::new(backend.clone());

    let mut desired = sample_config();
    desired.name = "analytics-v2".to_string();
    desired.max_total_memory_gb = 720;

    let err = engine.reconcile(Some(&observed), &desired).await.unwrap_err();

    match err {
        Error::Remote { call, applied, .. } => {
            assert_eq!(call, RemoteCall::UpdateScaling);
            let applied = applied.expect("the identity snapshot should be reported");
            assert_eq!(applied.config.name, "analytics-v2");
            // The failed scaling call left the old ceiling in place.
            assert_eq!(applied.config.max_total_memory_gb, 360);
        }
        other => panic!("expected a remote failure, got {other:?}"),
    }

    assert_eq!(
        backend.calls(),
        vec![BackendCall::UpdateIdentity, BackendCall::UpdateScaling]
    );
}

#[tokio::test]
async fn identity_failure_means_nothing_was_applied() {
    let (backend, observed) =
        seeded(RecordingBackend::new().failing_on(BackendCall::UpdateIdentity)).await;
    let engine = Reconciler::new(backend.clone());

    let mut desired = sample_config();
    desired.name = "analytics-v2".to_string();

    let err = engine.reconcile(Some(&observed), &desired).await.unwrap_err();

    match err {
        Error::Remote { call, applied, .. } => {
            assert_eq!(call, RemoteCall::UpdateIdentity);
            assert_eq!(applied, None);
        }
        other => panic!("expected a remote failure, got {other:?}"),
    }

    assert_eq!(backend.calls(), vec![BackendCall::UpdateIdentity]);
}

#[tokio::test]
async fn cancellation_between_calls_stops_before_the_next_one() {
    let token = CancellationToken::new();
    let (backend, observed) = seeded(
        RecordingBackend::new().cancelling_after(BackendCall::UpdateIdentity, token.clone()),
    )
    .await;
    let engine = Reconciler::new(backend.clone());

    let mut desired = sample_config();
    desired.name = "analytics-v2".to_string();
    desired.max_total_memory_gb = 720;

    let options = ReconcileOptions {
        cancel: Some(token),
    };
    let err = engine
        .reconcile_with_options(Some(&observed), &desired, options)
        .await
        .unwrap_err();

    match err {
        Error::Cancelled { pending, applied } => {
            assert_eq!(pending, RemoteCall::UpdateScaling);
            // The in-flight identity call completed before the stop.
            assert_eq!(applied.unwrap().config.name, "analytics-v2");
        }
        other => panic!("expected cancellation, got {other:?}"),
    }

    assert_eq!(backend.calls(), vec![BackendCall::UpdateIdentity]);
}

#[tokio::test]
async fn already_cancelled_token_blocks_the_first_call() {
    let (backend, observed) = seeded(RecordingBackend::new()).await;
    let engine = Reconciler::new(backend.clone());

    let mut desired = sample_config();
    desired.name = "analytics-v2".to_string();

    let token = CancellationToken::new();
    token.cancel();
    let options = ReconcileOptions {
        cancel: Some(token),
    };

    let err = engine
        .reconcile_with_options(Some(&observed), &desired, options)
        .await
        .unwrap_err();

    match err {
        Error::Cancelled { pending, applied } => {
            assert_eq!(pending, RemoteCall::UpdateIdentity);
            assert_eq!(applied, None);
        }
        other => panic!("expected cancellation, got {other:?}"),
    }

    assert_eq!(backend.calls(), vec![]);
}

#[tokio::test]
async fn immutable_drift_aborts_with_every_violation_reported() {
    let (backend, observed) = seeded(RecordingBackend::new()).await;
    let engine = Reconciler::new(backend.clone());

    let mut desired = sample_config();
    desired.cloud_provider = "gcp".to_string();
    desired.region = "europe-west4".to_string();
    desired.tier = "development".to_string();
    desired.name = "analytics-v2".to_string();

    let err = engine.reconcile(Some(&observed), &desired).await.unwrap_err();

    match err {
        Error::ImmutableChange { violations } => {
            let fields: Vec<ImmutableField> = violations.iter().map(|v| v.field).collect();
            assert_eq!(
                fields,
                vec![
                    ImmutableField::CloudProvider,
                    ImmutableField::Region,
                    ImmutableField::Tier
                ]
            );
        }
        other => panic!("expected immutable-change abort, got {other:?}"),
    }

    assert_eq!(backend.calls(), vec![]);
}

#[tokio::test]
async fn create_failure_surfaces_as_a_create_error() {
    let backend = Arc::new(RecordingBackend::new().failing_on(BackendCall::Create));
    let engine = Reconciler::new(backend.clone());

    let err = engine.reconcile(None, &sample_config()).await.unwrap_err();

    match err {
        Error::Remote { call, applied, .. } => {
            assert_eq!(call, RemoteCall::Create);
            assert_eq!(applied, None);
        }
        other => panic!("expected a remote failure, got {other:?}"),
    }

    assert_eq!(backend.calls(), vec![BackendCall::Create]);
}

#[tokio::test]
async fn duplicate_observed_rules_fail_before_any_call() {
    let rules = vec![
        warden_model::AccessRule::new("198.51.100.7/32", "first"),
        warden_model::AccessRule::new("198.51.100.7/32", "second"),
    ];
    let snapshot = ServiceSnapshot::new("svc-under-test", sample_config_with_rules(rules));

    let backend = RecordingBackend::new();
    backend.seed(snapshot.clone()).await;
    let backend = Arc::new(backend);
    let engine = Reconciler::new(backend.clone());

    let err = engine
        .reconcile(Some(&snapshot), &sample_config())
        .await
        .unwrap_err();

    match err {
        Error::Diff(warden_diff::Error::DuplicateKey { side, key }) => {
            assert_eq!(side, warden_diff::Side::Observed);
            assert_eq!(key, "198.51.100.7/32");
        }
        other => panic!("expected a duplicate-key failure, got {other:?}"),
    }

    assert_eq!(backend.calls(), vec![]);
}
