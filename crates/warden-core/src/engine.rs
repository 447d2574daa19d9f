//! Reconciliation engine
//!
//! The [`Reconciler`] turns a desired configuration into provider calls:
//! create when nothing exists yet, otherwise the minimal set of updates the
//! plan demands. Updates within one run are strictly sequential (identity
//! first, then scaling) and a failure stops the run where it stands, with
//! the error carrying what was already applied. Nothing is rolled back.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::{Error, RemoteCall, Result};
use crate::plan::{ChangePlan, plan_update};
use warden_client::FleetBackend;
use warden_model::{ServiceConfig, ServiceSnapshot};

/// Options for a reconcile run
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Cooperative stop signal, checked before each provider call.
    /// A call already in flight is always awaited, never torn down.
    pub cancel: Option<CancellationToken>,
}

/// How a reconcile run changed the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStatus {
    /// No service existed; one was provisioned
    Created,
    /// At least one update call was applied
    Updated,
    /// Observed state already matched; no call was made
    Unchanged,
}

/// Result of a successful reconcile run
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOutcome {
    /// Authoritative state after the run
    pub snapshot: ServiceSnapshot,
    pub status: ReconcileStatus,
}

/// Engine that converges services onto their desired configuration
///
/// The engine owns no state of its own; every run takes the observed state
/// as input and returns the new canonical snapshot. Tracking snapshots
/// between runs is the caller's job (see [`crate::state::StateFile`]).
pub struct Reconciler {
    backend: Arc<dyn FleetBackend>,
}

impl Reconciler {
    /// Create an engine over the given provider backend
    pub fn new(backend: Arc<dyn FleetBackend>) -> Self {
        Self { backend }
    }

    /// Converge a service onto `desired`
    ///
    /// With no observed snapshot the service is created from scratch;
    /// otherwise the differences are classified and applied. See
    /// [`reconcile_with_options`](Self::reconcile_with_options) for the
    /// full semantics.
    pub async fn reconcile(
        &self,
        observed: Option<&ServiceSnapshot>,
        desired: &ServiceConfig,
    ) -> Result<ReconcileOutcome> {
        self.reconcile_with_options(observed, desired, ReconcileOptions::default())
            .await
    }

    /// Converge a service onto `desired`, with cancellation support
    ///
    /// The update path classifies the differences first and stops before
    /// any provider call if the plan violates an immutable field. A plan
    /// with nothing to do returns [`ReconcileStatus::Unchanged`] without
    /// touching the network. Otherwise updates are issued sequentially,
    /// identity before scaling, and the snapshot of the last call to run
    /// is the authoritative result.
    ///
    /// # Errors
    ///
    /// [`Error::ImmutableChange`] if the plan touches a creation-time
    /// field; [`Error::Cancelled`] if the token fires between calls;
    /// [`Error::Remote`] if a provider call fails. The latter two carry
    /// the snapshot of the last successful call so the caller can record
    /// what was actually applied.
    pub async fn reconcile_with_options(
        &self,
        observed: Option<&ServiceSnapshot>,
        desired: &ServiceConfig,
        options: ReconcileOptions,
    ) -> Result<ReconcileOutcome> {
        match observed {
            None => self.create(desired, &options).await,
            Some(snapshot) => self.update(snapshot, desired, &options).await,
        }
    }

    /// Fetch the provider's current view of a service
    pub async fn refresh(&self, id: &str) -> Result<ServiceSnapshot> {
        self.backend
            .read_service(id)
            .await
            .map_err(|source| Error::Remote {
                call: RemoteCall::Read,
                applied: None,
                source,
            })
    }

    /// Tear down a service
    pub async fn destroy(&self, id: &str) -> Result<()> {
        self.backend
            .delete_service(id)
            .await
            .map_err(|source| Error::Remote {
                call: RemoteCall::Delete,
                applied: None,
                source,
            })?;
        tracing::info!(id = %id, "Deleted service");
        Ok(())
    }

    async fn create(
        &self,
        desired: &ServiceConfig,
        options: &ReconcileOptions,
    ) -> Result<ReconcileOutcome> {
        ensure_not_cancelled(options, RemoteCall::Create, None)?;

        let snapshot = self
            .backend
            .create_service(desired)
            .await
            .map_err(|source| Error::Remote {
                call: RemoteCall::Create,
                applied: None,
                source,
            })?;
        tracing::info!(id = %snapshot.id, name = %snapshot.config.name, "Created service");

        Ok(ReconcileOutcome {
            snapshot,
            status: ReconcileStatus::Created,
        })
    }

    async fn update(
        &self,
        observed: &ServiceSnapshot,
        desired: &ServiceConfig,
        options: &ReconcileOptions,
    ) -> Result<ReconcileOutcome> {
        let plan = plan_update(&observed.config, desired)?;
        if plan.has_violations() {
            return Err(Error::ImmutableChange {
                violations: plan.violations,
            });
        }
        if plan.is_noop() {
            tracing::debug!(id = %observed.id, "Already converged, nothing to apply");
            return Ok(ReconcileOutcome {
                snapshot: observed.clone(),
                status: ReconcileStatus::Unchanged,
            });
        }

        self.issue_updates(observed, &plan, options).await
    }

    /// Issue the update calls a violation-free plan asks for
    ///
    /// Trusts the plan: immutability is not re-checked here. Each
    /// successful call's snapshot replaces the previous one, so after both
    /// categories run the scaling snapshot wins: it reflects the service
    /// with both changes applied.
    async fn issue_updates(
        &self,
        observed: &ServiceSnapshot,
        plan: &ChangePlan,
        options: &ReconcileOptions,
    ) -> Result<ReconcileOutcome> {
        let mut snapshot = observed.clone();
        let mut applied: Option<ServiceSnapshot> = None;

        if let Some(identity) = &plan.identity {
            ensure_not_cancelled(options, RemoteCall::UpdateIdentity, applied.clone())?;
            snapshot = self
                .backend
                .update_identity(&observed.id, identity)
                .await
                .map_err(|source| Error::Remote {
                    call: RemoteCall::UpdateIdentity,
                    applied: applied.clone(),
                    source,
                })?;
            tracing::info!(id = %observed.id, "Applied identity update");
            applied = Some(snapshot.clone());
        }

        if let Some(scaling) = &plan.scaling {
            ensure_not_cancelled(options, RemoteCall::UpdateScaling, applied.clone())?;
            snapshot = self
                .backend
                .update_scaling(&observed.id, scaling)
                .await
                .map_err(|source| Error::Remote {
                    call: RemoteCall::UpdateScaling,
                    applied: applied.clone(),
                    source,
                })?;
            tracing::info!(id = %observed.id, "Applied scaling update");
        }

        Ok(ReconcileOutcome {
            snapshot,
            status: ReconcileStatus::Updated,
        })
    }
}

fn ensure_not_cancelled(
    options: &ReconcileOptions,
    pending: RemoteCall,
    applied: Option<ServiceSnapshot>,
) -> Result<()> {
    if let Some(token) = &options.cancel
        && token.is_cancelled()
    {
        tracing::warn!(pending = %pending, "Reconciliation cancelled");
        return Err(Error::Cancelled { pending, applied });
    }
    Ok(())
}
