//! Instrumented provider backend for engine behaviour tests.
//!
//! Wraps [`MemoryBackend`] and records the exact sequence of calls the
//! engine makes, which is what most orchestration assertions are about:
//! did the no-op path stay off the network, did identity run before
//! scaling, did a failure stop the run. Builder knobs inject a failure on
//! a chosen call or fire a cancellation token after one completes.

use async_trait::async_trait;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;
use warden_client::{Error, FleetBackend, IdentityUpdate, MemoryBackend, Result, ScalingUpdate};
use warden_model::{ServiceConfig, ServiceSnapshot};

/// The calls a backend can receive, for recording and matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    Create,
    Read,
    UpdateIdentity,
    UpdateScaling,
    Delete,
}

/// Backend that records every call made to it
///
/// # Example
///
/// ```rust,no_run
/// use warden_test_utils::backend::{BackendCall, RecordingBackend};
///
/// let backend = RecordingBackend::new().failing_on(BackendCall::UpdateScaling);
/// assert_eq!(backend.calls(), vec![]);
/// ```
pub struct RecordingBackend {
    inner: MemoryBackend,
    calls: Mutex<Vec<BackendCall>>,
    fail_on: Option<BackendCall>,
    cancel_after: Option<(BackendCall, CancellationToken)>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    /// Create a recording backend over an empty in-memory fleet.
    pub fn new() -> Self {
        Self {
            inner: MemoryBackend::new(),
            calls: Mutex::new(Vec::new()),
            fail_on: None,
            cancel_after: None,
        }
    }

    /// Make the given call fail with an injected transport error.
    ///
    /// The call is still recorded, but the inner fleet is not touched.
    pub fn failing_on(mut self, call: BackendCall) -> Self {
        self.fail_on = Some(call);
        self
    }

    /// Fire `token` after the given call completes successfully.
    ///
    /// Models a cancellation request arriving while a call is in flight:
    /// the call itself finishes, and the engine should stop before the
    /// next one.
    pub fn cancelling_after(mut self, call: BackendCall, token: CancellationToken) -> Self {
        self.cancel_after = Some((call, token));
        self
    }

    /// Insert a service under a known id, without recording a call.
    pub async fn seed(&self, snapshot: ServiceSnapshot) {
        self.inner.seed(snapshot).await;
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    fn record(&self, call: BackendCall) -> Result<()> {
        self.calls.lock().expect("call log poisoned").push(call);
        if self.fail_on == Some(call) {
            return Err(Error::transport("injected failure"));
        }
        Ok(())
    }

    fn after(&self, call: BackendCall) {
        if let Some((target, token)) = &self.cancel_after
            && *target == call
        {
            token.cancel();
        }
    }
}

#[async_trait]
impl FleetBackend for RecordingBackend {
    async fn create_service(&self, config: &ServiceConfig) -> Result<ServiceSnapshot> {
        self.record(BackendCall::Create)?;
        let snapshot = self.inner.create_service(config).await?;
        self.after(BackendCall::Create);
        Ok(snapshot)
    }

    async fn read_service(&self, id: &str) -> Result<ServiceSnapshot> {
        self.record(BackendCall::Read)?;
        let snapshot = self.inner.read_service(id).await?;
        self.after(BackendCall::Read);
        Ok(snapshot)
    }

    async fn update_identity(&self, id: &str, update: &IdentityUpdate) -> Result<ServiceSnapshot> {
        self.record(BackendCall::UpdateIdentity)?;
        let snapshot = self.inner.update_identity(id, update).await?;
        self.after(BackendCall::UpdateIdentity);
        Ok(snapshot)
    }

    async fn update_scaling(&self, id: &str, update: &ScalingUpdate) -> Result<ServiceSnapshot> {
        self.record(BackendCall::UpdateScaling)?;
        let snapshot = self.inner.update_scaling(id, update).await?;
        self.after(BackendCall::UpdateScaling);
        Ok(snapshot)
    }

    async fn delete_service(&self, id: &str) -> Result<()> {
        self.record(BackendCall::Delete)?;
        self.inner.delete_service(id).await?;
        self.after(BackendCall::Delete);
        Ok(())
    }
}
