//! FleetBackend trait

use crate::Result;
use crate::types::{IdentityUpdate, ScalingUpdate};
use async_trait::async_trait;
use warden_model::{ServiceConfig, ServiceSnapshot};

/// Operations a service provider must support
///
/// The engine drives everything through this trait and assumes nothing
/// about what sits behind it. Every mutating call returns the full snapshot
/// the provider holds after the change, which becomes the engine's new
/// authoritative view. Implementations must not apply partial updates: a
/// call either takes effect entirely or fails without effect.
#[async_trait]
pub trait FleetBackend: Send + Sync {
    /// Provision a new service from a complete configuration
    async fn create_service(&self, config: &ServiceConfig) -> Result<ServiceSnapshot>;

    /// Fetch the current state of a service
    async fn read_service(&self, id: &str) -> Result<ServiceSnapshot>;

    /// Apply name and access-list changes to an existing service
    async fn update_identity(&self, id: &str, update: &IdentityUpdate) -> Result<ServiceSnapshot>;

    /// Apply scaling changes to an existing service
    async fn update_scaling(&self, id: &str, update: &ScalingUpdate) -> Result<ServiceSnapshot>;

    /// Tear down a service
    async fn delete_service(&self, id: &str) -> Result<()>;
}
