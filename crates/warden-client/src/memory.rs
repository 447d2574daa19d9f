//! In-memory fleet backend
//!
//! Keeps every service in a process-local map. Useful wherever a real
//! provider is unavailable or unwanted: unit tests, integration tests, and
//! the CLI's local apply mode all run against this backend. Its behavior is
//! the contract a real backend is expected to honor, so the quirks below
//! (tolerant removes, upserting adds) are deliberate.

use crate::backend::FleetBackend;
use crate::error::{Error, Result};
use crate::types::{IdentityUpdate, ScalingUpdate};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;
use warden_model::{ServiceConfig, ServiceSnapshot};

/// Fleet held entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    services: Mutex<HashMap<String, ServiceConfig>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a service under a known id, replacing any previous entry
    ///
    /// Lets callers reconstruct remote state they already know about, e.g.
    /// from a recorded snapshot, without going through `create_service` and
    /// its id assignment.
    pub async fn seed(&self, snapshot: ServiceSnapshot) {
        self.services
            .lock()
            .await
            .insert(snapshot.id, snapshot.config);
    }

    /// Number of services currently held
    pub async fn len(&self) -> usize {
        self.services.lock().await.len()
    }

    /// True if no services are held
    pub async fn is_empty(&self) -> bool {
        self.services.lock().await.is_empty()
    }
}

#[async_trait]
impl FleetBackend for MemoryBackend {
    async fn create_service(&self, config: &ServiceConfig) -> Result<ServiceSnapshot> {
        let issues = config.validate();
        if let Some(issue) = issues.first() {
            return Err(Error::rejected(issue.to_string()));
        }

        let id = Uuid::new_v4().to_string();
        self.services
            .lock()
            .await
            .insert(id.clone(), config.clone());
        Ok(ServiceSnapshot::new(id, config.clone()))
    }

    async fn read_service(&self, id: &str) -> Result<ServiceSnapshot> {
        let services = self.services.lock().await;
        let config = services.get(id).ok_or_else(|| Error::not_found(id))?;
        Ok(ServiceSnapshot::new(id, config.clone()))
    }

    async fn update_identity(&self, id: &str, update: &IdentityUpdate) -> Result<ServiceSnapshot> {
        let mut services = self.services.lock().await;
        let config = services.get_mut(id).ok_or_else(|| Error::not_found(id))?;

        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(Error::rejected("name must not be empty"));
            }
            config.name = name.clone();
        }

        if let Some(delta) = &update.access {
            // Removes are tolerant: dropping a source that is already gone
            // is not an error. Adds upsert: re-adding an existing source
            // replaces its description.
            config
                .access_rules
                .retain(|rule| !delta.removed.contains(&rule.source));
            for rule in &delta.added {
                match config
                    .access_rules
                    .iter_mut()
                    .find(|r| r.source == rule.source)
                {
                    Some(existing) => existing.description = rule.description.clone(),
                    None => config.access_rules.push(rule.clone()),
                }
            }
        }

        Ok(ServiceSnapshot::new(id, config.clone()))
    }

    async fn update_scaling(&self, id: &str, update: &ScalingUpdate) -> Result<ServiceSnapshot> {
        let mut services = self.services.lock().await;
        let config = services.get_mut(id).ok_or_else(|| Error::not_found(id))?;

        // Build the result on a copy so a rejection leaves the stored
        // config exactly as it was.
        let mut next = config.clone();
        if let Some(idle_scaling) = update.idle_scaling {
            next.idle_scaling = idle_scaling;
        }
        if let Some(min) = update.min_total_memory_gb {
            next.min_total_memory_gb = min;
        }
        if let Some(max) = update.max_total_memory_gb {
            next.max_total_memory_gb = max;
        }
        if let Some(timeout) = update.idle_timeout_minutes {
            next.idle_timeout_minutes = timeout;
        }
        if next.min_total_memory_gb > next.max_total_memory_gb {
            return Err(Error::rejected(format!(
                "min_total_memory_gb {} exceeds max_total_memory_gb {}",
                next.min_total_memory_gb, next.max_total_memory_gb
            )));
        }

        *config = next.clone();
        Ok(ServiceSnapshot::new(id, next))
    }

    async fn delete_service(&self, id: &str) -> Result<()> {
        let mut services = self.services.lock().await;
        services
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::not_found(id))
    }
}
