//! Service configuration value objects
//!
//! A [`ServiceConfig`] describes one managed database service. The same type
//! carries both the desired state (parsed from a manifest) and the observed
//! state (embedded in a [`ServiceSnapshot`] returned by the provider), so the
//! planner can compare the two field by field.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete configuration of a managed database service
///
/// `cloud_provider`, `region`, and `tier` are fixed at creation time; the
/// provider does not support changing them on a live service. Everything
/// else can be updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Display name of the service
    pub name: String,
    /// Cloud provider the service runs on (e.g., "aws", "gcp")
    pub cloud_provider: String,
    /// Provider region (e.g., "us-east-2")
    pub region: String,
    /// Service tier (e.g., "development", "production")
    pub tier: String,
    /// Whether the service scales to zero when idle
    pub idle_scaling: bool,
    /// Minimum total memory across replicas, in GB
    pub min_total_memory_gb: i64,
    /// Maximum total memory across replicas, in GB
    pub max_total_memory_gb: i64,
    /// Minutes of inactivity before idling (when `idle_scaling` is set)
    pub idle_timeout_minutes: i64,
    /// Network access list; sources must be unique
    #[serde(default)]
    pub access_rules: Vec<AccessRule>,
}

impl ServiceConfig {
    /// Compare the access-rule attribute of two configurations as a set
    ///
    /// Rule order carries no meaning: two configurations are equivalent in
    /// this attribute iff they contain the same sources with the same
    /// descriptions, regardless of sequence. Callers are expected to have
    /// validated source uniqueness first (see [`crate::validate`]).
    pub fn same_access_rules(&self, other: &ServiceConfig) -> bool {
        fn by_source(rules: &[AccessRule]) -> HashMap<&str, &str> {
            rules
                .iter()
                .map(|r| (r.source.as_str(), r.description.as_str()))
                .collect()
        }
        by_source(&self.access_rules) == by_source(&other.access_rules)
    }
}

/// One entry in a service's network access list
///
/// The `source` (a CIDR block or provider-specific identifier) is the
/// natural key of the entry: it is unique within a configuration and is
/// what add/remove operations are keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRule {
    /// CIDR block or identifier granted access
    pub source: String,
    /// Free-text note about the rule
    #[serde(default)]
    pub description: String,
}

impl AccessRule {
    /// Create a rule from a source and description
    pub fn new(source: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            description: description.into(),
        }
    }
}

/// Additions and removals to apply to a service's access list
///
/// `added` holds full rules to create; `removed` holds only the source keys
/// of rules to drop, since the source alone identifies an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessRuleDelta {
    /// Rules to add, in declaration order
    #[serde(default)]
    pub added: Vec<AccessRule>,
    /// Source keys of rules to remove, in observed order
    #[serde(default)]
    pub removed: Vec<String>,
}

impl AccessRuleDelta {
    /// True if the delta would change nothing
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Canonical state of a service as reported by the provider
///
/// Snapshots are returned by every create and update call and represent the
/// authoritative remote state at that moment. They are never mutated; a
/// newer snapshot simply replaces an older one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSnapshot {
    /// Provider-assigned service id
    pub id: String,
    /// Full configuration as the provider reports it
    pub config: ServiceConfig,
}

impl ServiceSnapshot {
    /// Create a snapshot from an id and configuration
    pub fn new(id: impl Into<String>, config: ServiceConfig) -> Self {
        Self {
            id: id.into(),
            config,
        }
    }
}
