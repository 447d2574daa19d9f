//! Update payloads sent through a backend
//!
//! Every field is optional: `None` means "leave this attribute alone", so a
//! payload carries exactly the attributes that changed and nothing else.
//! Serialized forms omit absent fields for the same reason.

use serde::{Deserialize, Serialize};
use warden_model::AccessRuleDelta;

/// Changes to a service's name and access list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityUpdate {
    /// New display name, if it changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Access-list additions and removals, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessRuleDelta>,
}

impl IdentityUpdate {
    /// True if the payload would change nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.access.as_ref().is_none_or(|a| a.is_empty())
    }
}

/// Changes to a service's scaling attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_scaling: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_total_memory_gb: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_total_memory_gb: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_timeout_minutes: Option<i64>,
}

impl ScalingUpdate {
    /// True if the payload would change nothing
    pub fn is_empty(&self) -> bool {
        self.idle_scaling.is_none()
            && self.min_total_memory_gb.is_none()
            && self.max_total_memory_gb.is_none()
            && self.idle_timeout_minutes.is_none()
    }
}
