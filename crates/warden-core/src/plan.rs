//! Change classification between observed and desired configurations
//!
//! [`plan_update`] compares two configurations field by field and sorts
//! every difference into one of three buckets: violations (attempted edits
//! to creation-time fields), an identity update (name, access rules), or a
//! scaling update (capacity and idle parameters). The result is a pure
//! value; nothing here touches the network.

use crate::error::Result;
use std::fmt;
use warden_client::{IdentityUpdate, ScalingUpdate};
use warden_diff::diff_by_key;
use warden_model::{AccessRuleDelta, ServiceConfig};

/// Fields fixed when a service is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmutableField {
    CloudProvider,
    Region,
    Tier,
}

impl ImmutableField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImmutableField::CloudProvider => "cloud_provider",
            ImmutableField::Region => "region",
            ImmutableField::Tier => "tier",
        }
    }
}

impl fmt::Display for ImmutableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attempted change to a field that cannot change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmutableViolation {
    pub field: ImmutableField,
    pub observed: String,
    pub desired: String,
}

impl fmt::Display for ImmutableViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cannot change after creation (observed '{}', desired '{}')",
            self.field, self.observed, self.desired
        )
    }
}

/// Everything that separates an observed configuration from a desired one
///
/// `identity` and `scaling` are `None` when their category has no changes;
/// a plan with no violations and both categories absent is a no-op and
/// must not produce any provider call. Violations never suppress the other
/// buckets: the plan always reports the full picture, and it is the
/// caller's job to stop on violations before applying anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangePlan {
    /// Attempted edits to creation-time fields, in declaration order
    pub violations: Vec<ImmutableViolation>,
    /// Name and access-list changes, if any
    pub identity: Option<IdentityUpdate>,
    /// Scaling changes, if any
    pub scaling: Option<ScalingUpdate>,
}

impl ChangePlan {
    /// True if applying this plan would change nothing
    pub fn is_noop(&self) -> bool {
        self.violations.is_empty() && self.identity.is_none() && self.scaling.is_none()
    }

    /// True if the plan touches a creation-time field
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Classify the differences between an observed and a desired configuration
///
/// Immutable fields (`cloud_provider`, `region`, `tier`) are all checked
/// before anything else so the caller sees every violation at once, never
/// one per attempt. Mutable differences land in the identity or scaling
/// bucket; each optional field inside a bucket is set only if that exact
/// attribute changed. Access rules are compared as a keyed set on `source`,
/// so reordering rules is not a change. Editing only a rule's description
/// is not detected either, since membership is by key alone.
///
/// # Errors
///
/// Returns a duplicate-key error if either configuration repeats an
/// access-rule source.
pub fn plan_update(observed: &ServiceConfig, desired: &ServiceConfig) -> Result<ChangePlan> {
    let mut violations = Vec::new();
    for (field, observed_value, desired_value) in [
        (
            ImmutableField::CloudProvider,
            &observed.cloud_provider,
            &desired.cloud_provider,
        ),
        (ImmutableField::Region, &observed.region, &desired.region),
        (ImmutableField::Tier, &observed.tier, &desired.tier),
    ] {
        if observed_value != desired_value {
            violations.push(ImmutableViolation {
                field,
                observed: observed_value.clone(),
                desired: desired_value.clone(),
            });
        }
    }

    let diff = diff_by_key(&observed.access_rules, &desired.access_rules, |r| {
        &r.source
    })?;
    let access = (!diff.is_empty()).then(|| AccessRuleDelta {
        added: diff.added,
        removed: diff.removed.into_iter().map(|r| r.source).collect(),
    });
    let name = (observed.name != desired.name).then(|| desired.name.clone());
    let identity = IdentityUpdate { name, access };
    let identity = (!identity.is_empty()).then_some(identity);

    let scaling = ScalingUpdate {
        idle_scaling: (observed.idle_scaling != desired.idle_scaling)
            .then_some(desired.idle_scaling),
        min_total_memory_gb: (observed.min_total_memory_gb != desired.min_total_memory_gb)
            .then_some(desired.min_total_memory_gb),
        max_total_memory_gb: (observed.max_total_memory_gb != desired.max_total_memory_gb)
            .then_some(desired.max_total_memory_gb),
        idle_timeout_minutes: (observed.idle_timeout_minutes != desired.idle_timeout_minutes)
            .then_some(desired.idle_timeout_minutes),
    };
    let scaling = (!scaling.is_empty()).then_some(scaling);

    Ok(ChangePlan {
        violations,
        identity,
        scaling,
    })
}
