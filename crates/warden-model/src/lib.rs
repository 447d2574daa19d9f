//! Configuration model for Service Warden
//!
//! This crate defines the value objects shared by every layer of the
//! workspace:
//!
//! - [`ServiceConfig`]: a complete configuration of a managed database
//!   service, used both for the desired state (declared by the operator)
//!   and the observed state (read back from the provider)
//! - [`AccessRule`] / [`AccessRuleDelta`]: the network access-list entries
//!   and the add/remove delta applied to them
//! - [`ServiceSnapshot`]: the canonical state of a service as returned by
//!   the provider after a create or update call
//! - [`ValidationIssue`]: manifest-level validation findings
//!
//! All types here are plain immutable values: they are constructed fresh
//! from caller input or a provider response and never mutated in place.

pub mod service;
pub mod validate;

pub use service::{AccessRule, AccessRuleDelta, ServiceConfig, ServiceSnapshot};
pub use validate::ValidationIssue;
