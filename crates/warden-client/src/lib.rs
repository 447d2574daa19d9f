//! Provider backend abstraction for Service Warden
//!
//! Defines [`FleetBackend`], the seam between the reconciliation engine and
//! whatever actually hosts the services, together with the narrow update
//! payloads the engine sends through it. Ships one implementation,
//! [`MemoryBackend`], which holds a fleet in process memory; it backs the
//! test suites and local dry-run workflows, and doubles as the reference
//! for how a real backend should behave.

pub mod backend;
pub mod error;
pub mod memory;
pub mod types;

pub use backend::FleetBackend;
pub use error::{Error, Result};
pub use memory::MemoryBackend;
pub use types::{IdentityUpdate, ScalingUpdate};
