//! Core reconciliation layer for Service Warden
//!
//! This crate turns a declared service configuration into the minimal set
//! of provider calls that converge the real service onto it, implementing:
//!
//! - **Change classification**: field-by-field comparison of observed vs
//!   desired configuration into violations, identity, and scaling buckets
//! - **Reconciliation engine**: sequential orchestration of the update
//!   calls a plan demands, with cooperative cancellation
//! - **Manifest**: the warden.toml desired-state declaration
//! - **State file**: locked, atomically-replaced record of what was last
//!   applied
//!
//! # Architecture
//!
//! `warden-core` sits above the leaf crates and below the CLI:
//!
//! ```text
//!              CLI / control loop
//!                      |
//!                 warden-core
//!                      |
//!         +------------+------------+
//!         |            |            |
//!    warden-model  warden-diff  warden-client
//! ```
//!
//! A reconcile run is pure until the engine: `plan_update` computes a
//! [`ChangePlan`] from two configurations with no I/O, and [`Reconciler`]
//! is the only component that talks to a backend.

pub mod engine;
pub mod error;
pub mod manifest;
pub mod plan;
pub mod state;

pub use engine::{ReconcileOptions, ReconcileOutcome, ReconcileStatus, Reconciler};
pub use error::{Error, RemoteCall, Result};
pub use manifest::Manifest;
pub use plan::{ChangePlan, ImmutableField, ImmutableViolation, plan_update};
pub use state::{ServiceState, StateFile};
