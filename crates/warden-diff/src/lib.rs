//! Keyed set difference for Service Warden
//!
//! Compares two collections element-by-element on a caller-chosen key and
//! reports which elements must be added and which removed to turn one
//! collection into the other. This is the primitive behind access-list
//! reconciliation, but it is deliberately generic: any element type with a
//! string key works.

pub mod error;
pub mod keyed;

pub use error::{Error, Result, Side};
pub use keyed::{KeyedDiff, diff_by_key};
