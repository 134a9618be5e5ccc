//! Pure embargo policy evaluation.
//!
//! Input: an item plus the collaborator traits that fetch its bundle tree, read policies,
//! and group memberships.
//! Output: findings + validity + summary data.

#![forbid(unsafe_code)]

pub mod groups;
pub mod model;
pub mod policy;
pub mod reconcile;
pub mod report;
pub mod snapshot;
pub mod source;
pub mod terms;
pub mod tier;
pub mod visibility;

mod checks;
mod engine;
mod fingerprint;
mod generation;

pub use engine::{AuditError, Auditor};
pub use generation::Generation;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
