//! Collaborator seams: the content repository and the group directory.
//!
//! The auditor never writes through these traits. Implementations live in adapter crates
//! (see `embargo-repo`) or in tests.

use crate::model::{AccessEntry, BundleNode, ContentObject, Group, GroupId, Item};
use embargo_types::Handle;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("item not found: {0}")]
    ItemNotFound(Handle),

    #[error("content repository error: {0}")]
    Repository(String),

    #[error("group directory error: {0}")]
    Directory(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Read-only view of the content repository.
pub trait ContentSource: Send + Sync {
    /// Bundles of `item` with their bitstreams, in repository order.
    fn bundle_tree(&self, item: &Item) -> SourceResult<Vec<BundleNode>>;

    /// READ grants on `object`.
    fn read_policies(&self, object: &ContentObject) -> SourceResult<Vec<AccessEntry>>;

    /// Raw embargo-terms metadata value of `item`, if any.
    fn declared_embargo_value(&self, item: &Item) -> SourceResult<Option<String>>;

    /// Raw availability (or accession) date metadata of `item`, if any.
    fn available_date(&self, item: &Item) -> SourceResult<Option<String>>;
}

/// Group membership lookups.
pub trait GroupDirectory: Send + Sync {
    /// `Ok(None)` when the directory has no group with this id.
    fn resolve_group(&self, id: GroupId) -> SourceResult<Option<Group>>;
}
