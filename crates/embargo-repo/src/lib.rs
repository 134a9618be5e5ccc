//! Repository adapters: discover and load an exported content snapshot.
//!
//! This crate is allowed to do filesystem IO. It never writes to the snapshot.

#![forbid(unsafe_code)]

mod discover;
mod dto;
mod snapshot;

pub use discover::discover_item_files;
pub use snapshot::SnapshotRepo;

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    /// Parse arbitrary text as an item file and convert every grant it holds.
    pub fn parse_item(text: &str) -> anyhow::Result<()> {
        let item: crate::dto::ItemDto = serde_json::from_str(text)?;
        let bundles = item.bundles.iter();
        let grants = item
            .policies
            .iter()
            .chain(bundles.clone().flat_map(|b| b.policies.iter()))
            .chain(bundles.flat_map(|b| b.bitstreams.iter().flat_map(|bs| bs.policies.iter())));
        for policy in grants {
            let _ = crate::snapshot::to_entry(policy);
        }
        Ok(())
    }

    /// Parse arbitrary text as a `groups.json` file.
    pub fn parse_groups(text: &str) -> anyhow::Result<()> {
        let _: Vec<crate::dto::GroupDto> = serde_json::from_str(text)?;
        Ok(())
    }
}
