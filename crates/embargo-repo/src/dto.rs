//! On-disk shapes of the snapshot files.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct GroupDto {
    pub id: u64,
    pub name: String,
    #[serde(default, alias = "member_groups")]
    pub members: Vec<u64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PolicyDto {
    #[serde(default)]
    pub group: Option<u64>,
    #[serde(default)]
    pub person: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BitstreamDto {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub policies: Vec<PolicyDto>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BundleDto {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub policies: Vec<PolicyDto>,
    #[serde(default)]
    pub bitstreams: Vec<BitstreamDto>,
}

/// The part of an item file needed to list the item even when the rest does not load.
#[derive(Clone, Debug, Deserialize)]
pub struct ItemHeader {
    pub id: u64,
    pub handle: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ItemDto {
    pub id: u64,
    pub handle: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub embargo_terms: Option<String>,
    #[serde(default)]
    pub date_available: Option<String>,
    #[serde(default)]
    pub date_accessioned: Option<String>,
    #[serde(default)]
    pub policies: Vec<PolicyDto>,
    #[serde(default)]
    pub bundles: Vec<BundleDto>,
}
