use crate::generation::Generation;
use crate::groups::GroupGraph;
use crate::model::{AccessEntry, BundleNode, ContentObject, Grantee, Group, GroupId, Item};
use crate::policy::{CheckPolicy, DateWindow, EffectiveConfig, FailOn, RoleConfig};
use crate::source::{ContentSource, SourceError, SourceResult};
use crate::tier::BundleTiers;
use crate::visibility::ObjectState;
use embargo_types::{ids, Handle, ObjectKind, Severity};
use std::collections::BTreeMap;
use time::macros::date;
use time::Date;

pub const CAMPUS_GROUP: u64 = 2;

/// Anonymous (0), Administrator (1) and the campus-only group (2).
pub fn directory() -> GroupGraph {
    GroupGraph::new([
        Group::new(0, "Anonymous"),
        Group::new(1, "Administrator"),
        Group::new(CAMPUS_GROUP, "Campus only"),
    ])
}

pub fn anon() -> AccessEntry {
    AccessEntry::new(Grantee::Group(GroupId(0)))
}

pub fn admins() -> AccessEntry {
    AccessEntry::new(Grantee::Group(GroupId(1)))
}

pub fn campus() -> AccessEntry {
    AccessEntry::new(Grantee::Group(GroupId(CAMPUS_GROUP)))
}

pub fn object_with(kind: ObjectKind, entries: Vec<AccessEntry>, today: Date) -> ObjectState {
    let object = ContentObject::new(kind, 1, format!("{kind:?}").to_lowercase());
    ObjectState::from_entries(object, entries, &directory(), &RoleConfig::default(), today)
        .expect("in-memory directory never fails")
}

pub fn config() -> EffectiveConfig {
    let mut checks = BTreeMap::new();
    for id in [
        ids::CHECK_EMBARGO_ITEM_PUBLIC,
        ids::CHECK_EMBARGO_PUBLIC_BUNDLE,
        ids::CHECK_EMBARGO_VISIBLE_BUNDLE,
        ids::CHECK_EMBARGO_CAMPUS_AVAILABILITY,
        ids::CHECK_EMBARGO_PROTECTION,
        ids::CHECK_EMBARGO_PUBLIC_ACCESS_DATE,
    ] {
        checks.insert(id.to_string(), CheckPolicy::enabled(Severity::Error));
    }
    for id in [
        ids::CHECK_EMBARGO_TERMS,
        ids::CHECK_POLICY_GRANTS,
        ids::CHECK_EMBARGO_AVAILABILITY_DATE,
    ] {
        checks.insert(id.to_string(), CheckPolicy::enabled(Severity::Warning));
    }

    EffectiveConfig {
        profile: "strict".to_string(),
        generation: Generation::ProtectedWhileEmbargoed,
        fail_on: FailOn::Error,
        max_findings: 200,
        roles: RoleConfig::default(),
        bundles: BundleTiers::default(),
        open_sentinel: Some("open".to_string()),
        max_embargo_years: 2,
        grandfather: Some(DateWindow {
            from: date!(2014 - 02 - 01),
            until: date!(2016 - 10 - 01),
        }),
        checks,
    }
}

pub fn legacy_config() -> EffectiveConfig {
    EffectiveConfig {
        profile: "legacy".to_string(),
        generation: Generation::CappedEmbargo,
        ..config()
    }
}

/// In-memory content repository keyed by object id.
#[derive(Default)]
pub struct MemorySource {
    pub directory: GroupGraph,
    pub bundles: BTreeMap<u64, Vec<BundleNode>>,
    pub policies: BTreeMap<u64, Vec<AccessEntry>>,
    pub terms: BTreeMap<u64, String>,
    pub available: BTreeMap<u64, String>,
    pub fail_bundles: bool,
}

impl MemorySource {
    pub fn new() -> Self {
        Self {
            directory: directory(),
            ..Self::default()
        }
    }

    pub fn bundle(&mut self, item: &Item, id: u64, name: &str, entries: Vec<AccessEntry>) -> ContentObject {
        let bundle = ContentObject::new(ObjectKind::Bundle, id, name);
        self.policies.insert(id, entries);
        self.bundles.entry(item.object.id.0).or_default().push(BundleNode {
            bundle: bundle.clone(),
            bitstreams: Vec::new(),
        });
        bundle
    }

    pub fn bitstream(&mut self, bundle: &ContentObject, id: u64, name: &str, entries: Vec<AccessEntry>) {
        self.policies.insert(id, entries);
        let node = self
            .bundles
            .values_mut()
            .flatten()
            .find(|n| n.bundle.id == bundle.id)
            .expect("bundle registered");
        node.bitstreams
            .push(ContentObject::new(ObjectKind::Bitstream, id, name));
    }

    pub fn set_terms(&mut self, item: &Item, terms: &str) {
        self.terms.insert(item.object.id.0, terms.to_string());
    }

    pub fn set_available(&mut self, item: &Item, available: &str) {
        self.available.insert(item.object.id.0, available.to_string());
    }
}

pub fn item(source: &mut MemorySource, id: u64, handle: &str, entries: Vec<AccessEntry>) -> Item {
    source.policies.insert(id, entries);
    Item {
        object: ContentObject::new(ObjectKind::Item, id, format!("Item {handle}")),
        handle: Handle::new(handle),
        collection: Some(Handle::new("1794/1")),
    }
}

impl ContentSource for MemorySource {
    fn bundle_tree(&self, item: &Item) -> SourceResult<Vec<BundleNode>> {
        if self.fail_bundles {
            return Err(SourceError::Repository("bundle table unavailable".to_string()));
        }
        Ok(self
            .bundles
            .get(&item.object.id.0)
            .cloned()
            .unwrap_or_default())
    }

    fn read_policies(&self, object: &ContentObject) -> SourceResult<Vec<AccessEntry>> {
        Ok(self.policies.get(&object.id.0).cloned().unwrap_or_default())
    }

    fn declared_embargo_value(&self, item: &Item) -> SourceResult<Option<String>> {
        Ok(self.terms.get(&item.object.id.0).cloned())
    }

    fn available_date(&self, item: &Item) -> SourceResult<Option<String>> {
        Ok(self.available.get(&item.object.id.0).cloned())
    }
}
