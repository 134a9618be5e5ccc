use crate::discover::discover_item_files;
use crate::dto::{GroupDto, ItemDto, ItemHeader, PolicyDto};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use embargo_domain::groups::GroupGraph;
use embargo_domain::model::{
    AccessEntry, BundleNode, ContentObject, GrantDefect, Grantee, Group, GroupId, Item,
};
use embargo_domain::source::{ContentSource, GroupDirectory, SourceError, SourceResult};
use embargo_domain::terms::parse_metadata_date;
use embargo_types::{Handle, ObjectKind};
use serde::Deserialize;
use std::collections::BTreeMap;

struct ItemRecord {
    item: Item,
    /// `Err` holds why the item file could not be loaded past its header.
    content: Result<ItemContent, String>,
}

struct ItemContent {
    bundles: Vec<BundleNode>,
    embargo_terms: Option<String>,
    available: Option<String>,
}

/// A repository snapshot loaded into memory.
///
/// Item files are checked for valid JSON and a handle when the snapshot is opened. An item
/// whose body does not match the expected shape is still listed, and fails only when read.
pub struct SnapshotRepo {
    root: Utf8PathBuf,
    groups: GroupGraph,
    items: BTreeMap<Handle, ItemRecord>,
    policies: BTreeMap<u64, Vec<PolicyDto>>,
    /// Item object ids whose file failed to load, with the reason.
    unreadable: BTreeMap<u64, String>,
}

impl SnapshotRepo {
    pub fn open(root: &Utf8Path) -> anyhow::Result<Self> {
        let groups_path = root.join("groups.json");
        let text = std::fs::read_to_string(&groups_path)
            .with_context(|| format!("read {groups_path}"))?;
        let groups: Vec<GroupDto> =
            serde_json::from_str(&text).with_context(|| format!("parse {groups_path}"))?;
        let groups = GroupGraph::new(
            groups
                .into_iter()
                .map(|g| Group::new(g.id, g.name).with_members(g.members)),
        );

        let mut repo = Self {
            root: root.to_path_buf(),
            groups,
            items: BTreeMap::new(),
            policies: BTreeMap::new(),
            unreadable: BTreeMap::new(),
        };

        for path in discover_item_files(root).context("discover item files")? {
            let text = std::fs::read_to_string(&path).with_context(|| format!("read {path}"))?;
            let value: serde_json::Value =
                serde_json::from_str(&text).with_context(|| format!("parse {path}"))?;
            let header =
                ItemHeader::deserialize(&value).with_context(|| format!("parse {path}"))?;
            let rel = path.strip_prefix(root).unwrap_or(path.as_path());
            repo.add_item(header, value, rel)
                .with_context(|| format!("load {path}"))?;
        }

        Ok(repo)
    }

    fn add_item(
        &mut self,
        header: ItemHeader,
        value: serde_json::Value,
        rel: &Utf8Path,
    ) -> anyhow::Result<()> {
        let handle = Handle::new(&header.handle);
        anyhow::ensure!(
            !handle.as_str().is_empty(),
            "item {} has an empty handle",
            header.id
        );
        anyhow::ensure!(
            !self.items.contains_key(&handle),
            "duplicate item handle {handle}"
        );

        let dto = match serde_json::from_value::<ItemDto>(value) {
            Ok(dto) => dto,
            Err(err) => {
                let reason = format!("{rel}: {err}");
                tracing::debug!(%handle, %reason, "item file does not load");
                self.unreadable.insert(header.id, reason.clone());
                let item = Item {
                    object: ContentObject::new(ObjectKind::Item, header.id, handle.to_string()),
                    handle: handle.clone(),
                    collection: None,
                };
                self.items.insert(
                    handle,
                    ItemRecord {
                        item,
                        content: Err(reason),
                    },
                );
                return Ok(());
            }
        };

        let name = dto.name.unwrap_or_else(|| handle.to_string());
        self.add_policies(dto.id, dto.policies)?;

        let mut bundles = Vec::with_capacity(dto.bundles.len());
        for b in dto.bundles {
            self.add_policies(b.id, b.policies)?;
            let mut bitstreams = Vec::with_capacity(b.bitstreams.len());
            for bs in b.bitstreams {
                self.add_policies(bs.id, bs.policies)?;
                bitstreams.push(ContentObject::new(ObjectKind::Bitstream, bs.id, bs.name));
            }
            bundles.push(BundleNode {
                bundle: ContentObject::new(ObjectKind::Bundle, b.id, b.name),
                bitstreams,
            });
        }

        let item = Item {
            object: ContentObject::new(ObjectKind::Item, dto.id, name),
            handle: handle.clone(),
            collection: dto.collection.as_deref().map(Handle::new),
        };
        self.items.insert(
            handle,
            ItemRecord {
                item,
                content: Ok(ItemContent {
                    bundles,
                    embargo_terms: dto.embargo_terms,
                    available: dto.date_available.or(dto.date_accessioned),
                }),
            },
        );
        Ok(())
    }

    fn add_policies(&mut self, object_id: u64, policies: Vec<PolicyDto>) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.policies.contains_key(&object_id),
            "duplicate object id {object_id}"
        );
        self.policies.insert(object_id, policies);
        Ok(())
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// All items, sorted by handle.
    pub fn items(&self) -> Vec<Item> {
        self.items.values().map(|r| r.item.clone()).collect()
    }

    /// Items named by `handles`, in the given order. An empty selection means every item.
    pub fn select(&self, handles: &[Handle]) -> anyhow::Result<Vec<Item>> {
        if handles.is_empty() {
            return Ok(self.items());
        }
        handles
            .iter()
            .map(|h| {
                self.items
                    .get(h)
                    .map(|r| r.item.clone())
                    .with_context(|| format!("item not found: {h}"))
            })
            .collect()
    }

    fn content_for(&self, item: &Item) -> SourceResult<&ItemContent> {
        let record = self
            .items
            .get(&item.handle)
            .ok_or_else(|| SourceError::ItemNotFound(item.handle.clone()))?;
        record
            .content
            .as_ref()
            .map_err(|reason| SourceError::Repository(reason.clone()))
    }
}

/// Malformed grants are kept and flagged. An unreadable date wins over a doubled grantee.
pub(crate) fn to_entry(p: &PolicyDto) -> AccessEntry {
    let mut entry = match (p.group, &p.person) {
        (Some(id), Some(person)) => {
            AccessEntry::new(Grantee::Group(GroupId(id))).with_defect(GrantDefect::PersonAndGroup {
                person: person.clone(),
            })
        }
        (Some(id), None) => AccessEntry::new(Grantee::Group(GroupId(id))),
        (None, Some(person)) => AccessEntry::new(Grantee::Person(person.clone())),
        (None, None) => AccessEntry::new(Grantee::Missing),
    };

    for (field, raw) in [("start", &p.start), ("end", &p.end)] {
        let Some(raw) = raw.as_deref() else {
            continue;
        };
        match parse_metadata_date(raw) {
            Some(d) if field == "start" => entry.start = Some(d),
            Some(d) => entry.end = Some(d),
            None => {
                entry.defect = Some(GrantDefect::BadDate {
                    field,
                    raw: raw.to_string(),
                })
            }
        }
    }
    entry
}

impl ContentSource for SnapshotRepo {
    fn bundle_tree(&self, item: &Item) -> SourceResult<Vec<BundleNode>> {
        Ok(self.content_for(item)?.bundles.clone())
    }

    fn read_policies(&self, object: &ContentObject) -> SourceResult<Vec<AccessEntry>> {
        if let Some(reason) = self.unreadable.get(&object.id.0) {
            return Err(SourceError::Repository(reason.clone()));
        }
        let Some(policies) = self.policies.get(&object.id.0) else {
            return Err(SourceError::Repository(format!(
                "no such object: {}",
                object.object_ref()
            )));
        };
        Ok(policies.iter().map(to_entry).collect())
    }

    fn declared_embargo_value(&self, item: &Item) -> SourceResult<Option<String>> {
        Ok(self.content_for(item)?.embargo_terms.clone())
    }

    fn available_date(&self, item: &Item) -> SourceResult<Option<String>> {
        Ok(self.content_for(item)?.available.clone())
    }
}

impl GroupDirectory for SnapshotRepo {
    fn resolve_group(&self, id: GroupId) -> SourceResult<Option<Group>> {
        self.groups.resolve_group(id)
    }
}
