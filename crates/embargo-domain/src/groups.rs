//! Group membership resolution over a possibly cyclic group graph.

use crate::model::{Group, GroupId};
use crate::source::{GroupDirectory, SourceResult};
use std::collections::{BTreeMap, BTreeSet};

/// Identifies a distinguished role: by group id, or by group name for configured groups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoleMatcher {
    Id(GroupId),
    Name(String),
}

impl RoleMatcher {
    fn matches(&self, group: &Group) -> bool {
        match self {
            RoleMatcher::Id(id) => group.id == *id,
            RoleMatcher::Name(name) => group.name == *name,
        }
    }
}

/// Result of one traversal. `unresolved` lists ids the directory did not know.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Membership {
    pub matched: bool,
    pub unresolved: BTreeSet<GroupId>,
}

/// Walk `start` and its sub-groups depth-first, looking for `role`.
///
/// Each group id is visited at most once, so cycles terminate. An absent start group has no
/// role. Ids the directory cannot resolve are treated as absent and collected.
pub fn resolve_membership<D: GroupDirectory + ?Sized>(
    directory: &D,
    start: Option<GroupId>,
    role: &RoleMatcher,
) -> SourceResult<Membership> {
    let mut out = Membership::default();
    let Some(start) = start else {
        return Ok(out);
    };

    let mut visited: BTreeSet<GroupId> = BTreeSet::new();
    let mut stack = vec![start];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        if role == &RoleMatcher::Id(id) {
            out.matched = true;
            return Ok(out);
        }
        let Some(group) = directory.resolve_group(id)? else {
            out.unresolved.insert(id);
            continue;
        };
        if role.matches(&group) {
            out.matched = true;
            return Ok(out);
        }
        // Reverse so sub-groups are explored in declaration order.
        for sub in group.member_groups.iter().rev() {
            if !visited.contains(sub) {
                stack.push(*sub);
            }
        }
    }

    Ok(out)
}

/// True if `group` is, or transitively contains, `role`.
pub fn has_role<D: GroupDirectory + ?Sized>(
    directory: &D,
    group: Option<GroupId>,
    role: &RoleMatcher,
) -> SourceResult<bool> {
    Ok(resolve_membership(directory, group, role)?.matched)
}

/// In-memory group arena. Infallible directory used by snapshots and tests.
#[derive(Clone, Debug, Default)]
pub struct GroupGraph {
    groups: BTreeMap<GroupId, Group>,
}

impl GroupGraph {
    pub fn new(groups: impl IntoIterator<Item = Group>) -> Self {
        Self {
            groups: groups.into_iter().map(|g| (g.id, g)).collect(),
        }
    }

    pub fn insert(&mut self, group: Group) {
        self.groups.insert(group.id, group);
    }

    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl GroupDirectory for GroupGraph {
    fn resolve_group(&self, id: GroupId) -> SourceResult<Option<Group>> {
        Ok(self.groups.get(&id).cloned())
    }
}
