use embargo_types::{Handle, ObjectKind, ObjectRef};
use time::Date;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u64);

/// A node of the content hierarchy as fetched from the repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub name: String,
}

impl ContentObject {
    pub fn new(kind: ObjectKind, id: u64, name: impl Into<String>) -> Self {
        Self {
            id: ObjectId(id),
            kind,
            name: name.into(),
        }
    }

    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            kind: self.kind,
            id: self.id.0.to_string(),
            name: self.name.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub object: ContentObject,
    pub handle: Handle,
    /// Handle of the owning collection, if the item has one.
    pub collection: Option<Handle>,
}

impl Item {
    pub fn name(&self) -> &str {
        &self.object.name
    }
}

/// A bundle with its bitstreams, in repository order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleNode {
    pub bundle: ContentObject,
    pub bitstreams: Vec<ContentObject>,
}

/// Who a read grant is for. A grant naming nobody is malformed and gets reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Grantee {
    Person(String),
    Group(GroupId),
    Missing,
}

/// Why a stored grant cannot be taken at face value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrantDefect {
    /// A start or end date that does not parse. Such a grant is never active.
    BadDate { field: &'static str, raw: String },
    /// The grant names a person as well as a group. The group is what gets evaluated.
    PersonAndGroup { person: String },
}

impl GrantDefect {
    pub fn describe(&self) -> String {
        match self {
            GrantDefect::BadDate { field, raw } => format!("unreadable {field} date {raw:?}"),
            GrantDefect::PersonAndGroup { person } => {
                format!("names person {person} as well as a group")
            }
        }
    }
}

/// One read-permission grant on a content object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessEntry {
    pub grantee: Grantee,
    pub start: Option<Date>,
    pub end: Option<Date>,
    pub defect: Option<GrantDefect>,
}

impl AccessEntry {
    pub fn new(grantee: Grantee) -> Self {
        Self {
            grantee,
            start: None,
            end: None,
            defect: None,
        }
    }

    pub fn with_defect(mut self, defect: GrantDefect) -> Self {
        self.defect = Some(defect);
        self
    }

    pub fn starting(mut self, start: Date) -> Self {
        self.start = Some(start);
        self
    }

    pub fn ending(mut self, end: Date) -> Self {
        self.end = Some(end);
        self
    }

    /// Active on `today`: started (or no start) and not yet expired (or no end).
    pub fn is_active(&self, today: Date) -> bool {
        if self.has_unreadable_date() {
            return false;
        }
        self.start.is_none_or(|s| s <= today) && self.end.is_none_or(|e| e >= today)
    }

    pub fn has_unreadable_date(&self) -> bool {
        matches!(self.defect, Some(GrantDefect::BadDate { .. }))
    }

    /// Active on `today` and never scheduled to expire.
    pub fn is_active_open_ended(&self, today: Date) -> bool {
        self.end.is_none() && self.is_active(today)
    }

    pub fn group(&self) -> Option<GroupId> {
        match self.grantee {
            Grantee::Group(id) => Some(id),
            _ => None,
        }
    }
}

/// A directory group. Member groups are referenced by id; the graph may contain cycles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub member_groups: Vec<GroupId>,
}

impl Group {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: GroupId(id),
            name: name.into(),
            member_groups: Vec::new(),
        }
    }

    pub fn with_members(mut self, members: impl IntoIterator<Item = u64>) -> Self {
        self.member_groups = members.into_iter().map(GroupId).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn unbounded_entry_is_always_active() {
        let e = AccessEntry::new(Grantee::Group(GroupId(0)));
        assert!(e.is_active(date!(1990 - 01 - 01)));
        assert!(e.is_active_open_ended(date!(2099 - 12 - 31)));
    }

    #[test]
    fn start_and_end_are_inclusive() {
        let e = AccessEntry::new(Grantee::Group(GroupId(0)))
            .starting(date!(2024 - 01 - 10))
            .ending(date!(2024 - 01 - 20));
        assert!(!e.is_active(date!(2024 - 01 - 09)));
        assert!(e.is_active(date!(2024 - 01 - 10)));
        assert!(e.is_active(date!(2024 - 01 - 20)));
        assert!(!e.is_active(date!(2024 - 01 - 21)));
        assert!(!e.is_active_open_ended(date!(2024 - 01 - 15)));
    }

    #[test]
    fn unreadable_date_is_never_active() {
        let e = AccessEntry::new(Grantee::Group(GroupId(0))).with_defect(GrantDefect::BadDate {
            field: "start",
            raw: "someday".to_string(),
        });
        assert!(!e.is_active(date!(2024 - 01 - 15)));
        assert!(!e.is_active_open_ended(date!(2024 - 01 - 15)));

        let both = AccessEntry::new(Grantee::Group(GroupId(0))).with_defect(
            GrantDefect::PersonAndGroup {
                person: "pat".to_string(),
            },
        );
        assert!(both.is_active_open_ended(date!(2024 - 01 - 15)));
    }
}
