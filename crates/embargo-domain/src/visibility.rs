//! Per-object visibility predicates.
//!
//! Each object's read entries are fetched once and classified against the three roles; the
//! predicates below are then pure functions of that classification and the audit date.

use crate::groups::resolve_membership;
use crate::model::{AccessEntry, ContentObject, GrantDefect, Grantee, GroupId};
use crate::policy::RoleConfig;
use crate::source::{ContentSource, GroupDirectory, SourceResult};
use std::collections::BTreeSet;
use time::Date;

/// Which distinguished roles one grant's grantee resolves to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrantRoles {
    pub anonymous: bool,
    pub campus: bool,
    pub administrators: bool,
    /// Display name of the granted group, when the directory knows it.
    pub group_name: Option<String>,
    /// Group ids met while resolving this grant that the directory did not know.
    pub unresolved: BTreeSet<GroupId>,
}

impl GrantRoles {
    pub fn classify<D: GroupDirectory + ?Sized>(
        entry: &AccessEntry,
        directory: &D,
        roles: &RoleConfig,
    ) -> SourceResult<Self> {
        let Some(group) = entry.group() else {
            return Ok(Self::default());
        };

        let anonymous = resolve_membership(directory, Some(group), &roles.anonymous)?;
        let campus = resolve_membership(directory, Some(group), &roles.campus)?;
        let administrators = resolve_membership(directory, Some(group), &roles.administrators)?;

        let mut unresolved = anonymous.unresolved;
        unresolved.extend(campus.unresolved);
        unresolved.extend(administrators.unresolved);

        Ok(Self {
            anonymous: anonymous.matched,
            campus: campus.matched,
            administrators: administrators.matched,
            group_name: directory.resolve_group(group)?.map(|g| g.name),
            unresolved,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Visibility {
    pub public: bool,
    pub on_campus: bool,
    pub fully_embargoed: bool,
}

impl Visibility {
    pub fn evaluate(entries: &[AccessEntry], grants: &[GrantRoles], today: Date) -> Self {
        let open_grant_to = |role: fn(&GrantRoles) -> bool| {
            entries
                .iter()
                .zip(grants)
                .any(|(e, g)| role(g) && e.is_active_open_ended(today))
        };

        let public = open_grant_to(|g| g.anonymous);
        let on_campus = public || open_grant_to(|g| g.campus);
        // Admin-only READ is the explicit "nobody but staff" signal. The grant only needs
        // to be active; an end date is allowed.
        let fully_embargoed = !public
            && !on_campus
            && entries
                .iter()
                .zip(grants)
                .any(|(e, g)| g.administrators && e.is_active(today));

        Self {
            public,
            on_campus,
            fully_embargoed,
        }
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn is_available_on_campus(&self) -> bool {
        self.on_campus
    }

    pub fn is_explicitly_fully_embargoed(&self) -> bool {
        self.fully_embargoed
    }

    pub fn is_protected(&self) -> bool {
        !self.public
    }
}

/// A content object with its read entries and derived visibility.
#[derive(Clone, Debug)]
pub struct ObjectState {
    pub object: ContentObject,
    pub entries: Vec<AccessEntry>,
    /// Parallel to `entries`.
    pub grants: Vec<GrantRoles>,
    pub visibility: Visibility,
}

impl ObjectState {
    pub fn load<S, D>(
        object: ContentObject,
        source: &S,
        directory: &D,
        roles: &RoleConfig,
        today: Date,
    ) -> SourceResult<Self>
    where
        S: ContentSource + ?Sized,
        D: GroupDirectory + ?Sized,
    {
        let entries = source.read_policies(&object)?;
        Self::from_entries(object, entries, directory, roles, today)
    }

    pub fn from_entries<D: GroupDirectory + ?Sized>(
        object: ContentObject,
        entries: Vec<AccessEntry>,
        directory: &D,
        roles: &RoleConfig,
        today: Date,
    ) -> SourceResult<Self> {
        let grants = entries
            .iter()
            .map(|e| GrantRoles::classify(e, directory, roles))
            .collect::<SourceResult<Vec<_>>>()?;
        let visibility = Visibility::evaluate(&entries, &grants, today);
        Ok(Self {
            object,
            entries,
            grants,
            visibility,
        })
    }

    /// The first grant whose grantee resolves to Anonymous, active or not. Grants with
    /// unreadable dates are skipped.
    pub fn public_grant(&self) -> Option<&AccessEntry> {
        self.entries
            .iter()
            .zip(&self.grants)
            .find(|(e, g)| g.anonymous && !e.has_unreadable_date())
            .map(|(e, _)| e)
    }

    pub fn entries_with_roles(&self) -> impl Iterator<Item = (&AccessEntry, &GrantRoles)> {
        self.entries.iter().zip(&self.grants)
    }

    /// Display label of an entry's grantee, as used in the readers trail.
    pub fn grantee_label(entry: &AccessEntry, roles: &GrantRoles) -> String {
        let label = match (&entry.grantee, &roles.group_name) {
            (Grantee::Person(name), _) => format!("{name} (person)"),
            (Grantee::Group(_), Some(name)) => format!("{name} (group)"),
            (Grantee::Group(id), None) => format!("group #{} (group)", id.0),
            (Grantee::Missing, _) => "UNKNOWN".to_string(),
        };
        match &entry.defect {
            Some(GrantDefect::PersonAndGroup { person }) => format!("{person} (person) AND {label}"),
            _ => label,
        }
    }
}
