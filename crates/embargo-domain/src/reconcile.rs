//! Compare the declared embargo date with the date restricted content actually opens.

use crate::snapshot::AuditSnapshot;
use crate::tier::Tier;
use time::{Date, Duration};

/// When a restricted bitstream becomes public.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublicAccess {
    /// Anonymous READ with no start date.
    Open,
    From(Date),
    /// No Anonymous grant at all.
    Never,
}

impl std::fmt::Display for PublicAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublicAccess::Open => f.write_str("open"),
            PublicAccess::From(d) => write!(f, "{d}"),
            PublicAccess::Never => f.write_str("never"),
        }
    }
}

/// Restricted bitstreams of one item open at different times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessDateConflict {
    pub dates: Vec<PublicAccess>,
}

impl std::fmt::Display for AccessDateConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dates: Vec<String> = self.dates.iter().map(ToString::to_string).collect();
        write!(f, "restricted bitstreams disagree: {}", dates.join(", "))
    }
}

impl std::error::Error for AccessDateConflict {}

/// The public access date shared by every restricted-tier bitstream.
///
/// `Ok(None)` when the item has no restricted bitstreams.
pub fn item_public_access(
    snapshot: &AuditSnapshot,
) -> Result<Option<PublicAccess>, AccessDateConflict> {
    let mut dates: Vec<PublicAccess> = Vec::new();
    for bundle in snapshot.bundles.iter().filter(|b| b.tier == Tier::Restricted) {
        for state in &bundle.bitstreams {
            let access = match state.public_grant() {
                None => PublicAccess::Never,
                Some(grant) => grant.start.map_or(PublicAccess::Open, PublicAccess::From),
            };
            if !dates.contains(&access) {
                dates.push(access);
            }
        }
    }

    match dates.len() {
        0 => Ok(None),
        1 => Ok(dates.pop()),
        _ => Err(AccessDateConflict { dates }),
    }
}

/// Equal, or at most one day apart.
pub fn dates_close(a: Date, b: Date) -> bool {
    (a - b).abs() <= Duration::days(1)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reconciliation {
    InSync,
    OutOfSync {
        embargo_date: Option<Date>,
        public_access: PublicAccess,
    },
    Conflict(AccessDateConflict),
}

pub fn reconcile(snapshot: &AuditSnapshot) -> Reconciliation {
    let access = match item_public_access(snapshot) {
        Ok(Some(access)) => access,
        Ok(None) => return Reconciliation::InSync,
        Err(conflict) => return Reconciliation::Conflict(conflict),
    };
    let embargo_date = snapshot.terms.date();
    let today = snapshot.today;
    // An embargo date or access start already in the past both mean "open now".
    let opened = |d: Date| d <= today;

    let in_sync = match (embargo_date, access) {
        (_, PublicAccess::Never) => false,
        (Some(m), PublicAccess::From(a)) => dates_close(m, a) || (opened(m) && opened(a)),
        (Some(m), PublicAccess::Open) => opened(m),
        (None, PublicAccess::From(a)) => opened(a),
        (None, PublicAccess::Open) => true,
    };

    if in_sync {
        Reconciliation::InSync
    } else {
        Reconciliation::OutOfSync {
            embargo_date,
            public_access: access,
        }
    }
}
