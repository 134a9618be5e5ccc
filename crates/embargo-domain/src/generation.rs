//! Rule generations. Each generation is an ordered rule table selected by configuration.

use crate::checks;
use crate::policy::EffectiveConfig;
use crate::snapshot::AuditSnapshot;
use embargo_types::{ids, Finding};

pub(crate) type RuleFn = fn(&AuditSnapshot, &EffectiveConfig, &mut Vec<Finding>);

#[derive(Clone, Copy)]
pub(crate) struct Rule {
    pub check_id: &'static str,
    pub run: RuleFn,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Generation {
    /// Restricted content must stay protected while the declared embargo date is ahead.
    #[default]
    ProtectedWhileEmbargoed,
    /// Everything above, plus restricted content must become public within a fixed number
    /// of years of the availability date.
    CappedEmbargo,
}

const PROTECTED_WHILE_EMBARGOED: &[Rule] = &[
    Rule {
        check_id: ids::CHECK_EMBARGO_TERMS,
        run: checks::terms::run,
    },
    Rule {
        check_id: ids::CHECK_POLICY_GRANTS,
        run: checks::grants::run,
    },
    Rule {
        check_id: ids::CHECK_EMBARGO_PUBLIC_BUNDLE,
        run: checks::public_bundle::run,
    },
    Rule {
        check_id: ids::CHECK_EMBARGO_VISIBLE_BUNDLE,
        run: checks::visible_bundle::run,
    },
    Rule {
        check_id: ids::CHECK_EMBARGO_CAMPUS_AVAILABILITY,
        run: checks::campus_availability::run,
    },
    Rule {
        check_id: ids::CHECK_EMBARGO_PROTECTION,
        run: checks::protection::run,
    },
];

const CAPPED_EMBARGO: &[Rule] = &[
    Rule {
        check_id: ids::CHECK_EMBARGO_TERMS,
        run: checks::terms::run,
    },
    Rule {
        check_id: ids::CHECK_POLICY_GRANTS,
        run: checks::grants::run,
    },
    Rule {
        check_id: ids::CHECK_EMBARGO_AVAILABILITY_DATE,
        run: checks::availability_date::run,
    },
    Rule {
        check_id: ids::CHECK_EMBARGO_PUBLIC_BUNDLE,
        run: checks::public_bundle::run,
    },
    Rule {
        check_id: ids::CHECK_EMBARGO_VISIBLE_BUNDLE,
        run: checks::visible_bundle::run,
    },
    Rule {
        check_id: ids::CHECK_EMBARGO_CAMPUS_AVAILABILITY,
        run: checks::campus_availability::run,
    },
    Rule {
        check_id: ids::CHECK_EMBARGO_PROTECTION,
        run: checks::protection::run,
    },
    Rule {
        check_id: ids::CHECK_EMBARGO_PUBLIC_ACCESS_DATE,
        run: checks::public_access_date::run,
    },
];

impl Generation {
    pub const ALL: [Generation; 2] = [
        Generation::ProtectedWhileEmbargoed,
        Generation::CappedEmbargo,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Generation::ProtectedWhileEmbargoed => "protected-while-embargoed",
            Generation::CappedEmbargo => "capped-embargo",
        }
    }

    /// Accepts the generation id or its short alias (`v2`, `v1`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "protected-while-embargoed" | "v2" => Some(Generation::ProtectedWhileEmbargoed),
            "capped-embargo" | "v1" => Some(Generation::CappedEmbargo),
            _ => None,
        }
    }

    pub(crate) fn rules(self) -> &'static [Rule] {
        match self {
            Generation::ProtectedWhileEmbargoed => PROTECTED_WHILE_EMBARGOED,
            Generation::CappedEmbargo => CAPPED_EMBARGO,
        }
    }

    /// Check ids evaluated by this generation, including the item gate.
    pub fn check_ids(self) -> Vec<&'static str> {
        std::iter::once(ids::CHECK_EMBARGO_ITEM_PUBLIC)
            .chain(self.rules().iter().map(|r| r.check_id))
            .collect()
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
