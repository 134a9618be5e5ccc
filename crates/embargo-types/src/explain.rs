//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_EMBARGO_ITEM_PUBLIC => Some(explain_item_public()),
        ids::CHECK_EMBARGO_TERMS => Some(explain_terms()),
        ids::CHECK_EMBARGO_PUBLIC_BUNDLE => Some(explain_public_bundle()),
        ids::CHECK_EMBARGO_VISIBLE_BUNDLE => Some(explain_visible_bundle()),
        ids::CHECK_EMBARGO_CAMPUS_AVAILABILITY => Some(explain_campus_availability()),
        ids::CHECK_EMBARGO_PROTECTION => Some(explain_protection()),
        ids::CHECK_EMBARGO_AVAILABILITY_DATE => Some(explain_availability_date()),
        ids::CHECK_EMBARGO_PUBLIC_ACCESS_DATE => Some(explain_public_access_date()),
        ids::CHECK_POLICY_GRANTS => Some(explain_grants()),

        // Codes
        ids::CODE_ITEM_NOT_PUBLIC => Some(explain_item_public()),
        ids::CODE_TERMS_UNPARSEABLE => Some(explain_terms()),
        ids::CODE_NOT_PUBLIC => Some(explain_public_bundle()),
        ids::CODE_CONTAINER_NOT_PUBLIC => Some(explain_visible_bundle()),
        ids::CODE_NOT_AVAILABLE_ON_CAMPUS => Some(explain_campus_availability()),
        ids::CODE_NOT_PROTECTED => Some(explain_protection()),
        ids::CODE_AVAILABILITY_DATE_MISSING | ids::CODE_AVAILABILITY_DATE_IN_FUTURE => {
            Some(explain_availability_date())
        }
        ids::CODE_NO_PUBLIC_GRANT => Some(explain_no_public_grant()),
        ids::CODE_PUBLIC_ACCESS_EXPIRES => Some(explain_public_access_expires()),
        ids::CODE_PUBLIC_ACCESS_TOO_LATE => Some(explain_public_access_date()),
        ids::CODE_MISSING_GRANTEE => Some(explain_missing_grantee()),
        ids::CODE_UNRESOLVED_GROUP => Some(explain_unresolved_group()),
        ids::CODE_MALFORMED_GRANT => Some(explain_malformed_grant()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_EMBARGO_ITEM_PUBLIC,
        ids::CHECK_EMBARGO_TERMS,
        ids::CHECK_EMBARGO_PUBLIC_BUNDLE,
        ids::CHECK_EMBARGO_VISIBLE_BUNDLE,
        ids::CHECK_EMBARGO_CAMPUS_AVAILABILITY,
        ids::CHECK_EMBARGO_PROTECTION,
        ids::CHECK_EMBARGO_AVAILABILITY_DATE,
        ids::CHECK_EMBARGO_PUBLIC_ACCESS_DATE,
        ids::CHECK_POLICY_GRANTS,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_ITEM_NOT_PUBLIC,
        ids::CODE_TERMS_UNPARSEABLE,
        ids::CODE_NOT_PUBLIC,
        ids::CODE_CONTAINER_NOT_PUBLIC,
        ids::CODE_NOT_AVAILABLE_ON_CAMPUS,
        ids::CODE_NOT_PROTECTED,
        ids::CODE_AVAILABILITY_DATE_MISSING,
        ids::CODE_AVAILABILITY_DATE_IN_FUTURE,
        ids::CODE_NO_PUBLIC_GRANT,
        ids::CODE_PUBLIC_ACCESS_EXPIRES,
        ids::CODE_PUBLIC_ACCESS_TOO_LATE,
        ids::CODE_MISSING_GRANTEE,
        ids::CODE_UNRESOLVED_GROUP,
        ids::CODE_MALFORMED_GRANT,
    ]
}

fn explain_item_public() -> Explanation {
    Explanation {
        title: "Item Must Be Public",
        description: "\
The item record itself must be readable by the Anonymous group with no end date.

Item-level visibility controls metadata display and discovery. An item that is not
public hides its metadata, license and thumbnails even when only the content files
were meant to be embargoed. When this check fails, the remaining rules are skipped
for the item because their findings would mostly be noise.",
        remediation: "\
Add (or restore) a READ grant on the item for the Anonymous group with no start
and no end date. Embargo content by restricting the bitstreams, not the item.",
    }
}

fn explain_terms() -> Explanation {
    Explanation {
        title: "Embargo Terms Parse",
        description: "\
The declared embargo-terms metadata value could not be read as a date or as the
configured \"open\" sentinel.

Without a date the auditor cannot tell whether the content is still expected to be
protected, so the embargo-date protection rule is skipped for the item.",
        remediation: "\
Record the embargo end as an ISO date (`2027-06-30`, `2027-06`, or `2027`), or use
the configured open sentinel when the item is not embargoed.",
    }
}

fn explain_public_bundle() -> Explanation {
    Explanation {
        title: "Public Bundles Stay Public",
        description: "\
Bundles configured as always public (license, metadata, rights statements) and every
bitstream inside them must be readable by Anonymous with no end date.

These files describe the item and its terms of use; hiding them makes the item
look broken and can hide the very license that explains the embargo.",
        remediation: "\
Grant Anonymous READ with no end date on the bundle and each of its bitstreams.",
    }
}

fn explain_visible_bundle() -> Explanation {
    Explanation {
        title: "Visible Bundle Containers",
        description: "\
Bundles configured as visible (extracted text, thumbnails) must themselves be public
so the container shows up, while their bitstreams may be individually protected.",
        remediation: "\
Grant Anonymous READ with no end date on the bundle; keep restrictions on the
bitstreams that need them.",
    }
}

fn explain_campus_availability() -> Explanation {
    Explanation {
        title: "Available On Campus Or Fully Embargoed",
        description: "\
Every bundle and bitstream outside the public tier must be either readable on campus
(public, or granted to the campus-only group without an end date) or explicitly
fully embargoed.

A READ grant to the Administrators group is the explicit \"nobody but staff\"
signal. An object with neither is usually the result of a policy that was deleted
by accident rather than a deliberate embargo.",
        remediation: "\
Grant READ to the campus-only group, or, for a full embargo, grant READ to the
Administrators group so the intent is recorded.",
    }
}

fn explain_protection() -> Explanation {
    Explanation {
        title: "Protected While Embargoed",
        description: "\
When the item's declared embargo date is still in the future, every bitstream in a
non-public bundle must not be readable by Anonymous.",
        remediation: "\
Remove the Anonymous READ grant or give it a start date on or after the embargo
date. If the embargo was lifted early, update the embargo metadata instead.",
    }
}

fn explain_availability_date() -> Explanation {
    Explanation {
        title: "Availability Date",
        description: "\
Capped-embargo generation only. The item's availability (or accession) date anchors
the maximum embargo length, so it must be present and not in the future.",
        remediation: "\
Repair the availability/accession metadata of the item.",
    }
}

fn explain_public_access_date() -> Explanation {
    Explanation {
        title: "Public Access Date Within Cap",
        description: "\
Capped-embargo generation only. Restricted bundles and bitstreams must become public
no later than the configured maximum embargo length after the item's availability
date. Items made available inside the grandfather window are exempt.",
        remediation: "\
Move the start date of the Anonymous READ grant within the cap, or document an
exception by adding the item handle to the check's allow list.",
    }
}

fn explain_no_public_grant() -> Explanation {
    Explanation {
        title: "No Public Grant",
        description: "\
Capped-embargo generation only. The object has no Anonymous READ grant at all, so it
will never become public.",
        remediation: "\
Add an Anonymous READ grant whose start date is the embargo end date.",
    }
}

fn explain_public_access_expires() -> Explanation {
    Explanation {
        title: "Public Access Expires",
        description: "\
Capped-embargo generation only. The Anonymous READ grant carries an end date; public
access must never be scheduled to expire.",
        remediation: "\
Remove the end date from the Anonymous READ grant.",
    }
}

fn explain_grants() -> Explanation {
    Explanation {
        title: "Grant Hygiene",
        description: "\
Flags read grants the auditor cannot interpret: grants without a person or group,
and group references the directory cannot resolve.",
        remediation: "\
Delete orphaned grants and re-create them against an existing group or person.",
    }
}

fn explain_missing_grantee() -> Explanation {
    Explanation {
        title: "Grant Without Grantee",
        description: "\
A read grant names neither a person nor a group. It grants nothing and is ignored by
every visibility rule.",
        remediation: "\
Delete the grant or re-create it for the intended person or group.",
    }
}

fn explain_unresolved_group() -> Explanation {
    Explanation {
        title: "Unresolved Group",
        description: "\
A grant, or a group reachable through sub-group membership, references a group id
the directory does not know. The missing group is treated as granting nothing.",
        remediation: "\
Remove the dangling reference or restore the deleted group.",
    }
}

fn explain_malformed_grant() -> Explanation {
    Explanation {
        title: "Malformed Grant",
        description: "\
A read grant carries a start or end date that cannot be read, or names both a person
and a group. A grant with an unreadable date never counts as active. A grant naming
both is evaluated by its group only.",
        remediation: "\
Re-create the grant with ISO dates (YYYY-MM-DD) and a single grantee.",
    }
}
