//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_EMBARGO_ITEM_PUBLIC: &str = "embargo.item_public";
pub const CHECK_EMBARGO_TERMS: &str = "embargo.terms";
pub const CHECK_EMBARGO_PUBLIC_BUNDLE: &str = "embargo.public_bundle";
pub const CHECK_EMBARGO_VISIBLE_BUNDLE: &str = "embargo.visible_bundle";
pub const CHECK_EMBARGO_CAMPUS_AVAILABILITY: &str = "embargo.campus_availability";
pub const CHECK_EMBARGO_PROTECTION: &str = "embargo.protection";
pub const CHECK_EMBARGO_AVAILABILITY_DATE: &str = "embargo.availability_date";
pub const CHECK_EMBARGO_PUBLIC_ACCESS_DATE: &str = "embargo.public_access_date";
pub const CHECK_POLICY_GRANTS: &str = "policy.grants";

// Informational trail, not a configurable check.
pub const CHECK_EMBARGO_READERS: &str = "embargo.readers";

// Codes: embargo.item_public
pub const CODE_ITEM_NOT_PUBLIC: &str = "item_not_public";

// Codes: embargo.terms
pub const CODE_TERMS_UNPARSEABLE: &str = "terms_unparseable";

// Codes: embargo.public_bundle
pub const CODE_NOT_PUBLIC: &str = "not_public";

// Codes: embargo.visible_bundle
pub const CODE_CONTAINER_NOT_PUBLIC: &str = "container_not_public";

// Codes: embargo.campus_availability
pub const CODE_NOT_AVAILABLE_ON_CAMPUS: &str = "not_available_on_campus";

// Codes: embargo.protection
pub const CODE_NOT_PROTECTED: &str = "not_protected";

// Codes: embargo.availability_date
pub const CODE_AVAILABILITY_DATE_MISSING: &str = "availability_date_missing";
pub const CODE_AVAILABILITY_DATE_IN_FUTURE: &str = "availability_date_in_future";

// Codes: embargo.public_access_date
pub const CODE_NO_PUBLIC_GRANT: &str = "no_public_grant";
pub const CODE_PUBLIC_ACCESS_EXPIRES: &str = "public_access_expires";
pub const CODE_PUBLIC_ACCESS_TOO_LATE: &str = "public_access_too_late";
pub const CODE_GRANDFATHERED: &str = "grandfathered";

// Codes: policy.grants
pub const CODE_MISSING_GRANTEE: &str = "missing_grantee";
pub const CODE_UNRESOLVED_GROUP: &str = "unresolved_group";
pub const CODE_MALFORMED_GRANT: &str = "malformed_grant";

// Codes: embargo.readers
pub const CODE_READ_GRANT: &str = "read_grant";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
