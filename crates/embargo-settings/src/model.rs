use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `embargo.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmbargoConfigV1 {
    /// Optional schema string for tooling (`embargo.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (default), `warn`, or `legacy`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Rule generation: `protected-while-embargoed` (`v2`) or `capped-embargo` (`v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,

    /// When to fail the run: `error` (default) or `warning`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// How many findings to emit per item before truncating the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_findings: Option<u32>,

    /// Embargo-terms value that means "open, no embargo".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_sentinel: Option<String>,

    /// Repository base URL used to build item and collection links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default)]
    pub roles: RolesConfig,

    #[serde(default)]
    pub bundles: BundlesConfig,

    /// Capped-embargo generation: longest embargo allowed after the availability date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_embargo_years: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grandfather: Option<GrandfatherConfig>,

    /// Map of check_id -> config.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RolesConfig {
    /// Group id of the Anonymous role (default 0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymous_id: Option<u64>,

    /// Group id of the Administrators role (default 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrators_id: Option<u64>,

    /// Name of the campus-only group (default `Campus only`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus_group: Option<String>,
}

/// Bundle-name sets. Setting a list replaces the default list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BundlesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<Vec<String>>,
}

/// Items made available within `[from, until]` are exempt from the embargo cap.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GrandfatherConfig {
    /// `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,

    /// Turn the exemption off entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckConfig {
    /// Override preset enable/disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Override preset severity: `info`, `warning`, `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Item-handle glob patterns exempt from this check.
    #[serde(default)]
    pub allow: Vec<String>,
}
