use crate::generation::Generation;
use crate::groups::RoleMatcher;
use crate::model::GroupId;
use crate::tier::BundleTiers;
use embargo_types::Severity;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeMap;
use time::Date;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

/// Item-handle globs exempt from a check, compiled once when the config is resolved.
#[derive(Clone, Debug, Default)]
pub struct AllowList {
    patterns: Vec<String>,
    set: Option<GlobSet>,
}

impl AllowList {
    pub fn new(patterns: Vec<String>) -> Result<Self, globset::Error> {
        if patterns.is_empty() {
            return Ok(Self::default());
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            set: Some(builder.build()?),
            patterns,
        })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn matches(&self, handle: &str) -> bool {
        self.set.as_ref().is_some_and(|set| set.is_match(handle))
    }
}

#[derive(Clone, Debug)]
pub struct CheckPolicy {
    pub enabled: bool,
    pub severity: Severity,
    pub allow: AllowList,
}

impl CheckPolicy {
    pub fn enabled(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
            allow: AllowList::default(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            severity: Severity::Info,
            allow: AllowList::default(),
        }
    }
}

/// The three distinguished roles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleConfig {
    pub anonymous: RoleMatcher,
    pub administrators: RoleMatcher,
    pub campus: RoleMatcher,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            anonymous: RoleMatcher::Id(GroupId(0)),
            administrators: RoleMatcher::Id(GroupId(1)),
            campus: RoleMatcher::Name("Campus only".to_string()),
        }
    }
}

/// Inclusive date range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateWindow {
    pub from: Date,
    pub until: Date,
}

impl DateWindow {
    pub fn contains(&self, d: Date) -> bool {
        self.from <= d && d <= self.until
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub generation: Generation,
    pub fail_on: FailOn,
    pub max_findings: usize,
    pub roles: RoleConfig,
    pub bundles: BundleTiers,
    /// Embargo-terms value meaning "not embargoed".
    pub open_sentinel: Option<String>,
    /// Capped-embargo generation: longest allowed embargo after the availability date.
    pub max_embargo_years: u16,
    /// Capped-embargo generation: items made available in this window may stay embargoed.
    pub grandfather: Option<DateWindow>,
    pub checks: BTreeMap<String, CheckPolicy>,
}

impl EffectiveConfig {
    pub fn check_policy(&self, check_id: &str) -> Option<&CheckPolicy> {
        self.checks.get(check_id).filter(|p| p.enabled)
    }
}
