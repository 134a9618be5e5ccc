use embargo_domain::policy::{CheckPolicy, DateWindow, EffectiveConfig, FailOn, RoleConfig};
use embargo_domain::tier::BundleTiers;
use embargo_domain::Generation;
use embargo_types::Severity;
use std::collections::BTreeMap;
use time::macros::date;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "warn" => warn_profile(),
        "legacy" => legacy_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        generation: Generation::ProtectedWhileEmbargoed,
        fail_on: FailOn::Error,
        max_findings: 200,
        roles: RoleConfig::default(),
        bundles: BundleTiers::default(),
        open_sentinel: Some("open".to_string()),
        max_embargo_years: 2,
        grandfather: Some(DateWindow {
            from: date!(2014 - 02 - 01),
            until: date!(2016 - 10 - 01),
        }),
        checks: default_checks(Severity::Error),
    }
}

fn warn_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "warn".to_string(),
        fail_on: FailOn::Warning,
        checks: default_checks(Severity::Warning),
        ..strict_profile()
    }
}

fn legacy_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "legacy".to_string(),
        generation: Generation::CappedEmbargo,
        ..strict_profile()
    }
}

/// Every check is enabled. Rule violations get `violation`; malformed input stays a warning.
fn default_checks(violation: Severity) -> BTreeMap<String, CheckPolicy> {
    use embargo_types::ids::*;
    let mut m = BTreeMap::new();

    for id in [
        CHECK_EMBARGO_ITEM_PUBLIC,
        CHECK_EMBARGO_PUBLIC_BUNDLE,
        CHECK_EMBARGO_VISIBLE_BUNDLE,
        CHECK_EMBARGO_CAMPUS_AVAILABILITY,
        CHECK_EMBARGO_PROTECTION,
        CHECK_EMBARGO_PUBLIC_ACCESS_DATE,
    ] {
        m.insert(id.to_string(), CheckPolicy::enabled(violation));
    }

    for id in [
        CHECK_EMBARGO_TERMS,
        CHECK_POLICY_GRANTS,
        CHECK_EMBARGO_AVAILABILITY_DATE,
    ] {
        m.insert(id.to_string(), CheckPolicy::enabled(Severity::Warning));
    }

    m
}
