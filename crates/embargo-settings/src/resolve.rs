use crate::{model::EmbargoConfigV1, presets};
use anyhow::Context;
use embargo_domain::groups::RoleMatcher;
use embargo_domain::model::GroupId;
use embargo_domain::policy::{AllowList, CheckPolicy, DateWindow, EffectiveConfig, FailOn};
use embargo_domain::Generation;
use embargo_types::Severity;
use globset::Glob;
use time::macros::format_description;
use time::Date;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub generation: Option<String>,
    pub max_findings: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    /// Repository base URL for links; required only by listings.
    pub base_url: Option<String>,
}

pub fn resolve_config(cfg: EmbargoConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile);

    // Generation
    if let Some(g) = overrides.generation.clone().or(cfg.generation.clone()) {
        effective.generation = parse_generation(&g)?;
    }

    // max findings
    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    if let Some(sentinel) = cfg.open_sentinel.as_deref() {
        let sentinel = sentinel.trim();
        effective.open_sentinel = (!sentinel.is_empty()).then(|| sentinel.to_string());
    }

    // Roles
    if let Some(id) = cfg.roles.anonymous_id {
        effective.roles.anonymous = RoleMatcher::Id(GroupId(id));
    }
    if let Some(id) = cfg.roles.administrators_id {
        effective.roles.administrators = RoleMatcher::Id(GroupId(id));
    }
    if let Some(name) = cfg.roles.campus_group.clone() {
        anyhow::ensure!(!name.trim().is_empty(), "roles.campus_group must not be empty");
        effective.roles.campus = RoleMatcher::Name(name);
    }

    // Bundle tiers
    if let Some(public) = cfg.bundles.public.clone() {
        effective.bundles.public = public.into_iter().collect();
    }
    if let Some(visible) = cfg.bundles.visible.clone() {
        effective.bundles.visible = visible.into_iter().collect();
    }
    if let Some(name) = effective.bundles.public.intersection(&effective.bundles.visible).next() {
        anyhow::bail!("bundle {name} is listed as both public and visible");
    }

    // Embargo cap
    if let Some(years) = cfg.max_embargo_years {
        anyhow::ensure!(years > 0, "max_embargo_years must be at least 1");
        effective.max_embargo_years = years;
    }
    if let Some(gf) = cfg.grandfather.as_ref() {
        if gf.enabled == Some(false) {
            effective.grandfather = None;
        } else {
            let current = effective.grandfather;
            let from = match gf.from.as_deref() {
                Some(s) => parse_date(s).context("invalid grandfather.from")?,
                None => current.map(|w| w.from).context("grandfather.from is required")?,
            };
            let until = match gf.until.as_deref() {
                Some(s) => parse_date(s).context("invalid grandfather.until")?,
                None => current.map(|w| w.until).context("grandfather.until is required")?,
            };
            anyhow::ensure!(from <= until, "grandfather window ends before it starts");
            effective.grandfather = Some(DateWindow { from, until });
        }
    }

    // per-check overrides
    for (check_id, cc) in cfg.checks.iter() {
        let entry = effective
            .checks
            .entry(check_id.clone())
            .or_insert_with(CheckPolicy::disabled);

        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = cc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
        }
        if !cc.allow.is_empty() {
            validate_allowlist(check_id, &cc.allow)?;
            entry.allow = AllowList::new(cc.allow.clone())
                .with_context(|| format!("compile allow globs for {check_id}"))?;
        }
    }

    // fail_on override from config
    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    let base_url = cfg
        .base_url
        .map(|u| u.trim().trim_end_matches('/').to_string())
        .filter(|u| !u.is_empty());

    Ok(ResolvedConfig {
        effective,
        base_url,
    })
}

fn validate_allowlist(check_id: &str, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern)
            .with_context(|| format!("invalid allow glob for {check_id}: {pattern}"))?;
    }
    Ok(())
}

fn parse_generation(v: &str) -> anyhow::Result<Generation> {
    Generation::parse(v).with_context(|| {
        format!("unknown generation: {v} (expected protected-while-embargoed|capped-embargo)")
    })
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}

/// `YYYY-MM-DD`.
pub fn parse_date(v: &str) -> anyhow::Result<Date> {
    Date::parse(v.trim(), format_description!("[year]-[month]-[day]"))
        .with_context(|| format!("expected YYYY-MM-DD, got {v:?}"))
}
