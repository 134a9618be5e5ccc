//! Shared setup for the snapshot-reading use cases.

use anyhow::Context;
use camino::Utf8Path;
use embargo_domain::model::Item;
use embargo_domain::snapshot::AuditSnapshot;
use embargo_domain::{AuditError, Auditor};
use embargo_repo::SnapshotRepo;
use embargo_settings::{Overrides, ResolvedConfig};
use embargo_types::Handle;
use rayon::prelude::*;
use time::{Date, OffsetDateTime};

/// Input shared by audit, list and reconcile.
#[derive(Clone, Debug)]
pub struct RunInput<'a> {
    /// Snapshot directory (contains `groups.json` and `items/`).
    pub snapshot_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Evaluation date; today's UTC date when absent.
    pub today: Option<Date>,
    /// Items to process; empty means all.
    pub handles: Vec<Handle>,
}

pub(crate) struct Prepared {
    pub resolved: ResolvedConfig,
    pub repo: SnapshotRepo,
    pub items: Vec<Item>,
    pub today: Date,
}

pub(crate) fn resolve(input: &RunInput<'_>) -> anyhow::Result<ResolvedConfig> {
    // Empty config is allowed, defaults apply.
    let cfg = if input.config_text.trim().is_empty() {
        embargo_settings::EmbargoConfigV1::default()
    } else {
        embargo_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    embargo_settings::resolve_config(cfg, input.overrides.clone()).context("resolve config")
}

pub(crate) fn prepare(input: &RunInput<'_>) -> anyhow::Result<Prepared> {
    let resolved = resolve(input)?;
    let repo = SnapshotRepo::open(input.snapshot_root)
        .with_context(|| format!("open snapshot {}", input.snapshot_root))?;
    let items = repo.select(&input.handles).context("select items")?;
    let today = input
        .today
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    tracing::debug!(
        snapshot = %input.snapshot_root,
        items = items.len(),
        profile = %resolved.effective.profile,
        generation = %resolved.effective.generation,
        %today,
        "snapshot loaded"
    );

    Ok(Prepared {
        resolved,
        repo,
        items,
        today,
    })
}

impl Prepared {
    /// Load every selected item's snapshot in parallel, keeping selection order.
    pub fn snapshots(&self) -> Vec<(&Item, Result<AuditSnapshot, AuditError>)> {
        let auditor = Auditor::new(&self.resolved.effective, &self.repo, &self.repo);
        self.items
            .par_iter()
            .map(|item| {
                let snapshot = auditor.snapshot(item, self.today);
                if let Err(err) = &snapshot {
                    tracing::warn!(handle = %item.handle, error = %error_chain(err), "item skipped");
                }
                (item, snapshot)
            })
            .collect()
    }
}

/// `failed to read item X: <cause>`, with every source in the chain.
pub(crate) fn error_chain(err: &AuditError) -> String {
    let mut out = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// `{base_url}/handle/{handle}` when a base URL is configured.
pub(crate) fn item_url(resolved: &ResolvedConfig, handle: &Handle) -> Option<String> {
    resolved.base_url.as_deref().map(|base| handle.url(base))
}
