use crate::checks;
use crate::model::Item;
use crate::policy::EffectiveConfig;
use crate::report::{ItemAudit, SeverityCounts};
use crate::snapshot::AuditSnapshot;
use crate::source::{ContentSource, GroupDirectory, SourceError};
use crate::visibility::ObjectState;
use embargo_types::{Finding, Handle, Severity};
use thiserror::Error;
use time::Date;

/// The item could not be audited; its findings are unknown.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to read item {handle}")]
    Source {
        handle: Handle,
        #[source]
        source: SourceError,
    },
}

impl AuditError {
    pub fn handle(&self) -> &Handle {
        match self {
            AuditError::Source { handle, .. } => handle,
        }
    }
}

/// Audits items against one configuration through the two collaborators.
///
/// Borrowing only; one auditor can be shared by parallel workers.
pub struct Auditor<'a, S: ?Sized, D: ?Sized> {
    cfg: &'a EffectiveConfig,
    source: &'a S,
    directory: &'a D,
}

impl<'a, S, D> Auditor<'a, S, D>
where
    S: ContentSource + ?Sized,
    D: GroupDirectory + ?Sized,
{
    pub fn new(cfg: &'a EffectiveConfig, source: &'a S, directory: &'a D) -> Self {
        Self {
            cfg,
            source,
            directory,
        }
    }

    pub fn config(&self) -> &EffectiveConfig {
        self.cfg
    }

    pub fn audit(&self, item: &Item, today: Date) -> Result<ItemAudit, AuditError> {
        let mut findings: Vec<Finding> = Vec::new();
        let item_state = ObjectState::load(
            item.object.clone(),
            self.source,
            self.directory,
            &self.cfg.roles,
            today,
        )
        .map_err(|source| wrap(item, source))?;

        // A non-public item makes every other rule moot.
        if checks::item_public::run(item, &item_state, self.cfg, &mut findings) {
            return Ok(finish(item, findings, 1, self.cfg.max_findings));
        }

        let snapshot = AuditSnapshot::load_with_item_state(
            item,
            item_state,
            self.source,
            self.directory,
            self.cfg,
            today,
        )
        .map_err(|source| wrap(item, source))?;

        for rule in self.cfg.generation.rules() {
            (rule.run)(&snapshot, self.cfg, &mut findings);
        }

        let objects = snapshot.objects().count() as u32;
        Ok(finish(item, findings, objects, self.cfg.max_findings))
    }

    /// Fetch everything the rules would look at, without evaluating them.
    pub fn snapshot(&self, item: &Item, today: Date) -> Result<AuditSnapshot, AuditError> {
        AuditSnapshot::load(item, self.source, self.directory, self.cfg, today)
            .map_err(|source| wrap(item, source))
    }
}

fn wrap(item: &Item, source: SourceError) -> AuditError {
    AuditError::Source {
        handle: item.handle.clone(),
        source,
    }
}

fn finish(item: &Item, findings: Vec<Finding>, objects: u32, max_findings: usize) -> ItemAudit {
    let counts = SeverityCounts::from_findings(&findings);
    let total = findings.len() as u32;

    let mut emitted = findings;
    let mut truncated_reason = None;
    if emitted.len() > max_findings {
        emitted = truncate_keeping_order(emitted, max_findings);
        truncated_reason = Some(format!("findings truncated to max_findings={max_findings}"));
    }

    ItemAudit {
        handle: item.handle.clone(),
        name: item.name().to_string(),
        findings: emitted,
        findings_total: total,
        truncated_reason,
        objects_scanned: objects,
        counts,
    }
}

/// Drop the latest Info findings first, then Warnings, then Errors, until `max` remain.
/// Survivors keep their emission order.
fn truncate_keeping_order(findings: Vec<Finding>, max: usize) -> Vec<Finding> {
    let mut excess = findings.len().saturating_sub(max);
    let mut keep = vec![true; findings.len()];
    for severity in [Severity::Info, Severity::Warning, Severity::Error] {
        for (i, f) in findings.iter().enumerate().rev() {
            if excess == 0 {
                break;
            }
            if keep[i] && f.severity == severity {
                keep[i] = false;
                excess -= 1;
            }
        }
    }
    findings
        .into_iter()
        .zip(keep)
        .filter_map(|(f, k)| k.then_some(f))
        .collect()
}
