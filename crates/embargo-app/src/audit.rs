//! The `audit` use case: evaluate every selected item and produce a report.

use crate::context::{error_chain, item_url, prepare, RunInput};
use embargo_domain::report::{compute_verdict, ItemAudit, SeverityCounts};
use embargo_domain::{AuditError, Auditor};
use embargo_settings::ResolvedConfig;
use embargo_types::{
    AuditData, AuditReport, ItemResult, ItemStatus, ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
use rayon::prelude::*;
use time::OffsetDateTime;

/// Output from the audit use case.
#[derive(Clone, Debug)]
pub struct AuditOutput {
    /// The generated report.
    pub report: AuditReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the audit use case: resolve config, load the snapshot, audit items, build the report.
///
/// Items are audited in parallel; results keep the selection order. An item whose data
/// cannot be read is reported as not audited and does not stop the run.
pub fn run_audit(input: RunInput<'_>) -> anyhow::Result<AuditOutput> {
    let started_at = OffsetDateTime::now_utc();
    let prepared = prepare(&input)?;
    let cfg = &prepared.resolved.effective;
    let today = prepared.today;

    tracing::info!(
        items = prepared.items.len(),
        generation = %cfg.generation,
        %today,
        "audit started"
    );

    let auditor = Auditor::new(cfg, &prepared.repo, &prepared.repo);
    let outcomes: Vec<Result<ItemAudit, AuditError>> = prepared
        .items
        .par_iter()
        .map(|item| {
            let _span = tracing::debug_span!("audit_item", handle = %item.handle).entered();
            let outcome = auditor.audit(item, today);
            match &outcome {
                Ok(audit) => tracing::debug!(
                    valid = audit.is_valid(),
                    findings = audit.findings_total,
                    "item audited"
                ),
                Err(err) => tracing::warn!(error = %error_chain(err), "item not audited"),
            }
            outcome
        })
        .collect();

    let mut counts = SeverityCounts::default();
    let mut data = AuditData {
        profile: cfg.profile.clone(),
        generation: cfg.generation.id().to_string(),
        audit_date: today.to_string(),
        ..AuditData::default()
    };
    let mut truncated_items = 0u32;
    let mut items = Vec::with_capacity(outcomes.len());

    for (item, outcome) in prepared.items.iter().zip(outcomes) {
        data.items_scanned += 1;
        let url = item_url(&prepared.resolved, &item.handle);
        match outcome {
            Ok(audit) => {
                counts.add(&audit.counts);
                data.objects_scanned += audit.objects_scanned;
                data.findings_total += audit.findings_total;
                data.findings_emitted += audit.findings.len() as u32;
                if audit.truncated_reason.is_some() {
                    truncated_items += 1;
                }
                let status = audit.status();
                match status {
                    ItemStatus::Valid => data.items_valid += 1,
                    _ => data.items_invalid += 1,
                }
                items.push(ItemResult {
                    handle: audit.handle,
                    name: audit.name,
                    url,
                    status,
                    findings: audit.findings,
                    failure: None,
                });
            }
            Err(err) => {
                data.items_not_audited += 1;
                items.push(ItemResult {
                    handle: item.handle.clone(),
                    name: item.name().to_string(),
                    url,
                    status: ItemStatus::NotAudited,
                    findings: Vec::new(),
                    failure: Some(error_chain(&err)),
                });
            }
        }
    }

    if truncated_items > 0 {
        data.truncated_reason = Some(format!(
            "findings truncated to max_findings={} for {} item(s)",
            cfg.max_findings, truncated_items
        ));
    }

    let verdict = compute_verdict(&counts, cfg.fail_on);
    tracing::info!(
        verdict = ?verdict,
        valid = data.items_valid,
        invalid = data.items_invalid,
        not_audited = data.items_not_audited,
        "audit finished"
    );

    let report = AuditReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "embargo-audit".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        items,
        findings: Vec::new(),
        data,
    };

    Ok(AuditOutput {
        report,
        resolved_config: prepared.resolved,
    })
}

/// Map a report to an exit code: 0 = pass/warn, 2 = fail, 3 = some items not audited.
pub fn report_exit_code(report: &AuditReport) -> i32 {
    match report.verdict {
        Verdict::Fail => 2,
        Verdict::Pass | Verdict::Warn if report.data.items_not_audited > 0 => 3,
        Verdict::Pass | Verdict::Warn => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use embargo_settings::Overrides;
    use embargo_types::{ids, Handle};
    use serde_json::json;
    use time::macros::date;

    fn input<'a>(root: &'a Utf8Path, config_text: &'a str) -> RunInput<'a> {
        RunInput {
            snapshot_root: root,
            config_text,
            overrides: Overrides::default(),
            today: Some(date!(2024 - 06 - 01)),
            handles: Vec::new(),
        }
    }

    #[test]
    fn sample_snapshot_report() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        embargo_test_util::write_sample_snapshot(tmp.path());
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");

        let output = run_audit(input(root, "base_url = \"https://repo.example.edu\"")).expect("audit");
        let report = &output.report;

        assert_eq!(output.resolved_config.effective.profile, "strict");
        assert_eq!(report.schema, SCHEMA_REPORT_V1);
        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(report.data.audit_date, "2024-06-01");
        assert_eq!(report.data.items_scanned, 3);
        assert_eq!(report.data.items_valid, 1);
        assert_eq!(report.data.items_invalid, 1);
        assert_eq!(report.data.items_not_audited, 1);

        let statuses: Vec<ItemStatus> = report.items.iter().map(|i| i.status).collect();
        assert_eq!(
            statuses,
            vec![ItemStatus::Valid, ItemStatus::Invalid, ItemStatus::NotAudited]
        );
        assert_eq!(
            report.items[0].url.as_deref(),
            Some("https://repo.example.edu/handle/1794/1")
        );
        assert!(
            report.items[1]
                .findings
                .iter()
                .any(|f| f.code == ids::CODE_NOT_PROTECTED)
        );
        let failure = report.items[2].failure.as_deref().expect("failure");
        assert!(failure.contains("1794/3"), "{failure}");
        assert!(failure.contains("items/nested/1794-3.json"), "{failure}");

        assert_eq!(report_exit_code(report), 2);
    }

    #[test]
    fn unaudited_items_without_failures_exit_3() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        embargo_test_util::write_sample_snapshot(tmp.path());
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");

        let mut run = input(root, "");
        run.handles = vec![Handle::new("1794/1"), Handle::new("1794/3")];
        let output = run_audit(run).expect("audit");
        assert_eq!(output.report.verdict, Verdict::Pass);
        assert_eq!(report_exit_code(&output.report), 3);
        assert!(output.report.items[0].url.is_none());
    }

    #[test]
    fn malformed_grants_are_audited_with_warnings() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let dir = tmp.path();
        embargo_test_util::write_json(dir, "groups.json", &embargo_test_util::sample_groups());
        embargo_test_util::write_json(
            dir,
            "items/5.json",
            &embargo_test_util::sample_item(
                5,
                &[json!({ "group": 1 }), json!({ "group": 0, "start": "2030-13-45" })],
            ),
        );
        embargo_test_util::write_json(
            dir,
            "items/6.json",
            &embargo_test_util::sample_item(6, &[json!({ "group": 1, "person": "pat" })]),
        );
        let root = Utf8Path::from_path(dir).expect("utf8 path");

        let output = run_audit(input(root, "")).expect("audit");
        let report = &output.report;
        assert_eq!(report.data.items_not_audited, 0);
        for item in &report.items {
            assert_eq!(item.status, ItemStatus::Valid, "{}", item.handle);
            assert!(
                item.findings
                    .iter()
                    .any(|f| f.code == ids::CODE_MALFORMED_GRANT),
                "{}",
                item.handle
            );
        }
        assert_eq!(report_exit_code(report), 0);
    }

    #[test]
    fn warn_profile_keeps_items_valid_but_fails_the_run() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        embargo_test_util::write_sample_snapshot(tmp.path());
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");

        let mut run = input(root, "profile = \"warn\"");
        run.handles = vec![Handle::new("1794/2")];
        let output = run_audit(run).expect("audit");
        assert_eq!(output.report.items[0].status, ItemStatus::Valid);
        assert_eq!(output.report.verdict, Verdict::Fail);
    }

    #[test]
    fn bad_config_is_an_error() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        embargo_test_util::write_sample_snapshot(tmp.path());
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        assert!(run_audit(input(root, "generation = \"v7\"")).is_err());
    }

    #[test]
    fn verdict_exit_codes() {
        let mut report = crate::runtime_error_report("boom");
        assert_eq!(report_exit_code(&report), 2);
        report.verdict = Verdict::Warn;
        assert_eq!(report_exit_code(&report), 0);
        report.data.items_not_audited = 1;
        assert_eq!(report_exit_code(&report), 3);
    }
}
