use anyhow::Context;
use embargo_render::{
    RenderableData, RenderableFinding, RenderableItem, RenderableItemStatus, RenderableReport,
    RenderableSeverity, RenderableVerdictStatus,
};
use embargo_types::{
    ids, AuditData, AuditReport, Finding, ItemStatus, Severity, ToolMeta, Verdict,
    SCHEMA_REPORT_V1,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<AuditReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse embargo report")
}

pub fn serialize_report(report: &AuditReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &AuditReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        items: report
            .items
            .iter()
            .map(|item| RenderableItem {
                handle: item.handle.to_string(),
                name: item.name.clone(),
                url: item.url.clone(),
                status: match item.status {
                    ItemStatus::Valid => RenderableItemStatus::Valid,
                    ItemStatus::Invalid => RenderableItemStatus::Invalid,
                    ItemStatus::NotAudited => RenderableItemStatus::NotAudited,
                },
                failure: item.failure.clone(),
                findings: item.findings.iter().map(renderable_finding).collect(),
            })
            .collect(),
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            items_scanned: report.data.items_scanned,
            items_valid: report.data.items_valid,
            items_invalid: report.data.items_invalid,
            items_not_audited: report.data.items_not_audited,
            findings_emitted: report.data.findings_emitted,
            findings_total: report.data.findings_total,
            truncated_reason: report.data.truncated_reason.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: f.check_id.clone(),
        code: f.code.clone(),
        message: f.message.clone(),
        object: f.object.as_ref().map(|o| o.to_string()),
        help: f.help.clone(),
    }
}

/// A failing report carrying one `tool.runtime` finding, written when the run itself fails.
pub fn runtime_error_report(message: &str) -> AuditReport {
    let now = OffsetDateTime::now_utc();
    AuditReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "embargo-audit".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        items: Vec::new(),
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            object: None,
            help: Some("Fix the tool error and re-run embargo-audit.".to_string()),
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data: AuditData {
            profile: "unknown".to_string(),
            generation: "unknown".to_string(),
            findings_total: 1,
            findings_emitted: 1,
            ..AuditData::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_report_round_trips_through_parse() {
        let report = runtime_error_report("open snapshot /missing");
        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.contains("\"tool.runtime\""));

        let parsed = parse_report_json(&text).expect("parse");
        assert_eq!(parsed.verdict, Verdict::Fail);
        assert_eq!(parsed.findings.len(), 1);
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn rejects_foreign_schema() {
        let err = parse_report_json(r#"{"schema":"other.report.v1"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown report schema"));
        assert!(parse_report_json("not json").is_err());
    }

    #[test]
    fn renderable_carries_run_findings_and_objects() {
        let report = runtime_error_report("boom");
        let r = to_renderable(&report);
        assert_eq!(r.verdict, RenderableVerdictStatus::Fail);
        assert_eq!(r.findings[0].code, ids::CODE_RUNTIME_ERROR);
        assert_eq!(r.data.findings_total, 1);
    }
}
