use crate::{
    RenderableFinding, RenderableItem, RenderableItemStatus, RenderableReport,
    RenderableSeverity, RenderableVerdictStatus,
};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Embargo audit report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    let d = &report.data;
    out.push_str(&format!(
        "- Verdict: **{}**\n- Items: {} scanned, {} valid, {} invalid, {} not audited\n- Findings: {} (emitted) / {} (total)\n\n",
        verdict,
        d.items_scanned,
        d.items_valid,
        d.items_invalid,
        d.items_not_audited,
        d.findings_emitted,
        d.findings_total
    ));

    if let Some(r) = &d.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if !report.findings.is_empty() {
        out.push_str("## Run\n\n");
        render_findings(&mut out, &report.findings);
        out.push('\n');
    }

    // Clean items are only counted.
    let noteworthy: Vec<&RenderableItem> = report
        .items
        .iter()
        .filter(|i| !i.findings.is_empty() || i.status != RenderableItemStatus::Valid)
        .collect();

    if noteworthy.is_empty() && report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    for item in noteworthy {
        render_item(&mut out, item);
    }

    out
}

fn render_item(out: &mut String, item: &RenderableItem) {
    let status = match item.status {
        RenderableItemStatus::Valid => "VALID",
        RenderableItemStatus::Invalid => "INVALID",
        RenderableItemStatus::NotAudited => "NOT AUDITED",
    };
    let handle = match &item.url {
        Some(url) => format!("[{}]({})", item.handle, url),
        None => item.handle.clone(),
    };
    out.push_str(&format!("## {}: {} ({})\n\n", handle, item.name, status));

    if let Some(failure) = &item.failure {
        out.push_str(&format!("- could not be audited: {}\n", failure));
    }

    render_findings(out, &item.findings);
    out.push('\n');
}

fn render_findings(out: &mut String, findings: &[RenderableFinding]) {
    for f in findings {
        let sev = match f.severity {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::Error => "ERROR",
        };
        out.push_str(&format!(
            "- [{}] `{}` / `{}`: {}\n",
            sev, f.check_id, f.code, f.message
        ));
        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }
}
