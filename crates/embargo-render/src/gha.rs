use crate::{RenderableFinding, RenderableReport, RenderableSeverity};

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format: `::{level} title={handle}::[{check_id}:{code}] {message}`.
/// Items that could not be audited become one error annotation each.
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out: Vec<String> = report
        .findings
        .iter()
        .map(|f| annotation("embargo-audit", f))
        .collect();

    for item in &report.items {
        let title = escape_property(&item.handle);

        if let Some(failure) = &item.failure {
            out.push(format!(
                "::error title={}::{}",
                title,
                escape_data(&format!("[not_audited] {failure}"))
            ));
        }

        out.extend(item.findings.iter().map(|f| annotation(&title, f)));
    }

    out
}

fn annotation(title: &str, f: &RenderableFinding) -> String {
    let level = match f.severity {
        RenderableSeverity::Error => "error",
        RenderableSeverity::Warning => "warning",
        RenderableSeverity::Info => "notice",
    };
    let message = escape_data(&format!("[{}:{}] {}", f.check_id, f.code, f.message));
    format!("::{} title={}::{}", level, title, message)
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
