//! Render use cases over in-memory reports and listings.

use embargo_render::{RenderableListRow, RenderableReconcileRow, RenderableReport};

pub fn render_markdown(report: &RenderableReport) -> String {
    embargo_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    embargo_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

pub fn render_tsv(rows: &[RenderableListRow]) -> String {
    embargo_render::render_tsv(rows)
}

pub fn render_reconciliation(rows: &[RenderableReconcileRow]) -> String {
    embargo_render::render_reconciliation(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embargo_render::{
        RenderableData, RenderableFinding, RenderableItem, RenderableItemStatus,
        RenderableSeverity, RenderableVerdictStatus,
    };

    fn finding(code: &str) -> RenderableFinding {
        RenderableFinding {
            severity: RenderableSeverity::Error,
            check_id: "embargo.protection".to_string(),
            code: code.to_string(),
            message: "bad".to_string(),
            object: None,
            help: None,
        }
    }

    fn sample_report() -> RenderableReport {
        RenderableReport {
            verdict: RenderableVerdictStatus::Fail,
            items: vec![RenderableItem {
                handle: "1794/2".to_string(),
                name: "Thesis".to_string(),
                url: None,
                status: RenderableItemStatus::Invalid,
                failure: None,
                findings: vec![finding("not_protected"), finding("not_protected")],
            }],
            findings: Vec::new(),
            data: RenderableData {
                items_scanned: 1,
                items_valid: 0,
                items_invalid: 1,
                items_not_audited: 0,
                findings_emitted: 2,
                findings_total: 2,
                truncated_reason: None,
            },
        }
    }

    #[test]
    fn render_annotations_respects_max() {
        assert_eq!(render_annotations(&sample_report(), 1).len(), 1);
        assert_eq!(render_annotations(&sample_report(), 10).len(), 2);
    }

    #[test]
    fn render_markdown_smoke() {
        assert!(render_markdown(&sample_report()).contains("1794/2"));
    }
}
