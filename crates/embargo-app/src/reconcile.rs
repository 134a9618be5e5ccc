//! The `reconcile` use case: items whose declared embargo and actual access disagree.

use crate::context::{error_chain, prepare, RunInput};
use embargo_domain::reconcile::{reconcile, Reconciliation};
use embargo_render::RenderableReconcileRow;

/// One row per item that is out of sync, has conflicting access dates, or cannot be read.
pub fn run_reconcile(input: RunInput<'_>) -> anyhow::Result<Vec<RenderableReconcileRow>> {
    let prepared = prepare(&input)?;

    let mut rows = Vec::new();
    for (item, snapshot) in prepared.snapshots() {
        let handle = item.handle.to_string();
        let snapshot = match snapshot {
            Ok(snapshot) => snapshot,
            Err(err) => {
                rows.push(RenderableReconcileRow::Failed {
                    handle,
                    detail: error_chain(&err),
                });
                continue;
            }
        };

        match reconcile(&snapshot) {
            Reconciliation::InSync => {}
            Reconciliation::OutOfSync {
                embargo_date,
                public_access,
            } => rows.push(RenderableReconcileRow::OutOfSync {
                handle,
                embargo_date: embargo_date.map_or_else(|| "none".to_string(), |d| d.to_string()),
                public_access: public_access.to_string(),
            }),
            Reconciliation::Conflict(conflict) => rows.push(RenderableReconcileRow::Conflict {
                handle,
                detail: conflict.to_string(),
            }),
        }
    }

    tracing::info!(
        reported = rows.len(),
        selected = prepared.items.len(),
        "reconciliation finished"
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use embargo_settings::Overrides;
    use embargo_test_util::{sample_groups, sample_item, write_json};
    use serde_json::json;
    use time::macros::date;

    fn run(root: &Utf8Path) -> Vec<RenderableReconcileRow> {
        run_reconcile(RunInput {
            snapshot_root: root,
            config_text: "",
            overrides: Overrides::default(),
            today: Some(date!(2024 - 06 - 01)),
            handles: Vec::new(),
        })
        .expect("reconcile")
    }

    #[test]
    fn reports_out_of_sync_and_unreadable_items() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        embargo_test_util::write_sample_snapshot(tmp.path());
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");

        let rows = run(root);
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            RenderableReconcileRow::OutOfSync {
                handle: "1794/1".to_string(),
                embargo_date: "2099-01-01".to_string(),
                public_access: "never".to_string(),
            }
        );
        assert_eq!(
            rows[1],
            RenderableReconcileRow::OutOfSync {
                handle: "1794/2".to_string(),
                embargo_date: "2099-01-01".to_string(),
                public_access: "open".to_string(),
            }
        );
        assert!(matches!(
            &rows[2],
            RenderableReconcileRow::Failed { handle, .. } if handle == "1794/3"
        ));
    }

    #[test]
    fn matching_dates_are_in_sync() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        write_json(tmp.path(), "groups.json", &sample_groups());
        write_json(
            tmp.path(),
            "items/1794-4.json",
            &sample_item(4, &[json!({ "group": 0, "start": "2099-01-02" })]),
        );
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");

        assert!(run(root).is_empty());
    }
}
