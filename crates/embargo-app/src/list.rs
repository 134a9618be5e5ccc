//! The `list` use case: one TSV-ready row per item.

use crate::context::{prepare, RunInput};
use embargo_render::RenderableListRow;

/// List the selected items with their embargo date and protection state.
///
/// Needs `base_url` for the url columns. Items whose data cannot be read are logged and left
/// out of the listing.
pub fn run_list(input: RunInput<'_>) -> anyhow::Result<Vec<RenderableListRow>> {
    let prepared = prepare(&input)?;
    let Some(base_url) = prepared.resolved.base_url.clone() else {
        anyhow::bail!("base_url is not configured; listing needs it to build item urls");
    };

    let rows: Vec<RenderableListRow> = prepared
        .snapshots()
        .into_iter()
        .filter_map(|(item, snapshot)| {
            let snapshot = snapshot.ok()?;
            Some(RenderableListRow {
                url: item.handle.url(&base_url),
                handle: item.handle.to_string(),
                collection_url: item.collection.as_ref().map(|c| c.url(&base_url)),
                collection_handle: item.collection.as_ref().map(ToString::to_string),
                embargo_date: snapshot.terms.date().map(|d| d.to_string()),
                protected: snapshot.has_protected_content(),
            })
        })
        .collect();

    tracing::info!(
        listed = rows.len(),
        selected = prepared.items.len(),
        "items listed"
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use embargo_settings::Overrides;
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
    fn lists_readable_items() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        embargo_test_util::write_sample_snapshot(tmp.path());
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");

        let rows = run_list(input(root, "base_url = \"https://repo.example.edu/\"")).expect("list");
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].url, "https://repo.example.edu/handle/1794/1");
        assert_eq!(
            rows[0].collection_url.as_deref(),
            Some("https://repo.example.edu/handle/1794/100")
        );
        assert_eq!(rows[0].embargo_date.as_deref(), Some("2099-01-01"));
        assert!(rows[0].protected);

        assert_eq!(rows[1].handle, "1794/2");
        assert!(!rows[1].protected);
    }

    #[test]
    fn requires_base_url() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        embargo_test_util::write_sample_snapshot(tmp.path());
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");

        let err = run_list(input(root, "")).unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }
}
