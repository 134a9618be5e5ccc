use crate::{RenderableListRow, RenderableReconcileRow};

/// Tab-separated item listing, one row per item, no header.
///
/// Columns: item url, handle, collection url, collection handle, embargo date (`N/A` when
/// none), and `T`/`F` for whether any restricted bitstream is protected.
pub fn render_tsv(rows: &[RenderableListRow]) -> String {
    let mut out = String::new();
    for r in rows {
        let fields = [
            r.url.as_str(),
            r.handle.as_str(),
            r.collection_url.as_deref().unwrap_or(""),
            r.collection_handle.as_deref().unwrap_or(""),
            r.embargo_date.as_deref().unwrap_or("N/A"),
            if r.protected { "T" } else { "F" },
        ];
        let fields: Vec<String> = fields.iter().map(|f| clean_field(f)).collect();
        out.push_str(&fields.join("\t"));
        out.push('\n');
    }
    out
}

/// Tabs and newlines would break the column layout.
fn clean_field(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

/// One line per item whose metadata and actual access disagree.
pub fn render_reconciliation(rows: &[RenderableReconcileRow]) -> String {
    let mut out = String::new();
    for r in rows {
        let line = match r {
            RenderableReconcileRow::OutOfSync {
                handle,
                embargo_date,
                public_access,
            } => format!(
                "Item {handle} has metadata embargo of {embargo_date} but public access of {public_access}"
            ),
            RenderableReconcileRow::Conflict { handle, detail } => {
                format!("ERROR: Item {handle} has out-of-sync public access dates: {detail}")
            }
            RenderableReconcileRow::Failed { handle, detail } => {
                format!("ERROR: Item {handle} could not be read: {detail}")
            }
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tsv_rows() {
        let rows = vec![
            RenderableListRow {
                url: "https://repo.example.edu/handle/1794/2".to_string(),
                handle: "1794/2".to_string(),
                collection_url: Some("https://repo.example.edu/handle/1794/100".to_string()),
                collection_handle: Some("1794/100".to_string()),
                embargo_date: Some("2099-01-01".to_string()),
                protected: true,
            },
            RenderableListRow {
                url: "https://repo.example.edu/handle/1794/4".to_string(),
                handle: "1794/4".to_string(),
                collection_url: None,
                collection_handle: None,
                embargo_date: None,
                protected: false,
            },
        ];

        insta::assert_snapshot!(render_tsv(&rows).replace('\t', " | "), @r"
        https://repo.example.edu/handle/1794/2 | 1794/2 | https://repo.example.edu/handle/1794/100 | 1794/100 | 2099-01-01 | T
        https://repo.example.edu/handle/1794/4 | 1794/4 |  |  | N/A | F
        ");
    }

    #[test]
    fn reconciliation_lines() {
        let out = render_reconciliation(&[
            RenderableReconcileRow::OutOfSync {
                handle: "1794/2".to_string(),
                embargo_date: "2099-01-01".to_string(),
                public_access: "open".to_string(),
            },
            RenderableReconcileRow::Conflict {
                handle: "1794/5".to_string(),
                detail: "restricted bitstreams disagree: open, 2031-01-01".to_string(),
            },
        ]);
        assert_eq!(
            out,
            "Item 1794/2 has metadata embargo of 2099-01-01 but public access of open\n\
             ERROR: Item 1794/5 has out-of-sync public access dates: restricted bitstreams disagree: open, 2031-01-01\n"
        );
    }
}
