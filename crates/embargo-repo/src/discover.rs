use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

/// Item files under `<root>/items`, sorted by relative path.
///
/// Only `*.json` files count; anything else in the tree is ignored.
pub fn discover_item_files(root: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let items_dir = root.join("items");
    anyhow::ensure!(items_dir.is_dir(), "missing items directory: {items_dir}");

    let mut out = Vec::new();
    for entry in WalkDir::new(&items_dir) {
        let entry = entry.with_context(|| format!("walk {items_dir}"))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(path) = Utf8Path::from_path(entry.path()) else {
            continue;
        };
        if path.extension() == Some("json") {
            out.push(path.to_path_buf());
        }
    }
    out.sort();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_nested_json_files_in_order() {
        let tmp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
        for rel in ["items/b/2.json", "items/a.json", "items/b/notes.txt", "groups.json"] {
            let p = root.join(rel);
            std::fs::create_dir_all(p.parent().expect("parent")).expect("mkdir");
            std::fs::write(&p, "{}").expect("write");
        }

        let found = discover_item_files(&root).expect("discover");
        let rel: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(&root).expect("prefix").as_str().replace('\\', "/"))
            .collect();
        assert_eq!(rel, vec!["items/a.json", "items/b/2.json"]);
    }

    #[test]
    fn missing_items_directory_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
        assert!(discover_item_files(&root).is_err());
    }
}
