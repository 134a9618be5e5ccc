use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for an object finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - item handle
/// - object type tag and id (if the finding names an object)
pub fn fingerprint_for_object(
    check_id: &str,
    code: &str,
    item_handle: &str,
    object: Option<(&str, &str)>,
) -> String {
    let mut parts = vec![check_id, code, item_handle];
    if let Some((kind, id)) = object {
        parts.push(kind);
        parts.push(id);
    }
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
