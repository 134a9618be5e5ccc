use crate::fingerprint::fingerprint_for_object;
use crate::policy::{CheckPolicy, EffectiveConfig};
use crate::snapshot::AuditSnapshot;
use crate::visibility::ObjectState;
use embargo_types::{Finding, Handle, Severity};
use serde_json::{Value, json};
use time::Date;

/// The policy for `check_id`, unless the check is disabled or the item is allow-listed.
pub fn rule_policy<'a>(
    snapshot: &AuditSnapshot,
    cfg: &'a EffectiveConfig,
    check_id: &str,
) -> Option<&'a CheckPolicy> {
    item_policy(&snapshot.item.handle, cfg, check_id)
}

pub fn item_policy<'a>(
    handle: &Handle,
    cfg: &'a EffectiveConfig,
    check_id: &str,
) -> Option<&'a CheckPolicy> {
    cfg.check_policy(check_id)
        .filter(|policy| !policy.allow.matches(handle.as_str()))
}

/// Finding about one content object of an item.
#[allow(clippy::too_many_arguments)]
pub fn object_finding(
    handle: &Handle,
    state: &ObjectState,
    severity: Severity,
    check_id: &str,
    code: &str,
    message: String,
    help: Option<&str>,
    data: Value,
) -> Finding {
    let object = state.object.object_ref();
    let fingerprint = fingerprint_for_object(
        check_id,
        code,
        handle.as_str(),
        Some((object.kind.type_text(), object.id.as_str())),
    );
    Finding {
        severity,
        check_id: check_id.to_string(),
        code: code.to_string(),
        message,
        object: Some(object),
        help: help.map(str::to_string),
        fingerprint: Some(fingerprint),
        data,
    }
}

/// Structured payload shared by most object findings.
pub fn object_data(handle: &Handle, state: &ObjectState) -> Value {
    json!({
        "item": handle.as_str(),
        "object_type": state.object.kind.type_text(),
        "object_id": state.object.id.0,
        "name": state.object.name,
        "public": state.visibility.public,
        "on_campus": state.visibility.on_campus,
        "fully_embargoed": state.visibility.fully_embargoed,
        "grants": state.entries.len(),
    })
}

/// `forever`, `until E`, `starting S`, or `from S until E`.
pub fn window_text(start: Option<Date>, end: Option<Date>) -> String {
    match (start, end) {
        (None, None) => "forever".to_string(),
        (None, Some(e)) => format!("until {e}"),
        (Some(s), None) => format!("starting {s}"),
        (Some(s), Some(e)) => format!("from {s} until {e}"),
    }
}
