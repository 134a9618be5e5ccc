use crate::checks::utils::rule_policy;
use crate::fingerprint::fingerprint_for_object;
use crate::policy::EffectiveConfig;
use crate::snapshot::AuditSnapshot;
use crate::terms::EmbargoTerms;
use embargo_types::{ids, Finding};
use serde_json::json;

pub fn run(snapshot: &AuditSnapshot, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = rule_policy(snapshot, cfg, ids::CHECK_EMBARGO_TERMS) else {
        return;
    };
    let EmbargoTerms::Unparseable(raw) = &snapshot.terms else {
        return;
    };

    let handle = snapshot.item.handle.as_str();
    out.push(Finding {
        severity: policy.severity,
        check_id: ids::CHECK_EMBARGO_TERMS.to_string(),
        code: ids::CODE_TERMS_UNPARSEABLE.to_string(),
        message: format!("embargo terms '{raw}' are not a date or the open sentinel"),
        object: Some(snapshot.item.object.object_ref()),
        help: Some("Use an ISO date (YYYY-MM-DD) or the configured open sentinel.".to_string()),
        fingerprint: Some(fingerprint_for_object(
            ids::CHECK_EMBARGO_TERMS,
            ids::CODE_TERMS_UNPARSEABLE,
            handle,
            None,
        )),
        data: json!({
            "item": handle,
            "terms": raw,
        }),
    });
}
