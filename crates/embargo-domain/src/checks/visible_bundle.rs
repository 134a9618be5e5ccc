use crate::checks::readers::report_readers;
use crate::checks::utils::{object_data, object_finding, rule_policy};
use crate::policy::EffectiveConfig;
use crate::snapshot::AuditSnapshot;
use crate::tier::Tier;
use embargo_types::{ids, Finding};

/// Visible-tier bundle containers must be public; their bitstreams are not checked here.
pub fn run(snapshot: &AuditSnapshot, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = rule_policy(snapshot, cfg, ids::CHECK_EMBARGO_VISIBLE_BUNDLE) else {
        return;
    };
    let handle = &snapshot.item.handle;

    for bundle in snapshot.bundles.iter().filter(|b| b.tier == Tier::Visible) {
        let state = &bundle.bundle;
        if state.visibility.is_public() {
            continue;
        }
        out.push(object_finding(
            handle,
            state,
            policy.severity,
            ids::CHECK_EMBARGO_VISIBLE_BUNDLE,
            ids::CODE_CONTAINER_NOT_PUBLIC,
            format!(
                "{} is a visible container but isn't public (anonymous access)",
                state.object.object_ref()
            ),
            Some("Grant Anonymous READ on the bundle; keep restrictions on its bitstreams."),
            object_data(handle, state),
        ));
        report_readers(handle, state, out);
    }
}
