use crate::checks::readers::report_readers;
use crate::checks::utils::{object_data, object_finding, rule_policy};
use crate::policy::EffectiveConfig;
use crate::snapshot::AuditSnapshot;
use embargo_types::{ids, Finding};

/// Non-public-tier objects must be readable on campus or explicitly fully embargoed.
pub fn run(snapshot: &AuditSnapshot, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = rule_policy(snapshot, cfg, ids::CHECK_EMBARGO_CAMPUS_AVAILABILITY) else {
        return;
    };
    let handle = &snapshot.item.handle;

    for state in snapshot.non_public_objects() {
        let v = &state.visibility;
        if v.is_available_on_campus() || v.is_explicitly_fully_embargoed() {
            continue;
        }
        out.push(object_finding(
            handle,
            state,
            policy.severity,
            ids::CHECK_EMBARGO_CAMPUS_AVAILABILITY,
            ids::CODE_NOT_AVAILABLE_ON_CAMPUS,
            format!(
                "{} is neither publicly available nor available on campus",
                state.object.object_ref()
            ),
            Some("Grant READ to the campus-only group, or to Administrators for a full embargo."),
            object_data(handle, state),
        ));
        report_readers(handle, state, out);
    }
}
