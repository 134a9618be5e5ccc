use crate::checks::readers::report_readers;
use crate::checks::utils::{object_data, object_finding, rule_policy};
use crate::policy::EffectiveConfig;
use crate::snapshot::AuditSnapshot;
use embargo_types::{ids, Finding};

/// While the declared embargo date is ahead, non-public-tier bitstreams must be protected.
///
/// Bundles themselves are not required to be protected, only their bitstreams.
pub fn run(snapshot: &AuditSnapshot, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = rule_policy(snapshot, cfg, ids::CHECK_EMBARGO_PROTECTION) else {
        return;
    };
    if !snapshot.is_under_embargo() {
        return;
    }
    let Some(embargo_date) = snapshot.terms.date() else {
        return;
    };
    let handle = &snapshot.item.handle;

    for bundle in snapshot.non_public_bundles() {
        for state in &bundle.bitstreams {
            if state.visibility.is_protected() {
                continue;
            }
            let mut data = object_data(handle, state);
            data["embargo_date"] = embargo_date.to_string().into();
            out.push(object_finding(
                handle,
                state,
                policy.severity,
                ids::CHECK_EMBARGO_PROTECTION,
                ids::CODE_NOT_PROTECTED,
                format!(
                    "{} is expected to be protected (embargoed until {}), but isn't",
                    state.object.object_ref(),
                    embargo_date
                ),
                Some("Remove the Anonymous READ grant or start it on the embargo date."),
                data,
            ));
            report_readers(handle, state, out);
        }
    }
}
