use crate::checks::utils::{object_data, object_finding, rule_policy};
use crate::model::Grantee;
use crate::policy::EffectiveConfig;
use crate::snapshot::AuditSnapshot;
use embargo_types::{ids, Finding};
use std::collections::BTreeSet;

/// Grants the other rules cannot interpret: no grantee, malformed entries, dangling groups.
pub fn run(snapshot: &AuditSnapshot, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = rule_policy(snapshot, cfg, ids::CHECK_POLICY_GRANTS) else {
        return;
    };
    let handle = &snapshot.item.handle;

    for state in snapshot.objects() {
        let missing = state
            .entries
            .iter()
            .filter(|e| e.grantee == Grantee::Missing)
            .count();
        if missing > 0 {
            let mut data = object_data(handle, state);
            data["missing_grantee_entries"] = missing.into();
            out.push(object_finding(
                handle,
                state,
                policy.severity,
                ids::CHECK_POLICY_GRANTS,
                ids::CODE_MISSING_GRANTEE,
                format!(
                    "{} has {} read grant(s) with neither a person nor a group",
                    state.object.object_ref(),
                    missing
                ),
                Some("Delete the grant or re-create it for a person or group."),
                data,
            ));
        }

        for entry in &state.entries {
            let Some(defect) = &entry.defect else {
                continue;
            };
            let mut data = object_data(handle, state);
            data["defect"] = defect.describe().into();
            out.push(object_finding(
                handle,
                state,
                policy.severity,
                ids::CHECK_POLICY_GRANTS,
                ids::CODE_MALFORMED_GRANT,
                format!(
                    "{} has a malformed read grant: {}",
                    state.object.object_ref(),
                    defect.describe()
                ),
                Some("Re-create the grant with ISO dates and a single grantee."),
                data,
            ));
        }

        let unresolved: BTreeSet<u64> = state
            .grants
            .iter()
            .flat_map(|g| g.unresolved.iter().map(|id| id.0))
            .collect();
        for group_id in unresolved {
            let mut data = object_data(handle, state);
            data["group_id"] = group_id.into();
            out.push(object_finding(
                handle,
                state,
                policy.severity,
                ids::CHECK_POLICY_GRANTS,
                ids::CODE_UNRESOLVED_GROUP,
                format!(
                    "{} is granted through group #{} which the directory does not know",
                    state.object.object_ref(),
                    group_id
                ),
                Some("Remove the dangling group reference or restore the group."),
                data,
            ));
        }
    }
}
