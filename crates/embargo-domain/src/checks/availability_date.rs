use crate::checks::utils::{object_data, object_finding, rule_policy};
use crate::policy::EffectiveConfig;
use crate::snapshot::AuditSnapshot;
use crate::terms::Availability;
use embargo_types::{ids, Finding};

/// The availability date anchors the embargo cap, so it must exist and not lie ahead.
pub fn run(snapshot: &AuditSnapshot, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = rule_policy(snapshot, cfg, ids::CHECK_EMBARGO_AVAILABILITY_DATE) else {
        return;
    };
    let handle = &snapshot.item.handle;
    let state = &snapshot.item_state;

    match snapshot.availability {
        Availability::Known(_) => {}
        Availability::Missing => out.push(object_finding(
            handle,
            state,
            policy.severity,
            ids::CHECK_EMBARGO_AVAILABILITY_DATE,
            ids::CODE_AVAILABILITY_DATE_MISSING,
            "Availability / accession date is empty or invalid".to_string(),
            Some("Repair the availability or accession date metadata."),
            object_data(handle, state),
        )),
        Availability::InFuture(d) => {
            let mut data = object_data(handle, state);
            data["available"] = d.to_string().into();
            out.push(object_finding(
                handle,
                state,
                policy.severity,
                ids::CHECK_EMBARGO_AVAILABILITY_DATE,
                ids::CODE_AVAILABILITY_DATE_IN_FUTURE,
                format!("Availability / accession date ({d}) is after today"),
                Some("Repair the availability or accession date metadata."),
                data,
            ));
        }
    }
}
