use crate::checks::utils::{object_data, object_finding, rule_policy, window_text};
use crate::policy::EffectiveConfig;
use crate::snapshot::AuditSnapshot;
use crate::terms::add_years;
use embargo_types::{ids, Finding, Severity};

/// Capped embargo: every non-public-tier object must become public for good, no later than
/// `max_embargo_years` after the item's availability date. Grandfathered items are exempt.
pub fn run(snapshot: &AuditSnapshot, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = rule_policy(snapshot, cfg, ids::CHECK_EMBARGO_PUBLIC_ACCESS_DATE) else {
        return;
    };
    // Without a usable availability date there is nothing to measure the cap from.
    let Some(available) = snapshot.availability.known() else {
        return;
    };
    let handle = &snapshot.item.handle;

    if cfg.grandfather.is_some_and(|w| w.contains(available)) {
        let mut data = object_data(handle, &snapshot.item_state);
        data["available"] = available.to_string().into();
        out.push(object_finding(
            handle,
            &snapshot.item_state,
            Severity::Info,
            ids::CHECK_EMBARGO_PUBLIC_ACCESS_DATE,
            ids::CODE_GRANDFATHERED,
            format!("item is grandfathered (available {available})"),
            None,
            data,
        ));
        return;
    }

    let Some(cap) = add_years(available, cfg.max_embargo_years) else {
        return;
    };

    for state in snapshot.non_public_objects() {
        let object = state.object.object_ref();
        let Some(grant) = state.public_grant() else {
            out.push(object_finding(
                handle,
                state,
                policy.severity,
                ids::CHECK_EMBARGO_PUBLIC_ACCESS_DATE,
                ids::CODE_NO_PUBLIC_GRANT,
                format!("{object} has no public read grant and will never become public"),
                Some("Add an Anonymous READ grant starting on the embargo end date."),
                object_data(handle, state),
            ));
            continue;
        };

        let mut info = object_finding(
            handle,
            state,
            Severity::Info,
            ids::CHECK_EMBARGO_READERS,
            ids::CODE_READ_GRANT,
            format!(
                "{object} public read grant {}",
                window_text(grant.start, grant.end)
            ),
            None,
            serde_json::Value::Null,
        );
        info.fingerprint = None;
        out.push(info);

        let mut data = object_data(handle, state);
        data["available"] = available.to_string().into();
        data["cap"] = cap.to_string().into();

        if let Some(end) = grant.end {
            data["end"] = end.to_string().into();
            out.push(object_finding(
                handle,
                state,
                policy.severity,
                ids::CHECK_EMBARGO_PUBLIC_ACCESS_DATE,
                ids::CODE_PUBLIC_ACCESS_EXPIRES,
                format!("{object} public access ends on {end}; it must not expire"),
                Some("Remove the end date from the Anonymous READ grant."),
                data,
            ));
            continue;
        }

        if let Some(start) = grant.start.filter(|s| *s > cap) {
            data["start"] = start.to_string().into();
            out.push(object_finding(
                handle,
                state,
                policy.severity,
                ids::CHECK_EMBARGO_PUBLIC_ACCESS_DATE,
                ids::CODE_PUBLIC_ACCESS_TOO_LATE,
                format!(
                    "{object} becomes public on {start}, more than {} year(s) after availability ({available})",
                    cfg.max_embargo_years
                ),
                Some("Start the Anonymous READ grant within the embargo cap."),
                data,
            ));
        }
    }
}
