use crate::checks::readers::report_readers;
use crate::checks::utils::{object_data, object_finding, rule_policy};
use crate::policy::EffectiveConfig;
use crate::snapshot::AuditSnapshot;
use crate::tier::Tier;
use embargo_types::{ids, Finding};

/// Public-tier bundles and every bitstream in them must be public.
pub fn run(snapshot: &AuditSnapshot, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = rule_policy(snapshot, cfg, ids::CHECK_EMBARGO_PUBLIC_BUNDLE) else {
        return;
    };
    let handle = &snapshot.item.handle;

    for bundle in snapshot.bundles.iter().filter(|b| b.tier == Tier::Public) {
        for state in std::iter::once(&bundle.bundle).chain(bundle.bitstreams.iter()) {
            if state.visibility.is_public() {
                continue;
            }
            let mut data = object_data(handle, state);
            data["bundle"] = bundle.bundle.object.name.clone().into();
            out.push(object_finding(
                handle,
                state,
                policy.severity,
                ids::CHECK_EMBARGO_PUBLIC_BUNDLE,
                ids::CODE_NOT_PUBLIC,
                format!(
                    "{} expected to be public (anonymous access), but isn't",
                    state.object.object_ref()
                ),
                Some("Grant Anonymous READ with no end date."),
                data,
            ));
            report_readers(handle, state, out);
        }
    }
}
