use crate::checks::readers::report_readers;
use crate::checks::utils::{item_policy, object_data, object_finding};
use crate::model::Item;
use crate::policy::EffectiveConfig;
use crate::visibility::ObjectState;
use embargo_types::{ids, Finding};

/// The item node itself must be public. Returns true when a finding was emitted.
pub fn run(item: &Item, state: &ObjectState, cfg: &EffectiveConfig, out: &mut Vec<Finding>) -> bool {
    let Some(policy) = item_policy(&item.handle, cfg, ids::CHECK_EMBARGO_ITEM_PUBLIC) else {
        return false;
    };
    if state.visibility.is_public() {
        return false;
    }

    out.push(object_finding(
        &item.handle,
        state,
        policy.severity,
        ids::CHECK_EMBARGO_ITEM_PUBLIC,
        ids::CODE_ITEM_NOT_PUBLIC,
        format!(
            "{} expected to be public (anonymous access), but isn't",
            state.object.object_ref()
        ),
        Some("Grant Anonymous READ on the item with no end date; embargo the bitstreams instead."),
        object_data(&item.handle, state),
    ));
    report_readers(&item.handle, state, out);
    true
}
