use crate::checks::utils::{object_finding, window_text};
use crate::model::GrantDefect;
use crate::visibility::ObjectState;
use embargo_types::{ids, Finding, Handle, Severity};
use serde_json::json;

/// Info trail listing every read grant on `state`, emitted right after a finding about it.
pub fn report_readers(handle: &Handle, state: &ObjectState, out: &mut Vec<Finding>) {
    for (entry, roles) in state.entries_with_roles() {
        let grantee = ObjectState::grantee_label(entry, roles);
        let window = match &entry.defect {
            Some(defect @ GrantDefect::BadDate { .. }) => format!("with {}", defect.describe()),
            _ => window_text(entry.start, entry.end),
        };
        let mut finding = object_finding(
            handle,
            state,
            Severity::Info,
            ids::CHECK_EMBARGO_READERS,
            ids::CODE_READ_GRANT,
            format!(
                "{} has permission to read {} {}",
                grantee,
                state.object.object_ref(),
                window
            ),
            None,
            json!({
                "grantee": grantee,
                "start": entry.start.map(|d| d.to_string()),
                "end": entry.end.map(|d| d.to_string()),
            }),
        );
        // Trail entries are not individually tracked.
        finding.fingerprint = None;
        out.push(finding);
    }
}
