use crate::policy::FailOn;
use embargo_types::{Finding, Handle, ItemStatus, Severity, Verdict};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub info: u32,
    pub warning: u32,
    pub error: u32,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            match f.severity {
                Severity::Info => counts.info += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Error => counts.error += 1,
            }
        }
        counts
    }

    pub fn add(&mut self, other: &SeverityCounts) {
        self.info += other.info;
        self.warning += other.warning;
        self.error += other.error;
    }
}

/// Outcome of auditing one item.
#[derive(Clone, Debug)]
pub struct ItemAudit {
    pub handle: Handle,
    pub name: String,
    /// Findings in emission order, possibly truncated.
    pub findings: Vec<Finding>,
    /// Number of findings before truncation.
    pub findings_total: u32,
    pub truncated_reason: Option<String>,
    pub objects_scanned: u32,
    /// Counted before truncation, so dropping findings never changes validity.
    pub counts: SeverityCounts,
}

impl ItemAudit {
    pub fn is_valid(&self) -> bool {
        self.counts.error == 0
    }

    pub fn errors(&self) -> Vec<&str> {
        self.messages(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.messages(Severity::Warning)
    }

    pub fn infos(&self) -> Vec<&str> {
        self.messages(Severity::Info)
    }

    /// `(is_valid, errors, warnings, infos)`.
    pub fn outcome(&self) -> (bool, Vec<&str>, Vec<&str>, Vec<&str>) {
        (self.is_valid(), self.errors(), self.warnings(), self.infos())
    }

    pub fn status(&self) -> ItemStatus {
        if self.is_valid() {
            ItemStatus::Valid
        } else {
            ItemStatus::Invalid
        }
    }

    pub fn verdict(&self, fail_on: FailOn) -> Verdict {
        compute_verdict(&self.counts, fail_on)
    }

    fn messages(&self, severity: Severity) -> Vec<&str> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .map(|f| f.message.as_str())
            .collect()
    }
}

pub fn compute_verdict(counts: &SeverityCounts, fail_on: FailOn) -> Verdict {
    if counts.error > 0 {
        return Verdict::Fail;
    }

    if counts.warning > 0 {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    Verdict::Pass
}
