#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableItemStatus {
    Valid,
    Invalid,
    NotAudited,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub severity: RenderableSeverity,
    pub check_id: String,
    pub code: String,
    pub message: String,
    /// Display name of the object the finding is about, e.g. `thesis.pdf (BITSTREAM)`.
    pub object: Option<String>,
    pub help: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableItem {
    pub handle: String,
    pub name: String,
    pub url: Option<String>,
    pub status: RenderableItemStatus,
    pub failure: Option<String>,
    pub findings: Vec<RenderableFinding>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub items_scanned: u32,
    pub items_valid: u32,
    pub items_invalid: u32,
    pub items_not_audited: u32,
    pub findings_emitted: u32,
    pub findings_total: u32,
    pub truncated_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub items: Vec<RenderableItem>,
    /// Findings about the run itself rather than an item.
    pub findings: Vec<RenderableFinding>,
    pub data: RenderableData,
}

/// One line of the item listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableListRow {
    pub url: String,
    pub handle: String,
    pub collection_url: Option<String>,
    pub collection_handle: Option<String>,
    pub embargo_date: Option<String>,
    /// Some restricted bitstream is protected.
    pub protected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderableReconcileRow {
    OutOfSync {
        handle: String,
        embargo_date: String,
        public_access: String,
    },
    Conflict {
        handle: String,
        detail: String,
    },
    Failed {
        handle: String,
        detail: String,
    },
}
