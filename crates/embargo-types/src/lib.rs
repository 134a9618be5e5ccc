//! Stable DTOs and IDs used across the embargo-audit workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted audit report
//! - stable string IDs and codes
//! - canonical item handle handling
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod handle;
pub mod ids;
pub mod receipt;

pub use explain::{lookup_explanation, Explanation};
pub use handle::Handle;
pub use receipt::{
    AuditData, AuditReport, Finding, ItemResult, ItemStatus, ObjectKind, ObjectRef, Severity,
    ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
