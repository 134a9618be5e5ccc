//! Use case orchestration for embargo-audit.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod audit;
mod context;
mod explain;
mod list;
mod reconcile;
mod render;
mod report;

pub use audit::{report_exit_code, run_audit, AuditOutput};
pub use context::RunInput;
pub use explain::{format_explanation, format_not_found, run_explain, ExplainOutput};
pub use list::run_list;
pub use reconcile::run_reconcile;
pub use render::{render_annotations, render_markdown, render_reconciliation, render_tsv};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
