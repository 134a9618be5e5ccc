//! Rendering utilities for people and CI surfaces (Markdown, GitHub annotations, TSV).

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;
mod tsv;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableFinding, RenderableItem, RenderableItemStatus, RenderableListRow,
    RenderableReconcileRow, RenderableReport, RenderableSeverity, RenderableVerdictStatus,
};
pub use tsv::{render_reconciliation, render_tsv};
