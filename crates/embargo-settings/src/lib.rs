//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{BundlesConfig, CheckConfig, EmbargoConfigV1, GrandfatherConfig, RolesConfig};
pub use resolve::{parse_date, Overrides, ResolvedConfig};

/// Parse `embargo.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<EmbargoConfigV1> {
    let cfg: EmbargoConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profiles + overrides + per-check config).
pub fn resolve_config(cfg: EmbargoConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// JSON schema of `embargo.toml`, for editor tooling.
pub fn config_schema() -> schemars::Schema {
    schemars::schema_for!(EmbargoConfigV1)
}
