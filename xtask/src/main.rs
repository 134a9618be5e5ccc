//! Developer tasks (schema generation, explain coverage, smoke runs).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use camino::Utf8Path;
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    if manifest_dir.ends_with("xtask")
        && let Some(parent) = manifest_dir.parent()
    {
        return Ok(parent.to_path_buf());
    }
    Ok(manifest_dir)
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(embargo_types::AuditReport)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "embargo.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "embargo.config.v1.json",
            generate: embargo_settings::config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json).with_context(|| format!("write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Fails when a schema under `schemas/` is missing or differs from the generated one.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut stale = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        let expected = serialize_schema(&(spec.generate)())?;
        match fs::read_to_string(&path) {
            Ok(actual) if actual == expected => {}
            Ok(_) => stale.push(format!("{} (out of date)", spec.filename)),
            Err(_) => stale.push(format!("{} (missing)", spec.filename)),
        }
    }

    if stale.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    for name in &stale {
        eprintln!("  - {name}");
    }
    eprintln!("\nRun `cargo run -p xtask -- emit-schemas` to regenerate.");
    bail!("schema validation failed")
}

fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = embargo_types::explain::all_check_ids();
    let codes = embargo_types::explain::all_codes();

    let mut errors = Vec::new();
    for id in check_ids.iter().chain(codes) {
        match embargo_types::lookup_explanation(id) {
            Some(exp) => {
                for (field, value) in [
                    ("title", exp.title),
                    ("description", exp.description),
                    ("remediation", exp.remediation),
                ] {
                    if value.trim().is_empty() {
                        errors.push(format!("'{id}' has empty {field}"));
                    }
                }
            }
            None => errors.push(format!("'{id}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!(
            "{} check IDs and {} codes have explanations",
            check_ids.len(),
            codes.len()
        );
        return Ok(());
    }
    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!("explain coverage failed with {} errors", errors.len())
}

/// Audit the sample snapshot and check the report survives a serialize/parse cycle.
fn smoke() -> anyhow::Result<()> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    embargo_test_util::write_sample_snapshot(dir.path());
    let root = Utf8Path::from_path(dir.path()).context("temp dir is not utf-8")?;

    let output = embargo_app::run_audit(embargo_app::RunInput {
        snapshot_root: root,
        config_text: "",
        overrides: embargo_settings::Overrides::default(),
        today: Some(time::macros::date!(2024 - 06 - 01)),
        handles: Vec::new(),
    })?;
    let bytes = embargo_app::serialize_report(&output.report)?;
    let text = String::from_utf8(bytes).context("report is not utf-8")?;
    let parsed = embargo_app::parse_report_json(&text)?;

    let d = &parsed.data;
    if (d.items_scanned, d.items_valid, d.items_invalid, d.items_not_audited) != (3, 1, 1, 1) {
        bail!("unexpected sample audit summary: {d:?}");
    }
    println!(
        "sample audit: verdict {:?}, exit code {}",
        parsed.verdict,
        embargo_app::report_exit_code(&parsed)
    );
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
    eprintln!("  smoke             Audit the sample snapshot end to end");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "explain-coverage" => explain_coverage(),
        "smoke" => smoke(),
        other => bail!("unknown xtask command: {other}\n\nRun `cargo run -p xtask -- help` for usage."),
    }
    .context("xtask failed")
}
