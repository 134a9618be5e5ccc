//! CLI entry point for embargo-audit.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `embargo-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use embargo_app::{
    format_explanation, format_not_found, parse_report_json, render_annotations, render_markdown,
    render_reconciliation, render_tsv, report_exit_code, run_audit, run_explain, run_list,
    run_reconcile, runtime_error_report, serialize_report, to_renderable, ExplainOutput, RunInput,
};
use embargo_settings::Overrides;
use embargo_types::{AuditReport, Handle};
use time::Date;

#[derive(Parser, Debug)]
#[command(
    name = "embargo-audit",
    version,
    about = "Audit repository items against an embargo access policy"
)]
struct Cli {
    /// Snapshot directory (contains groups.json and items/).
    #[arg(long, visible_alias = "repo", default_value = ".")]
    snapshot: Utf8PathBuf,

    /// Path to the config TOML, relative to the snapshot directory.
    #[arg(long, default_value = "embargo.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|warn|legacy or custom).
    #[arg(long)]
    profile: Option<String>,

    /// Override rule generation (protected-while-embargoed|capped-embargo, or v2|v1).
    #[arg(long)]
    generation: Option<String>,

    /// Override maximum findings to emit per item.
    #[arg(long)]
    max_findings: Option<u32>,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today.
    #[arg(long, value_parser = embargo_settings::parse_date)]
    today: Option<Date>,

    /// Only process these item handles (repeatable). Default: every item in the snapshot.
    #[arg(long = "item", value_name = "HANDLE")]
    items: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Audit items and write artifacts.
    Audit {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/embargo/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/embargo/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        #[arg(long, default_value = "artifacts/embargo/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        #[arg(long, default_value = "artifacts/embargo/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "embargo.protection") or code (e.g., "not_protected").
        identifier: String,
    },

    /// List items as TSV: url, handle, collection url, collection handle, embargo date, protected.
    List {
        /// Where to write the TSV (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Report items whose declared embargo date and public access date disagree.
    Reconcile,

    /// Print the JSON schema of the config file.
    Schema,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.cmd {
        Commands::Audit {
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_audit(&cli, report_out, *write_markdown, markdown_out),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
        Commands::List { output } => exit_on_error(cmd_list(&cli, output.as_deref())),
        Commands::Reconcile => exit_on_error(cmd_reconcile(&cli)),
        Commands::Schema => cmd_schema(),
    }
}

/// Canonical snapshot path and config text (empty when the file is missing).
fn load_inputs(cli: &Cli) -> anyhow::Result<(Utf8PathBuf, String)> {
    let snapshot = cli
        .snapshot
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.snapshot.clone());
    if !snapshot.is_dir() {
        anyhow::bail!("snapshot directory does not exist: {}", snapshot);
    }
    // Missing config file is allowed (defaults apply).
    let cfg_path = snapshot.join(&cli.config);
    let cfg_text = match std::fs::read_to_string(&cfg_path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %cfg_path, "no config file; using defaults");
            String::new()
        }
        Err(err) => return Err(err).with_context(|| format!("read config: {cfg_path}")),
    };
    Ok((snapshot, cfg_text))
}

fn run_input<'a>(cli: &Cli, snapshot: &'a Utf8Path, cfg_text: &'a str) -> RunInput<'a> {
    RunInput {
        snapshot_root: snapshot,
        config_text: cfg_text,
        overrides: Overrides {
            profile: cli.profile.clone(),
            generation: cli.generation.clone(),
            max_findings: cli.max_findings,
        },
        today: cli.today,
        handles: cli.items.iter().map(Handle::new).collect(),
    }
}

fn cmd_audit(
    cli: &Cli,
    report_out: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let (snapshot, cfg_text) = load_inputs(cli)?;
        let output = run_audit(run_input(cli, &snapshot, &cfg_text))?;

        write_report_file(report_out, &output.report).context("write report json")?;

        if write_markdown {
            let md = render_markdown(&to_renderable(&output.report));
            write_text_file(markdown_out, &md).context("write markdown")?;
        }

        Ok(report_exit_code(&output.report))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            if let Err(write_err) = write_report_file(report_out, &report) {
                tracing::warn!(error = %format!("{write_err:#}"), "could not write error report");
            }
            eprintln!("embargo-audit error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_list(cli: &Cli, output: Option<&Utf8Path>) -> anyhow::Result<i32> {
    let (snapshot, cfg_text) = load_inputs(cli)?;
    let rows = run_list(run_input(cli, &snapshot, &cfg_text))?;
    let tsv = render_tsv(&rows);
    match output {
        Some(path) => write_text_file(path, &tsv).context("write tsv output")?,
        None => print!("{tsv}"),
    }
    Ok(0)
}

/// Exit 2 when any item is reported.
fn cmd_reconcile(cli: &Cli) -> anyhow::Result<i32> {
    let (snapshot, cfg_text) = load_inputs(cli)?;
    let rows = run_reconcile(run_input(cli, &snapshot, &cfg_text))?;
    print!("{}", render_reconciliation(&rows));
    Ok(if rows.is_empty() { 0 } else { 2 })
}

fn exit_on_error(result: anyhow::Result<i32>) -> anyhow::Result<()> {
    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("embargo-audit error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &AuditReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<AuditReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    let md = render_markdown(&to_renderable(&report));

    match output {
        Some(out_path) => write_text_file(out_path, &md).context("write markdown output")?,
        None => print!("{}", md),
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}

fn cmd_schema() -> anyhow::Result<()> {
    let schema = embargo_settings::config_schema();
    let text = serde_json::to_string_pretty(&schema).context("serialize config schema")?;
    println!("{text}");
    Ok(())
}
