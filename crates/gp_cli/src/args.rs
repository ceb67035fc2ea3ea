// crates/gp_cli/src/args.rs
//
// Offline CLI argument surface (types + checks).
//
// Rules:
// - Scenario and output paths must be local (reject any scheme:// like http/https/file)
// - The scenario file must exist
// - At most one of --target / --grade (either may also come from the scenario)
// - --validate-only loads and validates without planning

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use gp_core::{LetterGrade, Policy};

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "gp",
    disable_help_subcommand = true,
    about = "Minimum remaining scores needed to reach a target final grade"
)]
pub struct Args {
    /// Scenario JSON path (weights or categories, completed scores, target).
    #[arg(long)]
    pub scenario: PathBuf,

    /// Allocation policy: equal | proportional. Overrides the scenario and GP_DEFAULT_POLICY.
    #[arg(long, value_parser = parse_policy)]
    pub policy: Option<Policy>,

    /// Target final percentage in [0, 100].
    #[arg(long, conflicts_with = "grade")]
    pub target: Option<f64>,

    /// Target letter grade (A, A-, B+, …); uses the grade's threshold.
    #[arg(long, value_parser = parse_grade)]
    pub grade: Option<LetterGrade>,

    /// Write the plan as canonical JSON to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Load and validate the scenario only, do not plan.
    #[arg(long)]
    pub validate_only: bool,

    /// Only log errors and suppress the stderr summary.
    #[arg(long)]
    pub quiet: bool,

    /// Log filter (e.g. `debug`, `gp_pipeline=trace`). RUST_LOG wins when set.
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            CliError::NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    check(Args::parse())
}

fn check(args: Args) -> Result<Args, CliError> {
    ensure_local_exists(&args.scenario, "--scenario")?;
    if let Some(out) = &args.out {
        ensure_local_path(out)?;
    }
    Ok(args)
}

fn parse_policy(s: &str) -> Result<Policy, String> {
    s.parse().map_err(|_| format!("unknown policy '{s}' (expected equal | proportional)"))
}

fn parse_grade(s: &str) -> Result<LetterGrade, String> {
    s.parse().map_err(|_| format!("unknown letter grade '{s}'"))
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    match p.to_str() {
        Some(s) if has_scheme(s) => Err(CliError::NonLocalPath(s.to_string())),
        _ => Ok(()),
    }
}

/// Ensure a path is local (no scheme) and exists as a regular file.
fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    match fs::metadata(p) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(CliError::NotFound(format!("{label} {}", p.display()))),
    }
}
