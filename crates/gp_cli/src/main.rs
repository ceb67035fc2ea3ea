// crates/gp_cli/src/main.rs
//
// `gp`: load a scenario, run the planner, emit the plan as JSON.
// stdout carries the plan (unless --out); stderr carries logs and the summary.

mod args;
mod config;
mod telemetry;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const INFEASIBLE: i32 = 3;
    pub const IO: i32 = 4;
}

use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Args};
use config::CliConfig;
use gp_io::canonical_json::write_canonical_file;
use gp_io::scenario::{load_scenario, Overrides, Resolved};
use gp_io::IoError;
use gp_pipeline::{plan, validate, PipelineError, PlanInput, PlanOutcome, PlanRun};
use tracing::{debug, error};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Bad flags, config, scenario shape or input values.
    Validation(String),
    /// The plan ran; the target cannot be reached.
    Infeasible(String),
    /// Read/write/path failures.
    Io(String),
}

impl MainError {
    fn code(&self) -> i32 {
        match self {
            MainError::Validation(_) => exitcodes::VALIDATION,
            MainError::Infeasible(_) => exitcodes::INFEASIBLE,
            MainError::Io(_) => exitcodes::IO,
        }
    }

    fn message(&self) -> &str {
        match self {
            MainError::Validation(m) | MainError::Infeasible(m) | MainError::Io(m) => m,
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("gp: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    let cfg = match CliConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("gp: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    let level = match (&args.log_level, args.quiet) {
        (Some(l), _) => l.clone(),
        (None, true) => "error".to_string(),
        (None, false) => cfg.log_level.clone(),
    };
    if let Err(e) = telemetry::init(&level) {
        eprintln!("gp: error: {}", e.message());
        return ExitCode::from(e.code() as u8);
    }

    let rc = match run(&args, &cfg) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            if !args.quiet || !matches!(e, MainError::Infeasible(_)) {
                eprintln!("gp: {}", e.message());
            }
            error!(code = e.code(), "{}", e.message());
            e.code()
        }
    };
    ExitCode::from(rc as u8)
}

fn run(args: &Args, cfg: &CliConfig) -> Result<(), MainError> {
    let overrides = Overrides {
        policy: args.policy,
        target: args.target,
        grade: args.grade,
        default_policy: cfg.default_policy,
    };
    let Resolved { weights, completed, target, params } = load_scenario(&args.scenario)
        .and_then(|s| s.resolve(&overrides))
        .map_err(map_io_err)?;
    let input = PlanInput { weights, completed, target };
    debug!(policy = %params.policy, target, items = input.weights.len(), "resolved scenario");

    if args.validate_only {
        let report = validate(&input, &params);
        if !report.pass {
            return Err(map_pipeline_err(PipelineError::Invalid(report.errors().cloned().collect())));
        }
        if !args.quiet {
            eprintln!("validate-only: inputs OK ({} warning(s))", report.warnings().count());
        }
        return Ok(());
    }

    let run = plan(&input, &params).map_err(map_pipeline_err)?;
    emit(args, &run)?;

    match &run.outcome {
        PlanOutcome::Infeasible(inf) => Err(MainError::Infeasible(format!(
            "target {:.2} unreachable: at most {:.2} ({}) is possible",
            inf.target, inf.max_possible, inf.best_reachable
        ))),
        PlanOutcome::Planned(r) | PlanOutcome::AllComplete(r) => {
            if !args.quiet {
                eprintln!(
                    "plan: projected {:.2} ({}) for target {:.2}, {} warning(s)",
                    r.verification.projected_total,
                    r.projected_grade,
                    r.target,
                    run.warnings.len()
                );
            }
            Ok(())
        }
    }
}

fn emit(args: &Args, run: &PlanRun) -> Result<(), MainError> {
    match &args.out {
        Some(path) => write_canonical_file(path, run).map_err(map_io_err),
        None => {
            let text = serde_json::to_string_pretty(run)
                .map_err(|e| MainError::Io(format!("serialize plan: {e}")))?;
            println!("{text}");
            Ok(())
        }
    }
}

/// Translate gp_io::IoError into MainError buckets for exit-code mapping.
fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        IoError::Invalid(m) => MainError::Validation(format!("scenario: {m}")),
        IoError::Path(m) => MainError::Io(format!("path: {m}")),
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    MainError::Validation(e.to_string())
}
