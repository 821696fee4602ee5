//! Command-line driver: prints `no` for an unsatisfiable knowledge base and
//! `yes` for a satisfiable one.

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use folres::{
    decide_with_stats, parse_cnf_file, parse_json_file, ParsedProblem, ProverConfig, ProverError,
    RunReportJson,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Cnf,
    Json,
}

#[derive(Parser)]
#[command(name = "folres")]
#[command(about = "Decide satisfiability of a first-order CNF knowledge base by resolution")]
#[command(version)]
struct Cli {
    /// Knowledge base file (.cnf or .json)
    kb: PathBuf,

    /// Input format (default: from the file extension)
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// JSON file with prover settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Upper bound on stored clauses (0 = no limit)
    #[arg(long)]
    max_clauses: Option<usize>,

    /// Upper bound on saturation passes (0 = no limit)
    #[arg(long)]
    max_passes: Option<usize>,

    /// Resolve each pass on all cores
    #[arg(long)]
    parallel: bool,

    /// Reject undeclared symbols and inconsistent arities
    #[arg(long)]
    validate: bool,

    /// Print a JSON report instead of the bare answer
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ ProverError::ResourceExhausted(_)) => {
            eprintln!("folres: {}", e);
            ExitCode::from(3)
        }
        Err(e) => {
            eprintln!("folres: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<(), ProverError> {
    let config = load_config(cli)?;
    let problem = load_problem(&cli.kb, cli.format)?;
    tracing::info!(
        path = %cli.kb.display(),
        clauses = problem.clauses.len(),
        "loaded knowledge base"
    );

    let (verdict, stats) = decide_with_stats(&problem.vocabulary, &problem.clauses, &config)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&RunReportJson::new(verdict, stats))?);
    } else {
        println!("{}", verdict.answer());
    }
    Ok(())
}

/// Settings file first, then command-line overrides
fn load_config(cli: &Cli) -> Result<ProverConfig, ProverError> {
    let mut config = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => ProverConfig::default(),
    };
    if let Some(max_clauses) = cli.max_clauses {
        config.max_clauses = max_clauses;
    }
    if let Some(max_passes) = cli.max_passes {
        config.max_passes = max_passes;
    }
    config.parallel |= cli.parallel;
    config.validate_vocabulary |= cli.validate;
    Ok(config)
}

fn load_problem(path: &Path, format: Option<InputFormat>) -> Result<ParsedProblem, ProverError> {
    let format = format.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => InputFormat::Json,
        _ => InputFormat::Cnf,
    });
    match format {
        InputFormat::Cnf => parse_cnf_file(path),
        InputFormat::Json => parse_json_file(path),
    }
}
