//! Solve a linear system stored in a JSON or TOML file
//!
//! Usage:
//!   cargo run --release --bin gauss-solve -- --input data_tests/systems/regular_2x2.json
//!   RUST_LOG=debug cargo run --bin gauss-solve -- --input system.toml --format json
//!   cargo run --bin gauss-solve -- --help
//!
//! Exit status: 0 on success, 1 when the system has no solution, 2 on
//! invalid input or I/O errors.

use clap::{Parser, ValueEnum};
use math_audio_gauss::io::{SystemFile, load_system};
use math_audio_gauss::{
    GaussError, GaussJordanSolution, GaussJordanSolver, PivotStrategy, SolverConfig, SystemKind,
    ZeroRowCheck,
};
use ndarray::{Array1, Array2};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "gauss-solve",
    about = "Solve Ax = b by Gauss-Jordan elimination with rank-based solvability checks"
)]
struct Cli {
    /// System file (.json or .toml) with `matrix`, `rhs` and an optional `solver` section
    #[arg(short, long)]
    input: PathBuf,

    /// Zero tolerance (overrides the file's solver.tolerance)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Pivot selection (overrides the file's solver.pivoting)
    #[arg(long, value_enum)]
    pivoting: Option<CliPivoting>,

    /// Reject zero rows early for negative right-hand sides too
    #[arg(long)]
    symmetric_zero_row: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Only report ranks and classification, do not solve
    #[arg(long)]
    rank_only: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CliPivoting {
    FirstNonZero,
    LargestMagnitude,
}

impl From<CliPivoting> for PivotStrategy {
    fn from(choice: CliPivoting) -> Self {
        match choice {
            CliPivoting::FirstNonZero => PivotStrategy::FirstNonZero,
            CliPivoting::LargestMagnitude => PivotStrategy::LargestMagnitude,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    env_logger::init();

    let args = Cli::parse();

    let system = load_system(&args.input).unwrap_or_else(|err| {
        eprintln!("Error loading '{}': {}", args.input.display(), err);
        process::exit(2);
    });
    let (a, b) = system.to_arrays().unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        process::exit(2);
    });

    let config = resolve_config(&args, &system);
    let solver = GaussJordanSolver::new(config);

    if !system.description.is_empty() && args.format == OutputFormat::Text {
        println!("{}", system.description);
    }

    if args.rank_only {
        report_ranks(&solver, &a, &b, args.format);
        return;
    }

    match solver.solve_detailed(&a, &b) {
        Ok(solution) => print_solution(&solution, args.format),
        Err(err) if err.is_no_solution() => {
            print_no_solution(&err, args.format);
            process::exit(1);
        }
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(2);
        }
    }
}

fn resolve_config(args: &Cli, system: &SystemFile) -> SolverConfig {
    let mut config = system.solver;
    if let Some(tolerance) = args.tolerance {
        config.tolerance = Some(tolerance);
    }
    if let Some(pivoting) = args.pivoting {
        config.pivoting = pivoting.into();
    }
    if args.symmetric_zero_row {
        config.zero_row_check = ZeroRowCheck::Symmetric;
    }
    log::debug!("solver config: {:?}", config);
    config
}

fn report_ranks(
    solver: &GaussJordanSolver,
    a: &Array2<f64>,
    b: &Array1<f64>,
    format: OutputFormat,
) {
    let classification = solver.classify(a, b).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        process::exit(2);
    });

    match format {
        OutputFormat::Text => {
            println!("rank(A)   = {}", classification.rank_matrix);
            println!("rank(A|b) = {}", classification.rank_augmented);
            println!("unknowns  = {}", classification.unknowns);
            println!("system    : {}", describe_kind(classification.kind()));
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "rank_matrix": classification.rank_matrix,
                "rank_augmented": classification.rank_augmented,
                "unknowns": classification.unknowns,
                "kind": describe_kind(classification.kind()),
            });
            print_json(&report);
        }
    }
}

fn print_solution(solution: &GaussJordanSolution<f64>, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for (i, value) in solution.x.iter().enumerate() {
                println!("x[{i}] = {value:.10}");
            }
            println!("rank      = {}", solution.rank);
            println!("system    : {}", describe_kind(solution.kind()));
            if !solution.free_variables.is_empty() {
                println!("free vars : {:?} (set to 0)", solution.free_variables);
            }
            println!("residual  = {:.3e}", solution.residual);
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "x": solution.x.to_vec(),
                "rank": solution.rank,
                "pivot_columns": solution.pivot_columns,
                "free_variables": solution.free_variables,
                "residual": solution.residual,
                "kind": describe_kind(solution.kind()),
            });
            print_json(&report);
        }
    }
}

fn print_no_solution(err: &GaussError, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!("{err}");
            if let Some(diag) = err.diagnostics() {
                println!("augmented matrix [A|b]:");
                for row in diag.augmented.rows() {
                    let cells: Vec<String> = row.iter().map(|v| format!("{v:>12.6}")).collect();
                    println!("  {}", cells.join(" "));
                }
            }
        }
        OutputFormat::Json => {
            let augmented: Option<Vec<Vec<f64>>> = err
                .diagnostics()
                .map(|diag| diag.augmented.rows().into_iter().map(|r| r.to_vec()).collect());
            let report = serde_json::json!({
                "error": err.to_string(),
                "augmented": augmented,
            });
            print_json(&report);
        }
    }
}

fn print_json(report: &serde_json::Value) {
    match serde_json::to_string_pretty(report) {
        Ok(text) => println!("{text}"),
        Err(err) => {
            eprintln!("Error writing JSON report: {err}");
            process::exit(2);
        }
    }
}

fn describe_kind(kind: SystemKind) -> String {
    match kind {
        SystemKind::Unique => "unique solution".to_string(),
        SystemKind::Underdetermined { degrees_of_freedom } => {
            format!("underdetermined ({degrees_of_freedom} free variables)")
        }
        SystemKind::Inconsistent => "inconsistent (no solution)".to_string(),
    }
}
