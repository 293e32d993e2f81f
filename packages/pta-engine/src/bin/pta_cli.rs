//! Pointer analysis CLI
//!
//! # Usage
//!
//! ```bash
//! # Points-to sets and call graph as JSON on stdout
//! cargo run --bin pta-cli -- --program tests/fixtures/dispatch.json
//!
//! # CHA baseline, Graphviz call graph
//! cargo run --bin pta-cli -- --program app.json --algorithm cha --dot cg.dot
//!
//! # Versioned YAML configuration, report to a file
//! cargo run --bin pta-cli -- --program app.json --config pta.yaml --output report.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pta_engine::config::load_config;
use pta_engine::{
    load_program, to_dot, AnalysisConfig, AnalysisReport, CallGraphAlgorithm, ChaBuilder,
    ClassHierarchy, PointerAnalysis, Program,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pta-cli")]
#[command(about = "Andersen pointer analysis with on-the-fly call graph construction", long_about = None)]
struct Cli {
    /// Program description (JSON)
    #[arg(short, long)]
    program: PathBuf,

    /// Analysis configuration (YAML, `version: 1`)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Call graph algorithm, overrides the configuration
    #[arg(short, long)]
    algorithm: Option<CallGraphAlgorithm>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the call graph in Graphviz format
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(algorithm) = cli.algorithm {
        config = config.call_graph_algorithm(algorithm);
    }
    config.validate()?;

    let program = load_program(&cli.program)?;
    info!(
        "loaded {}: {} classes, {} methods, {} variables",
        cli.program.display(),
        program.num_classes(),
        program.num_methods(),
        program.num_vars()
    );

    let report = analyze(&program, &config, cli.dot.as_ref())?;
    let json = report.to_json()?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!("report written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn analyze(
    program: &Program,
    config: &AnalysisConfig,
    dot: Option<&PathBuf>,
) -> Result<AnalysisReport, Box<dyn std::error::Error>> {
    match config.call_graph_algorithm {
        CallGraphAlgorithm::Pta => {
            let result = PointerAnalysis::new(program, config.clone()).run()?;
            if let Some(path) = dot {
                std::fs::write(path, to_dot(result.call_graph(), program))?;
            }
            Ok(result.report(program, config.max_report_objects))
        }
        CallGraphAlgorithm::Cha => {
            let hierarchy = ClassHierarchy::new(program);
            let call_graph = ChaBuilder::new(&hierarchy).build()?;
            if let Some(path) = dot {
                std::fs::write(path, to_dot(&call_graph, program))?;
            }
            Ok(AnalysisReport::for_call_graph(
                program,
                &call_graph,
                CallGraphAlgorithm::Cha,
            ))
        }
    }
}
