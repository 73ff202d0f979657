use clap::{Parser, Subcommand};
use nl_node_model::{NodeModelError, NodeModelSolver, VariableRunInput};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod scenario;

use scenario::Scenario;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Node model error: {0}")]
    NodeModel(#[from] NodeModelError),
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "nl-cli")]
#[command(about = "Node model CLI - solve single-node flow acceptance scenarios", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a scenario file parses and its dimensions agree
    Validate {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Compute flow acceptance factors for a scenario
    Solve {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Solve { scenario_path } => cmd_solve(&scenario_path),
    }
}

fn cmd_validate(scenario_path: &Path) -> CliResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = Scenario::load(scenario_path)?;
    let fixed = scenario.fixed_input()?;
    VariableRunInput::with_config(
        &fixed,
        scenario.turn_matrix()?,
        scenario.receiving_override(),
        &scenario.config,
    )?;
    println!(
        "✓ Scenario is valid ({} incoming, {} outgoing links)",
        fixed.incoming_count(),
        fixed.outgoing_count()
    );
    Ok(())
}

fn cmd_solve(scenario_path: &Path) -> CliResult<()> {
    let scenario = Scenario::load(scenario_path)?;
    let fixed = scenario.fixed_input()?;
    let input = VariableRunInput::with_config(
        &fixed,
        scenario.turn_matrix()?,
        scenario.receiving_override(),
        &scenario.config,
    )?;

    tracing::info!(scenario = %scenario.name, "solving node model");
    let result = NodeModelSolver::new(scenario.config).run(&input)?;

    if !scenario.name.is_empty() {
        println!("Scenario: {}", scenario.name);
    }
    println!("Solved in {} iteration(s)", result.iterations());

    println!("\nFlow acceptance factors:");
    let epsilon = scenario.config.epsilon;
    let inflows = result.accepted_inflows(&input);
    for (a, inflow) in inflows.iter().enumerate() {
        let alpha = result.acceptance_factor(a).unwrap_or_default();
        let status = if result.is_fully_accepted(a, epsilon) {
            "demand"
        } else {
            "capacity"
        };
        println!(
            "  in {:>3}  alpha = {:.6}  accepted = {:>10.2} pcu/h  ({} constrained)",
            a, alpha, inflow, status
        );
    }

    println!("\nOutgoing links:");
    let outflows = result.accepted_outflows(&input);
    let receiving = input.receiving_flows();
    for (b, outflow) in outflows.iter().enumerate() {
        println!(
            "  out {:>3}  accepted = {:>10.2}  receiving = {:>10.2} pcu/h",
            b, outflow, receiving[b]
        );
    }

    for b in result.overloaded_outgoing(&input, epsilon) {
        tracing::warn!(
            out = b,
            accepted = outflows[b],
            receiving = receiving[b],
            "accepted flow exceeds receiving flow"
        );
    }
    Ok(())
}
