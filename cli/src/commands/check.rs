use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use countymander::{
    Feasibility, ModelOptions, DistrictingParams, SolverConfig,
    check_feasibility_with_highs, io, state_fips,
};

use crate::cli::{CheckArgs, Cli};

pub fn run(cli: &Cli, args: &CheckArgs) -> Result<ExitCode> {
    let attrs = io::json::GraphAttributes {
        geo_id: args.geo_id_key.clone(),
        name: args.name_key.clone(),
        long_name: args.long_name_key.clone(),
        population: args.population_key.clone(),
    };
    let mut graph = io::json::read_graph(&args.graph, &attrs)?;
    info!(counties = graph.node_count(), edges = graph.edge_count(), "[check] loaded {}", args.graph.display());

    if let Some(path) = &args.populations {
        let state = args.state.as_deref().ok_or_else(|| anyhow!("--state is required with --populations"))?;
        let fips = state_fips(state).ok_or_else(|| anyhow!("unknown state code {state:?}"))?;
        let table = io::csv::read_populations(path, fips)?;
        graph.attach_populations(&table)
            .with_context(|| format!("attaching populations from {}", path.display()))?;
        info!(state, fips, matched = graph.node_count(), "[check] attached populations");
    }

    let mut config = match &args.solver_config {
        Some(path) => SolverConfig::read_from_json(path)?,
        None => SolverConfig::default(),
    };
    config.verbose |= cli.verbose > 1;
    if args.time_limit.is_some() { config.time_limit = args.time_limit }
    if args.threads.is_some() { config.threads = args.threads }

    let params = DistrictingParams::new(args.lower, args.upper, args.districts);
    let options = ModelOptions { symmetry_breaking: !args.no_symmetry_breaking, ..Default::default() };

    match check_feasibility_with_highs(&graph, &params, &options, &config)? {
        Feasibility::Feasible(plan) => {
            println!("Found a feasible districting plan, as follows:");
            print!("{}", plan.report());

            if let Some(path) = &args.output {
                plan.write_labels_csv(path)?;
                info!("[check] wrote labels -> {}", path.display());
            }
            if let Some(path) = &args.report {
                plan.write_json(path)?;
                info!("[check] wrote report -> {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Feasibility::Infeasible(reason) => {
            println!("This state is not county-level feasible: {reason}.");
            Ok(ExitCode::from(1))
        }
        Feasibility::Inconclusive(reason) => {
            println!("Inconclusive: the solver stopped before deciding feasibility ({reason}).");
            Ok(ExitCode::from(2))
        }
    }
}
