mod config;
mod extract;
mod model;
mod outcome;
mod solver;

pub use config::{DistrictingParams, ModelOptions, SolverConfig};
pub use model::{DistrictingModel, ModelStats};
pub use outcome::{Feasibility, Infeasibility};
pub use solver::{HighsSolver, MipSolver, SolveStatus};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    graph::{CountyGraph, DistanceTable},
    plan::Plan,
};

/// Cheap checks that decide infeasibility without building a model.
fn structural_infeasibility(graph: &CountyGraph, params: &DistrictingParams) -> Option<Infeasibility> {
    if let Some((node, population)) = graph.max_population() {
        if population > params.upper {
            return Some(Infeasibility::OversizedCounty {
                geo_id: graph.county(node).geo_id.clone(),
                population,
                upper: params.upper,
            });
        }
    }

    if params.districts as usize > graph.node_count() {
        return Some(Infeasibility::TooManyDistricts { districts: params.districts, counties: graph.node_count() });
    }

    let total = graph.total_population();
    let (min, max) = (
        params.lower.saturating_mul(params.districts as u64),
        params.upper.saturating_mul(params.districts as u64),
    );
    if !(min..=max).contains(&total) {
        return Some(Infeasibility::PopulationOutOfRange { total, min, max });
    }

    None
}

/// Decide whether `graph` can be split into `params.districts` contiguous districts with
/// populations in `[params.lower, params.upper]`, and produce a plan if so.
///
/// Invalid parameters are an error; infeasible and inconclusive verdicts are not.
pub fn check_feasibility<S: MipSolver + ?Sized>(
    graph: &CountyGraph,
    params: &DistrictingParams,
    options: &ModelOptions,
    solver: &S,
) -> Result<Feasibility> {
    params.validate(graph)?;

    if let Some(reason) = structural_infeasibility(graph, params) {
        info!("[feasibility] not county-level feasible: {reason}");
        return Ok(Feasibility::Infeasible(reason));
    }

    let dist = DistanceTable::compute(graph);
    debug!(counties = graph.node_count(), edges = graph.edge_count(), "[feasibility] computed distance table");

    let model = DistrictingModel::build(graph, &dist, params, options)?;
    info!(
        counties = graph.node_count(),
        districts = params.districts,
        lower = params.lower,
        upper = params.upper,
        solver = solver.name(),
        "[feasibility] solving districting model"
    );

    match solver.solve(model)? {
        SolveStatus::Optimal { assignment } => {
            let districts = extract::extract_districts(graph, &assignment, params.districts)?;
            let plan = Plan::new(graph, &dist, districts)?;
            plan.verify(graph, params, options)?;
            info!("[feasibility] found a feasible districting plan");
            Ok(Feasibility::Feasible(plan))
        }
        SolveStatus::Infeasible => {
            info!("[feasibility] not county-level feasible: {}", Infeasibility::Proven);
            Ok(Feasibility::Infeasible(Infeasibility::Proven))
        }
        SolveStatus::Inconclusive { reason } => {
            warn!("[feasibility] inconclusive: {reason}");
            Ok(Feasibility::Inconclusive(reason))
        }
    }
}

/// Run [`check_feasibility`] with HiGHS and the given solver settings.
pub fn check_feasibility_with_highs(
    graph: &CountyGraph,
    params: &DistrictingParams,
    options: &ModelOptions,
    config: &SolverConfig,
) -> Result<Feasibility> {
    check_feasibility(graph, params, options, &HighsSolver::new(config.clone()))
}
