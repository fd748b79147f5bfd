use anyhow::Result;
use good_lp::{
    Solution, SolverModel,
    solvers::{ResolutionError, SolutionStatus, highs::highs},
};
use ndarray::Array2;
use tracing::{debug, warn};

use crate::feasibility::{DistrictingModel, SolverConfig};

/// Terminal status of one solve.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStatus {
    /// Proven optimal; holds the value of every assignment variable `x[i,j]`.
    Optimal { assignment: Array2<f64> },
    /// Proven that no assignment satisfies the constraints.
    Infeasible,
    /// Stopped without proving optimality or infeasibility.
    Inconclusive { reason: String },
}

/// A mixed-integer engine that can solve a districting model.
pub trait MipSolver {
    fn name(&self) -> &'static str;

    /// Solve the model synchronously to a terminal status.
    fn solve(&self, model: DistrictingModel) -> Result<SolveStatus>;
}

/// HiGHS through `good_lp`.
#[derive(Debug, Clone, Default)]
pub struct HighsSolver {
    config: SolverConfig,
}

impl HighsSolver {
    pub fn new(config: SolverConfig) -> Self { Self { config } }

    #[inline] pub fn config(&self) -> &SolverConfig { &self.config }
}

/// Whether a good_lp status carries a solution HiGHS considers optimal.
///
/// HiGHS reports an optimal model with a nonzero gap inside `mip_rel_gap` as `GapLimit`.
fn is_optimal(status: SolutionStatus) -> bool {
    matches!(status, SolutionStatus::Optimal | SolutionStatus::GapLimit)
}

/// Status for a solve that ended without a solution.
fn status_from_error(error: ResolutionError) -> SolveStatus {
    match error {
        ResolutionError::Infeasible => SolveStatus::Infeasible,
        other => {
            warn!("[feasibility::solver] HiGHS stopped without a result: {other}");
            SolveStatus::Inconclusive { reason: other.to_string() }
        }
    }
}

impl MipSolver for HighsSolver {
    fn name(&self) -> &'static str { "highs" }

    fn solve(&self, model: DistrictingModel) -> Result<SolveStatus> {
        self.config.validate()?;
        let DistrictingModel { vars, objective, constraints, assign, .. } = model;

        // The flow encoding scales with n, so loose tolerances admit fractional "integer" points.
        let mut problem = vars.minimise(objective)
            .using(highs)
            .set_option("mip_feasibility_tolerance", self.config.int_feasibility_tol)
            .set_option("primal_feasibility_tolerance", self.config.feasibility_tol);
        problem.set_verbose(self.config.verbose);
        if let Some(limit) = self.config.time_limit {
            problem = problem.set_time_limit(limit);
        }
        if let Some(threads) = self.config.threads {
            problem = problem.set_threads(threads);
        }
        for c in constraints { problem.add_constraint(c); }

        debug!(config = ?self.config, "[feasibility::solver] invoking HiGHS");
        let solution = match problem.solve() {
            Ok(solution) => solution,
            Err(e) => return Ok(status_from_error(e)),
        };

        let status = solution.status();
        if is_optimal(status) {
            debug!(?status, "[feasibility::solver] HiGHS reached optimality");
            Ok(SolveStatus::Optimal { assignment: assign.mapv(|x| solution.value(x)) })
        } else {
            warn!("[feasibility::solver] HiGHS stopped early with status {status:?}");
            Ok(SolveStatus::Inconclusive { reason: format!("{status:?}") })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        feasibility::{DistrictingParams, ModelOptions},
        graph::{County, CountyGraph, DistanceTable},
    };

    fn build(graph: &CountyGraph, params: DistrictingParams) -> DistrictingModel {
        let dist = DistanceTable::compute(graph);
        DistrictingModel::build(graph, &dist, &params, &ModelOptions::default()).unwrap()
    }

    #[test]
    fn single_county_single_district_is_optimal() {
        let graph = CountyGraph::new(vec![County::new("A", "A", 7)], &[vec![]]).unwrap();
        let status = HighsSolver::default().solve(build(&graph, DistrictingParams::new(0, 10, 1))).unwrap();

        match status {
            SolveStatus::Optimal { assignment } => assert!(assignment[[0, 0]] > 0.5),
            other => panic!("expected optimal, got {other:?}"),
        }
    }

    #[test]
    fn unsatisfiable_lower_bound_is_infeasible() {
        let graph = CountyGraph::from_edges(
            vec![County::new("A", "A", 5), County::new("B", "B", 5)],
            &[(0, 1)],
        ).unwrap();
        let status = HighsSolver::default().solve(build(&graph, DistrictingParams::new(8, 10, 2))).unwrap();

        assert_eq!(status, SolveStatus::Infeasible);
    }

    #[test]
    fn optimal_and_gap_limited_solutions_are_accepted() {
        assert!(is_optimal(SolutionStatus::Optimal));
        assert!(is_optimal(SolutionStatus::GapLimit));
        assert!(!is_optimal(SolutionStatus::TimeLimit));
    }

    #[test]
    fn only_proven_infeasibility_maps_to_infeasible() {
        assert_eq!(status_from_error(ResolutionError::Infeasible), SolveStatus::Infeasible);

        for error in [
            ResolutionError::Unbounded,
            ResolutionError::Other("NoSolutionFound"),
            ResolutionError::Str("HiGHS error while setting option threads".into()),
        ] {
            let expected = error.to_string();
            match status_from_error(error) {
                SolveStatus::Inconclusive { reason } => assert_eq!(reason, expected),
                other => panic!("expected inconclusive, got {other:?}"),
            }
        }
    }

    #[test]
    fn verbose_and_time_limit_reach_highs() {
        let counties = (0..6).map(|i| County::new(format!("{i}"), format!("C{i}"), 10)).collect();
        let edges = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (0, 5)];
        let graph = CountyGraph::from_edges(counties, &edges).unwrap();
        let config = SolverConfig { verbose: true, time_limit: Some(1e-3), ..Default::default() };

        // A time-limited stop may leave the check undecided, but never proves infeasibility.
        let status = HighsSolver::new(config).solve(build(&graph, DistrictingParams::new(20, 20, 3))).unwrap();
        assert_ne!(status, SolveStatus::Infeasible);

        let config = SolverConfig { verbose: true, time_limit: Some(60.0), ..Default::default() };
        let status = HighsSolver::new(config).solve(build(&graph, DistrictingParams::new(20, 20, 3))).unwrap();
        assert!(matches!(status, SolveStatus::Optimal { .. }), "got {status:?}");
    }

    #[test]
    fn invalid_config_is_an_error() {
        let graph = CountyGraph::new(vec![County::new("A", "A", 7)], &[vec![]]).unwrap();
        let solver = HighsSolver::new(SolverConfig { feasibility_tol: 0.0, ..Default::default() });
        assert!(solver.solve(build(&graph, DistrictingParams::new(0, 10, 1))).is_err());

        // Below the HiGHS range: rejected up front rather than surfacing as a solver stop.
        let solver = HighsSolver::new(SolverConfig { feasibility_tol: 1e-12, ..Default::default() });
        assert!(solver.solve(build(&graph, DistrictingParams::new(0, 10, 1))).is_err());
    }
}
