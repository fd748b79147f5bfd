use anyhow::Result;
use good_lp::{Constraint, Expression, ProblemVariables, Variable, constraint, variable};
use ndarray::Array2;
use tracing::debug;

use crate::{
    feasibility::{DistrictingParams, ModelOptions},
    graph::{CountyGraph, DistanceTable},
};

/// Size summary of a built model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelStats {
    pub assignment_vars: usize,
    pub flow_vars: usize,
    pub constraints: usize,
    pub fixed_to_zero: usize, // assignment variables pruned by symmetry or reachability
}

/// The districting MIP: `x[i,j] = 1` iff county `i` belongs to the district centered at `j`,
/// and `f[j,a]` carries commodity `j` across arc `a` to certify contiguity.
pub struct DistrictingModel {
    pub(super) vars: ProblemVariables,
    pub(super) objective: Expression,
    pub(super) constraints: Vec<Constraint>,
    pub(super) assign: Array2<Variable>, // (n, n)
    stats: ModelStats,
}

impl DistrictingModel {
    /// Build the full model. Assumes `params` was validated against `graph`.
    pub fn build(graph: &CountyGraph, dist: &DistanceTable, params: &DistrictingParams, options: &ModelOptions) -> Result<Self> {
        let n = graph.node_count();
        let arcs = graph.arc_count();
        let mut stats = ModelStats::default();
        let mut vars = ProblemVariables::new();

        // Assignment variables, with dominated or unreachable pairs fixed to zero.
        let mut assign = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let dominated = options.symmetry_breaking && graph.population(i) > graph.population(j);
                let unreachable = options.prune_unreachable && !dist.is_reachable(i, j);
                let definition = if dominated || unreachable {
                    stats.fixed_to_zero += 1;
                    variable().binary().max(0.0)
                } else {
                    variable().binary()
                };
                assign.push(vars.add(definition));
            }
        }
        let assign = Array2::from_shape_vec((n, n), assign)?;
        stats.assignment_vars = n * n;

        // Flow variables f[j, a], stored row-major by district label.
        let flow = (0..n * arcs)
            .map(|_| vars.add(variable().min(0.0)))
            .collect::<Vec<_>>();
        let f = |j: usize, a: usize| flow[j * arcs + a];
        stats.flow_vars = flow.len();

        // Moment of inertia: sum of d(i,j)^2 * p_i * x[i,j].
        let objective = (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .map(|(i, j)| {
                let d = dist.get(i, j) as f64;
                (d * d * graph.population(i) as f64) * assign[[i, j]]
            })
            .sum::<Expression>();

        let mut constraints = Vec::new();

        // Each county is assigned to exactly one center.
        for i in 0..n {
            let row = (0..n).map(|j| assign[[i, j]]).sum::<Expression>();
            constraints.push(constraint!(row == 1.0));
        }

        // Exactly k centers.
        let centers = (0..n).map(|j| assign[[j, j]]).sum::<Expression>();
        constraints.push(constraint!(centers == params.districts as f64));

        // A county may only be assigned to an active center.
        for i in 0..n {
            for j in 0..n {
                if i != j { constraints.push(constraint!(assign[[i, j]] <= assign[[j, j]])) }
            }
        }

        // Population bounds, vacuous unless j is a center.
        for j in 0..n {
            let total = (0..n)
                .map(|i| graph.population(i) as f64 * assign[[i, j]])
                .sum::<Expression>();
            constraints.push(constraint!(total.clone() >= params.lower as f64 * assign[[j, j]]));
            constraints.push(constraint!(total <= params.upper as f64 * assign[[j, j]]));
        }

        // Contiguity: commodity j leaves center j and each member of j absorbs one unit.
        let incoming = graph.incoming_arcs();
        let capacity = n.saturating_sub(1) as f64;
        for j in 0..n {
            // The center never receives its own commodity.
            if !incoming[j].is_empty() {
                let inflow = incoming[j].iter().map(|&a| f(j, a)).sum::<Expression>();
                constraints.push(constraint!(inflow == 0.0));
            }

            for i in (0..n).filter(|&i| i != j) {
                let inflow = incoming[i].iter().map(|&a| f(j, a)).sum::<Expression>();
                let outflow = graph.arcs(i).map(|a| f(j, a)).sum::<Expression>();

                // Commodity j may only enter counties assigned to j.
                if !incoming[i].is_empty() {
                    constraints.push(constraint!(inflow.clone() <= capacity * assign[[i, j]]));
                }

                // Members consume exactly one unit; everyone else passes nothing on.
                constraints.push(constraint!(inflow - outflow == assign[[i, j]]));
            }
        }
        stats.constraints = constraints.len();

        debug!(
            assignment_vars = stats.assignment_vars,
            flow_vars = stats.flow_vars,
            constraints = stats.constraints,
            fixed_to_zero = stats.fixed_to_zero,
            "[feasibility::model] built districting model"
        );

        Ok(Self { vars, objective, constraints, assign, stats })
    }

    #[inline] pub fn stats(&self) -> ModelStats { self.stats }

    /// Number of counties the model covers.
    #[inline] pub fn node_count(&self) -> usize { self.assign.nrows() }
}
