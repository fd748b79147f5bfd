#![doc = "countymander public API"]
mod feasibility;
mod graph;
mod plan;
mod types;

pub mod io;

#[doc(inline)]
pub use feasibility::{
    check_feasibility, check_feasibility_with_highs,
    DistrictingModel, DistrictingParams, Feasibility, HighsSolver, Infeasibility,
    MipSolver, ModelOptions, ModelStats, SolveStatus, SolverConfig,
};

#[doc(inline)]
pub use graph::{County, CountyGraph, DistanceTable, PopulationTable};

#[doc(inline)]
pub use plan::{District, Plan};

#[doc(inline)]
pub use types::{GeoId, state_fips};
