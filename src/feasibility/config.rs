use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::graph::CountyGraph;

/// Population bounds and district count for one feasibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictingParams {
    pub lower: u64,     // L: minimum district population (inclusive)
    pub upper: u64,     // U: maximum district population (inclusive)
    pub districts: u32, // k
}

impl DistrictingParams {
    pub fn new(lower: u64, upper: u64, districts: u32) -> Self {
        Self { lower, upper, districts }
    }

    /// Reject parameter combinations no optimization effort can resolve.
    pub fn validate(&self, graph: &CountyGraph) -> Result<()> {
        ensure!(self.districts >= 1, "[DistrictingParams] number of districts must be at least 1");
        ensure!(self.lower <= self.upper,
            "[DistrictingParams] lower bound {} exceeds upper bound {}", self.lower, self.upper);
        ensure!(!graph.is_empty(), "[DistrictingParams] county graph is empty");
        Ok(())
    }
}

/// Optional model reductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    /// Only allow a county to center a district if it is at least as populous as every member.
    pub symmetry_breaking: bool,
    /// Forbid assigning a county to a center in another connected component.
    pub prune_unreachable: bool,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self { symmetry_breaking: true, prune_unreachable: true }
    }
}

/// Smallest feasibility tolerance HiGHS accepts.
pub const MIN_TOLERANCE: f64 = 1e-10;

/// Settings handed to the MIP solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Print solver progress to the console.
    pub verbose: bool,
    /// Integrality tolerance (HiGHS `mip_feasibility_tolerance`).
    pub int_feasibility_tol: f64,
    /// Constraint feasibility tolerance (HiGHS `primal_feasibility_tolerance`).
    pub feasibility_tol: f64,
    /// Wall-clock limit in seconds.
    pub time_limit: Option<f64>,
    /// Worker thread count; solver default when unset.
    pub threads: Option<u32>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            int_feasibility_tol: 1e-9,
            feasibility_tol: 1e-9,
            time_limit: None,
            threads: None,
        }
    }
}

impl SolverConfig {
    /// Read a solver configuration from a JSON file. Missing fields take their defaults.
    pub fn read_from_json(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("[SolverConfig] Failed to open config file: {}", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("[SolverConfig] Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings HiGHS would refuse when the options are applied.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.int_feasibility_tol >= MIN_TOLERANCE,
            "[SolverConfig] int_feasibility_tol must be at least {MIN_TOLERANCE:e}, got {}", self.int_feasibility_tol);
        ensure!(self.feasibility_tol >= MIN_TOLERANCE,
            "[SolverConfig] feasibility_tol must be at least {MIN_TOLERANCE:e}, got {}", self.feasibility_tol);
        if let Some(limit) = self.time_limit {
            ensure!(limit > 0.0, "[SolverConfig] time_limit must be positive, got {limit}");
        }
        if let Some(threads) = self.threads {
            ensure!(i32::try_from(threads).is_ok(), "[SolverConfig] threads must fit in an i32, got {threads}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::graph::County;

    fn pair() -> CountyGraph {
        CountyGraph::from_edges(
            vec![County::new("a", "A", 60), County::new("b", "B", 40)],
            &[(0, 1)],
        ).unwrap()
    }

    #[test]
    fn valid_params_pass() {
        assert!(DistrictingParams::new(10, 20, 2).validate(&pair()).is_ok());
        assert!(DistrictingParams::new(20, 20, 1).validate(&pair()).is_ok());
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = DistrictingParams::new(30, 20, 2).validate(&pair()).unwrap_err();
        assert!(err.to_string().contains("exceeds upper bound"));
    }

    #[test]
    fn zero_districts_are_rejected() {
        assert!(DistrictingParams::new(0, 20, 0).validate(&pair()).is_err());
    }

    #[test]
    fn empty_graph_is_rejected() {
        assert!(DistrictingParams::new(0, 20, 1).validate(&CountyGraph::default()).is_err());
    }

    #[test]
    fn solver_config_defaults_are_strict() {
        let config = SolverConfig::default();
        assert_eq!(config.int_feasibility_tol, 1e-9);
        assert_eq!(config.feasibility_tol, 1e-9);
        assert!(config.time_limit.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn solver_config_reads_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "time_limit": 30.0, "verbose": true }}"#).unwrap();

        let config = SolverConfig::read_from_json(file.path()).unwrap();
        assert_eq!(config.time_limit, Some(30.0));
        assert!(config.verbose);
        assert_eq!(config.feasibility_tol, 1e-9);
    }

    #[test]
    fn solver_config_rejects_nonpositive_time_limit() {
        let config = SolverConfig { time_limit: Some(0.0), ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn solver_config_rejects_tolerances_below_highs_range() {
        let config = SolverConfig { feasibility_tol: 1e-12, ..Default::default() };
        assert!(config.validate().unwrap_err().to_string().contains("feasibility_tol"));

        let config = SolverConfig { int_feasibility_tol: 1e-11, ..Default::default() };
        assert!(config.validate().is_err());

        let config = SolverConfig { feasibility_tol: f64::NAN, ..Default::default() };
        assert!(config.validate().is_err());

        let config = SolverConfig { feasibility_tol: MIN_TOLERANCE, int_feasibility_tol: MIN_TOLERANCE, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn solver_config_json_with_tiny_tolerance_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "feasibility_tol": 1e-12 }}"#).unwrap();

        assert!(SolverConfig::read_from_json(file.path()).is_err());
    }

    #[test]
    fn solver_config_rejects_oversized_thread_count() {
        let config = SolverConfig { threads: Some(u32::MAX), ..Default::default() };
        assert!(config.validate().is_err());
        let config = SolverConfig { threads: Some(4), ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn model_options_default_to_pruning() {
        let options: ModelOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ModelOptions::default());
        assert!(options.symmetry_breaking);
    }
}
