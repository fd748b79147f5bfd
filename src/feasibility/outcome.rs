use std::fmt;

use crate::{plan::Plan, types::GeoId};

/// Why no districting plan exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Infeasibility {
    /// A single county is larger than the upper bound; no model was built.
    OversizedCounty { geo_id: GeoId, population: u64, upper: u64 },
    /// More districts than counties; no model was built.
    TooManyDistricts { districts: u32, counties: usize },
    /// Total population cannot be split into `k` districts within bounds; no model was built.
    PopulationOutOfRange { total: u64, min: u64, max: u64 },
    /// The solver proved that no assignment satisfies every constraint.
    Proven,
}

impl Infeasibility {
    /// Whether the verdict was reached without invoking the solver.
    pub fn is_structural(&self) -> bool { !matches!(self, Infeasibility::Proven) }
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::OversizedCounty { geo_id, population, upper } =>
                write!(f, "county {geo_id} has population {population}, above the upper bound {upper}"),
            Infeasibility::TooManyDistricts { districts, counties } =>
                write!(f, "{districts} districts requested but only {counties} counties exist"),
            Infeasibility::PopulationOutOfRange { total, min, max } =>
                write!(f, "total population {total} is outside the achievable range [{min}, {max}]"),
            Infeasibility::Proven =>
                write!(f, "the solver proved that no districting plan exists"),
        }
    }
}

/// Result of one feasibility check.
#[derive(Debug, Clone)]
pub enum Feasibility {
    Feasible(Plan),
    Infeasible(Infeasibility),
    /// The solver stopped before proving either outcome (time limit, numerical trouble).
    Inconclusive(String),
}

impl Feasibility {
    #[inline] pub fn is_feasible(&self) -> bool { matches!(self, Feasibility::Feasible(_)) }

    #[inline] pub fn is_infeasible(&self) -> bool { matches!(self, Feasibility::Infeasible(_)) }

    #[inline] pub fn is_inconclusive(&self) -> bool { matches!(self, Feasibility::Inconclusive(_)) }

    /// The plan, if one was found.
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            Feasibility::Feasible(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn into_plan(self) -> Option<Plan> {
        match self {
            Feasibility::Feasible(plan) => Some(plan),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_proven_infeasibility_needs_the_solver() {
        assert!(!Infeasibility::Proven.is_structural());
        assert!(Infeasibility::TooManyDistricts { districts: 3, counties: 2 }.is_structural());
    }

    #[test]
    fn oversized_county_message_names_the_county() {
        let reason = Infeasibility::OversizedCounty { geo_id: GeoId::new("31055"), population: 584526, upper: 500000 };
        assert!(reason.to_string().contains("31055"));
    }

    #[test]
    fn inconclusive_is_not_infeasible() {
        let outcome = Feasibility::Inconclusive("TimeLimit".into());
        assert!(outcome.is_inconclusive());
        assert!(!outcome.is_infeasible());
        assert!(outcome.plan().is_none());
    }
}
