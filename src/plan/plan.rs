use std::fmt::Write;

use ahash::AHashMap;
use anyhow::{Result, ensure};
use serde::Serialize;

use crate::{
    feasibility::{DistrictingParams, ModelOptions},
    graph::{CountyGraph, DistanceTable},
    types::GeoId,
};

/// A set of counties rooted at a center county.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct District {
    center: GeoId,
    members: Vec<GeoId>,
    names: Vec<String>,
    population: u64,
    #[serde(skip)] center_node: usize,
    #[serde(skip)] nodes: Vec<usize>,
}

impl District {
    /// Construct a district from node indices (sorted, deduplicated).
    pub(crate) fn new(graph: &CountyGraph, center: usize, mut nodes: Vec<usize>) -> Self {
        nodes.sort_unstable();
        nodes.dedup();
        Self {
            center: graph.county(center).geo_id.clone(),
            members: nodes.iter().map(|&i| graph.county(i).geo_id.clone()).collect(),
            names: nodes.iter().map(|&i| graph.county(i).name.clone()).collect(),
            population: nodes.iter().map(|&i| graph.population(i)).sum(),
            center_node: center,
            nodes,
        }
    }

    /// Node index of the center county.
    #[inline] pub fn center(&self) -> usize { self.center_node }

    #[inline] pub fn center_id(&self) -> &GeoId { &self.center }

    /// Node indices of all members (center included).
    #[inline] pub fn nodes(&self) -> &[usize] { &self.nodes }

    #[inline] pub fn members(&self) -> &[GeoId] { &self.members }

    #[inline] pub fn names(&self) -> &[String] { &self.names }

    #[inline] pub fn population(&self) -> u64 { self.population }

    #[inline] pub fn len(&self) -> usize { self.nodes.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.nodes.is_empty() }
}

/// A feasible districting plan: every county assigned to one of `k` districts.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    districts: Vec<District>,
    moment_of_inertia: f64, // sum of d(i, center)^2 * p_i
    #[serde(skip)] assignments: Vec<u32>,
    #[serde(skip)] geo_ids: Vec<GeoId>,
    #[serde(skip)] index: AHashMap<GeoId, usize>,
}

impl Plan {
    /// Build a plan from districts covering every county of `graph`.
    pub(crate) fn new(graph: &CountyGraph, dist: &DistanceTable, districts: Vec<District>) -> Result<Self> {
        let mut assignments = vec![u32::MAX; graph.node_count()];
        for (label, district) in districts.iter().enumerate() {
            for &i in district.nodes() { assignments[i] = label as u32 }
        }
        ensure!(assignments.iter().all(|&p| p != u32::MAX), "[Plan::new] districts do not cover every county");

        let moment_of_inertia = districts.iter()
            .flat_map(|d| d.nodes().iter().map(move |&i| (i, d.center())))
            .map(|(i, j)| {
                let d = dist.get(i, j) as f64;
                d * d * graph.population(i) as f64
            })
            .sum();

        let geo_ids = graph.counties().iter().map(|c| c.geo_id.clone()).collect::<Vec<_>>();
        let index = geo_ids.iter().cloned().enumerate().map(|(i, g)| (g, i)).collect();

        Ok(Self { districts, moment_of_inertia, assignments, geo_ids, index })
    }

    /// Get the number of districts in this plan.
    #[inline] pub fn num_districts(&self) -> u32 { self.districts.len() as u32 }

    #[inline] pub fn districts(&self) -> &[District] { &self.districts }

    /// Objective value of the plan.
    #[inline] pub fn moment_of_inertia(&self) -> f64 { self.moment_of_inertia }

    /// District label in `[0, k)` of each node, in node order.
    #[inline] pub fn assignments(&self) -> &[u32] { &self.assignments }

    /// Mapping from every county GeoId to its district label in `[0, k)`.
    pub fn labels(&self) -> Vec<(GeoId, u32)> {
        self.geo_ids.iter().cloned().zip(self.assignments.iter().copied()).collect()
    }

    /// District label of a single county.
    pub fn label_of(&self, geo_id: &GeoId) -> Option<u32> {
        self.index.get(geo_id).map(|&i| self.assignments[i])
    }

    /// Per-district population totals.
    pub fn populations(&self) -> Vec<u64> {
        self.districts.iter().map(District::population).collect()
    }

    /// Human-readable summary, one line per district.
    pub fn report(&self) -> String {
        let mut out = String::new();
        for (j, district) in self.districts.iter().enumerate() {
            let _ = writeln!(
                out,
                "District {} has population {} and contains counties {:?}",
                j + 1, district.population(), district.names(),
            );
        }
        out
    }

    /// Check the plan against the districting rules, independently of any solver state.
    pub fn verify(&self, graph: &CountyGraph, params: &DistrictingParams, options: &ModelOptions) -> Result<()> {
        ensure!(self.num_districts() == params.districts,
            "[Plan::verify] plan has {} districts, expected {}", self.num_districts(), params.districts);
        ensure!(self.assignments.len() == graph.node_count(),
            "[Plan::verify] plan covers {} counties, graph has {}", self.assignments.len(), graph.node_count());

        let covered = self.districts.iter().map(District::len).sum::<usize>();
        ensure!(covered == graph.node_count(), "[Plan::verify] districts overlap or omit counties");

        for (j, district) in self.districts.iter().enumerate() {
            ensure!((params.lower..=params.upper).contains(&district.population()),
                "[Plan::verify] district {} population {} outside [{}, {}]",
                j + 1, district.population(), params.lower, params.upper);
            ensure!(district.nodes().contains(&district.center()),
                "[Plan::verify] district {} does not contain its center", j + 1);
            ensure!(graph.is_connected_subset(district.nodes()),
                "[Plan::verify] district {} is not contiguous", j + 1);

            if options.symmetry_breaking {
                let center_pop = graph.population(district.center());
                ensure!(district.nodes().iter().all(|&i| graph.population(i) <= center_pop),
                    "[Plan::verify] district {} center {} is not its most populous county",
                    j + 1, district.center_id());
            }
        }

        Ok(())
    }
}
