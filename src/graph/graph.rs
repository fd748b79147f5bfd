use ahash::AHashMap;
use anyhow::{Result, bail, ensure};
use serde::{Deserialize, Serialize};

use crate::types::GeoId;

/// A single county node with the fixed set of attributes the feasibility check reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct County {
    pub geo_id: GeoId,
    pub name: String,      // Short name, e.g. "Adams"
    pub long_name: String, // Legal/statistical name, e.g. "Adams County"
    pub population: u64,
}

impl County {
    /// Construct a county whose long name equals its short name.
    pub fn new(geo_id: impl Into<GeoId>, name: impl Into<String>, population: u64) -> Self {
        let name = name.into();
        Self { geo_id: geo_id.into(), long_name: name.clone(), name, population }
    }

    /// Set the long name used for population matching.
    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = long_name.into();
        self
    }
}

/// An undirected county adjacency graph in compressed sparse row format.
/// Every undirected edge {u, v} is stored as the two arcs u -> v and v -> u.
#[derive(Debug, Default, Clone)]
pub struct CountyGraph {
    counties: Vec<County>,
    offsets: Vec<u32>,
    edges: Vec<u32>,
    index: AHashMap<GeoId, u32>,
}

impl CountyGraph {
    /// Construct a graph from counties and symmetric adjacency lists.
    pub fn new(counties: Vec<County>, adjacency: &[Vec<u32>]) -> Result<Self> {
        let n = counties.len();
        ensure!(adjacency.len() == n, "[CountyGraph::new] adjacency.len() ({}) must equal number of counties ({n})", adjacency.len());

        for (u, neighbors) in adjacency.iter().enumerate() {
            for &v in neighbors {
                ensure!((v as usize) < n, "[CountyGraph::new] neighbor {v} of node {u} out of range");
                ensure!(v as usize != u, "[CountyGraph::new] self loop at node {u}");
                ensure!(adjacency[v as usize].contains(&(u as u32)),
                    "[CountyGraph::new] edge {u} -> {v} has no reverse edge");
            }
        }

        let mut index = AHashMap::with_capacity(n);
        for (i, county) in counties.iter().enumerate() {
            if index.insert(county.geo_id.clone(), i as u32).is_some() {
                bail!("[CountyGraph::new] duplicate geo_id {}", county.geo_id);
            }
        }

        Ok(Self {
            counties,
            offsets: std::iter::once(0u32).chain(
                adjacency.iter()
                    .map(|v| v.len() as u32)
                    .scan(0u32, |acc, len| {*acc += len; Some(*acc)})
            ).collect(),
            edges: adjacency.iter().flatten().copied().collect(),
            index,
        })
    }

    /// Construct a graph from counties and a list of undirected edges.
    /// Self loops are dropped and duplicate edges are merged.
    pub fn from_edges(counties: Vec<County>, edges: &[(usize, usize)]) -> Result<Self> {
        let n = counties.len();
        let mut adjacency = vec![Vec::new(); n];
        for &(u, v) in edges {
            ensure!(u < n && v < n, "[CountyGraph::from_edges] edge ({u}, {v}) out of range");
            if u == v { continue }
            adjacency[u].push(v as u32);
            adjacency[v].push(u as u32);
        }
        adjacency.iter_mut().for_each(|list| { list.sort_unstable(); list.dedup() });

        Self::new(counties, &adjacency)
    }

    /// Get the number of nodes in the graph.
    #[inline] pub fn node_count(&self) -> usize { self.counties.len() }

    /// Get the number of undirected edges in the graph.
    #[inline] pub fn edge_count(&self) -> usize { self.edges.len() / 2 }

    /// Get the number of directed arcs (twice the edge count).
    #[inline] pub fn arc_count(&self) -> usize { self.edges.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.counties.is_empty() }

    /// Get all counties in node order.
    #[inline] pub fn counties(&self) -> &[County] { &self.counties }

    #[inline] pub fn county(&self, node: usize) -> &County { &self.counties[node] }

    #[inline] pub fn population(&self, node: usize) -> u64 { self.counties[node].population }

    /// Get the node index of a county by GeoId.
    #[inline]
    pub fn index_of(&self, geo_id: &GeoId) -> Option<usize> {
        self.index.get(geo_id).map(|&i| i as usize)
    }

    /// Get the arc index range of the outgoing arcs of a node.
    #[inline]
    pub fn arcs(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize .. self.offsets[node + 1] as usize
    }

    /// Get the head (target node) of an arc.
    #[inline] pub fn arc_target(&self, arc: usize) -> usize { self.edges[arc] as usize }

    /// Get the degree (number of neighbors) of a given node.
    #[inline] pub fn degree(&self, node: usize) -> usize { self.arcs(node).len() }

    /// Get an iterator over the neighbors of a given node.
    #[inline]
    pub fn edges(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.arcs(node).map(move |a| self.edges[a] as usize)
    }

    /// For every node, the list of arcs pointing into it.
    pub fn incoming_arcs(&self) -> Vec<Vec<usize>> {
        let mut incoming = vec![Vec::new(); self.node_count()];
        for u in 0..self.node_count() {
            for a in self.arcs(u) { incoming[self.arc_target(a)].push(a) }
        }
        incoming
    }

    /// Sum of all county populations.
    pub fn total_population(&self) -> u64 {
        self.counties.iter().map(|c| c.population).sum()
    }

    /// The most populous county, if any.
    pub fn max_population(&self) -> Option<(usize, u64)> {
        self.counties.iter()
            .enumerate()
            .map(|(i, c)| (i, c.population))
            .max_by_key(|&(i, p)| (p, std::cmp::Reverse(i)))
    }

    /// Mutable access to county records for data-loading steps.
    pub(crate) fn counties_mut(&mut self) -> &mut [County] { &mut self.counties }
}
