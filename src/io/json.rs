//! networkx `json_graph` reading (adjacency and node-link layouts).

use std::{fs::File, io::BufReader, path::Path};

use ahash::AHashMap;
use anyhow::{Context, Result, anyhow, bail, ensure};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::graph::{County, CountyGraph};

/// Node attribute keys to read county records from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphAttributes {
    pub geo_id: String,
    pub name: String,
    pub long_name: String,
    pub population: String,
}

impl Default for GraphAttributes {
    fn default() -> Self {
        Self {
            geo_id: "GEOID10".into(),
            name: "NAME10".into(),
            long_name: "NAMELSAD10".into(),
            population: "POP20".into(),
        }
    }
}

#[derive(Deserialize)]
struct NxGraph {
    #[serde(default)]
    directed: bool,
    nodes: Vec<Map<String, Value>>,
    adjacency: Option<Vec<Vec<NxNeighbor>>>,
    #[serde(alias = "edges")]
    links: Option<Vec<NxLink>>,
}

#[derive(Deserialize)]
struct NxNeighbor { id: Value }

#[derive(Deserialize)]
struct NxLink { source: Value, target: Value }

/// Node ids may be integers or strings; compare them by their text.
fn id_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn attr_string(node: &Map<String, Value>, key: &str) -> Option<String> {
    match node.get(key)? {
        Value::Null => None,
        value => Some(id_key(value)),
    }
}

fn attr_population(node: &Map<String, Value>, key: &str) -> Result<u64> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n.as_u64()
            .or_else(|| n.as_f64().filter(|p| *p >= 0.0 && p.fract() == 0.0).map(|p| p as u64))
            .ok_or_else(|| anyhow!("[io::json] population {n} is not a non-negative integer")),
        Some(Value::String(s)) => s.trim().parse::<u64>()
            .with_context(|| format!("[io::json] population {s:?} is not a non-negative integer")),
        Some(other) => bail!("[io::json] unsupported population value {other}"),
    }
}

fn build_graph(nx: NxGraph, attrs: &GraphAttributes) -> Result<CountyGraph> {
    if nx.directed { warn!("[io::json] directed graph given; edges are treated as undirected") }

    let mut index = AHashMap::with_capacity(nx.nodes.len());
    let mut counties = Vec::with_capacity(nx.nodes.len());
    for (i, node) in nx.nodes.iter().enumerate() {
        let id = node.get("id").map(id_key).unwrap_or_else(|| i.to_string());
        ensure!(index.insert(id.clone(), i).is_none(), "[io::json] duplicate node id {id}");

        let geo_id = attr_string(node, &attrs.geo_id)
            .ok_or_else(|| anyhow!("[io::json] node {id} has no '{}' attribute", attrs.geo_id))?;
        let long_name = attr_string(node, &attrs.long_name);
        let name = attr_string(node, &attrs.name)
            .or_else(|| long_name.clone())
            .unwrap_or_else(|| geo_id.clone());
        let population = attr_population(node, &attrs.population)
            .with_context(|| format!("[io::json] node {id}"))?;

        counties.push(
            County::new(geo_id, name.clone(), population)
                .with_long_name(long_name.unwrap_or(name))
        );
    }

    let lookup = |value: &Value| -> Result<usize> {
        let key = id_key(value);
        index.get(&key).copied().ok_or_else(|| anyhow!("[io::json] edge refers to unknown node {key}"))
    };

    let mut edges = Vec::new();
    match (&nx.adjacency, &nx.links) {
        (Some(adjacency), _) => {
            ensure!(adjacency.len() == counties.len(),
                "[io::json] adjacency has {} rows for {} nodes", adjacency.len(), counties.len());
            for (u, neighbors) in adjacency.iter().enumerate() {
                for neighbor in neighbors { edges.push((u, lookup(&neighbor.id)?)) }
            }
        }
        (None, Some(links)) => {
            for link in links { edges.push((lookup(&link.source)?, lookup(&link.target)?)) }
        }
        (None, None) => bail!("[io::json] graph has neither 'adjacency' nor 'links'"),
    }

    CountyGraph::from_edges(counties, &edges)
}

/// Parse a county graph from networkx JSON text.
pub fn read_graph_str(json: &str, attrs: &GraphAttributes) -> Result<CountyGraph> {
    let nx: NxGraph = serde_json::from_str(json).context("[io::json] Failed to parse graph JSON")?;
    build_graph(nx, attrs)
}

/// Read a county graph from a networkx JSON file.
pub fn read_graph(path: &Path, attrs: &GraphAttributes) -> Result<CountyGraph> {
    let file = File::open(path)
        .with_context(|| format!("[io::json] Failed to open graph file: {}", path.display()))?;
    let nx: NxGraph = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("[io::json] Failed to parse graph file: {}", path.display()))?;
    build_graph(nx, attrs).with_context(|| format!("[io::json] Invalid graph in {}", path.display()))
}
