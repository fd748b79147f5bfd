use std::collections::VecDeque;

use crate::graph::CountyGraph;

impl CountyGraph {
    /// Check if a set of nodes induces a connected subgraph.
    /// The empty set and singletons are connected.
    pub fn is_connected_subset(&self, nodes: &[usize]) -> bool {
        if nodes.is_empty() { return true }

        // Deduplicate and validate indices.
        let mut subset = Vec::with_capacity(nodes.len());
        let mut in_subset = vec![false; self.node_count()];
        for &u in nodes {
            assert!(u < self.node_count(), "node {} out of range", u);
            if !in_subset[u] { in_subset[u] = true; subset.push(u); }
        }

        let mut seen = 1usize;
        let mut visited = vec![false; self.node_count()];
        let mut queue = VecDeque::from([subset[0]]);
        visited[subset[0]] = true;
        while let Some(u) = queue.pop_front() {
            for v in self.edges(u) {
                if in_subset[v] && !visited[v] {
                    seen += 1;
                    visited[v] = true;
                    queue.push_back(v);
                }
            }
        }

        seen == subset.len()
    }

    /// Split the graph into its connected components, each sorted by node index.
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let mut components = Vec::new();
        let mut visited = vec![false; self.node_count()];

        for root in 0..self.node_count() {
            if visited[root] { continue }
            visited[root] = true;

            let mut component = vec![root];
            let mut queue = VecDeque::from([root]);
            while let Some(u) = queue.pop_front() {
                for v in self.edges(u) {
                    if !visited[v] {
                        visited[v] = true;
                        component.push(v);
                        queue.push_back(v);
                    }
                }
            }

            component.sort_unstable();
            components.push(component);
        }

        components
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{County, CountyGraph};

    fn two_triangles() -> CountyGraph {
        let counties = (0..6).map(|i| County::new(format!("{i}"), format!("C{i}"), 1)).collect();
        CountyGraph::from_edges(counties, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)]).unwrap()
    }

    #[test]
    fn subsets_within_a_component_are_connected() {
        let graph = two_triangles();
        assert!(graph.is_connected_subset(&[0, 1, 2]));
        assert!(graph.is_connected_subset(&[4, 5]));
        assert!(graph.is_connected_subset(&[3]));
        assert!(graph.is_connected_subset(&[]));
    }

    #[test]
    fn subsets_spanning_components_are_not_connected() {
        let graph = two_triangles();
        assert!(!graph.is_connected_subset(&[0, 3]));
        assert!(!graph.is_connected_subset(&[0, 1, 2, 3, 4, 5]));
    }

    #[test]
    fn duplicate_nodes_are_ignored() {
        let graph = two_triangles();
        assert!(graph.is_connected_subset(&[1, 1, 2]));
    }

    #[test]
    fn components_are_found() {
        let graph = two_triangles();
        assert_eq!(graph.connected_components(), vec![vec![0, 1, 2], vec![3, 4, 5]]);
    }
}
