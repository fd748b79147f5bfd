use std::collections::VecDeque;

use ndarray::Array2;

use crate::graph::CountyGraph;

/// All-pairs hop-count distances over an unweighted county graph.
/// Pairs in different components hold the sentinel `n` (the node count).
#[derive(Debug, Clone)]
pub struct DistanceTable {
    dist: Array2<u32>, // (n, n)
}

impl DistanceTable {
    /// Run a breadth-first search from every node.
    pub fn compute(graph: &CountyGraph) -> Self {
        let n = graph.node_count();
        let mut dist = Array2::from_elem((n, n), n as u32);

        let mut queue = VecDeque::with_capacity(n);
        for source in 0..n {
            let mut row = dist.row_mut(source);
            row[source] = 0;
            queue.push_back(source);
            while let Some(u) = queue.pop_front() {
                let next = row[u] + 1;
                for v in graph.edges(u) {
                    if v != source && row[v] == n as u32 {
                        row[v] = next;
                        queue.push_back(v);
                    }
                }
            }
        }

        Self { dist }
    }

    /// Number of nodes the table covers.
    #[inline] pub fn len(&self) -> usize { self.dist.nrows() }

    #[inline] pub fn is_empty(&self) -> bool { self.dist.is_empty() }

    /// Hop count from `source` to `target`, or the sentinel if unreachable.
    #[inline] pub fn get(&self, source: usize, target: usize) -> u32 { self.dist[[source, target]] }

    /// Sentinel value used for unreachable pairs.
    #[inline] pub fn unreachable(&self) -> u32 { self.len() as u32 }

    /// Whether `target` can be reached from `source`.
    #[inline]
    pub fn is_reachable(&self, source: usize, target: usize) -> bool {
        source == target || self.get(source, target) < self.unreachable()
    }
}
