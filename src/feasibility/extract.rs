use anyhow::{Result, ensure};
use ndarray::Array2;

use crate::{graph::CountyGraph, plan::District};

/// Solvers return near-binary values for integer variables.
const ROUNDING_THRESHOLD: f64 = 0.5;

/// Rebuild the district list from assignment values `x[i,j]`.
/// Centers are taken in node order; each district lists members in node order.
pub(crate) fn extract_districts(graph: &CountyGraph, assignment: &Array2<f64>, districts: u32) -> Result<Vec<District>> {
    let n = graph.node_count();
    ensure!(assignment.dim() == (n, n),
        "[feasibility::extract] assignment shape {:?} does not match {n} counties", assignment.dim());

    let centers = (0..n)
        .filter(|&j| assignment[[j, j]] > ROUNDING_THRESHOLD)
        .collect::<Vec<_>>();
    ensure!(centers.len() == districts as usize,
        "[feasibility::extract] found {} centers, expected {districts}", centers.len());

    let result = centers.iter()
        .map(|&j| {
            let nodes = (0..n)
                .filter(|&i| assignment[[i, j]] > ROUNDING_THRESHOLD)
                .collect::<Vec<_>>();
            District::new(graph, j, nodes)
        })
        .collect::<Vec<_>>();

    // Memberships must partition the county set.
    let mut owner = vec![None; n];
    for (label, district) in result.iter().enumerate() {
        for &i in district.nodes() {
            ensure!(owner[i].is_none(),
                "[feasibility::extract] county {} assigned to districts {} and {}",
                graph.county(i).geo_id, owner[i].unwrap_or(0), label);
            owner[i] = Some(label);
        }
    }
    if let Some(i) = owner.iter().position(Option::is_none) {
        anyhow::bail!("[feasibility::extract] county {} is not assigned to any district", graph.county(i).geo_id);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::County;

    fn path3() -> CountyGraph {
        CountyGraph::from_edges(
            vec![County::new("A", "A", 10), County::new("B", "B", 20), County::new("C", "C", 5)],
            &[(0, 1), (1, 2)],
        ).unwrap()
    }

    #[test]
    fn near_binary_values_are_rounded() {
        let graph = path3();
        let mut x = Array2::zeros((3, 3));
        x[[0, 1]] = 0.9999999;
        x[[1, 1]] = 1.0000001;
        x[[2, 2]] = 0.99;
        x[[2, 1]] = 1e-8;

        let districts = extract_districts(&graph, &x, 2).unwrap();
        assert_eq!(districts.len(), 2);
        assert_eq!(districts[0].center(), 1);
        assert_eq!(districts[0].nodes(), &[0, 1]);
        assert_eq!(districts[0].population(), 30);
        assert_eq!(districts[1].nodes(), &[2]);
        assert_eq!(districts[1].population(), 5);
    }

    #[test]
    fn wrong_center_count_is_an_error() {
        let graph = path3();
        let mut x = Array2::zeros((3, 3));
        x[[0, 1]] = 1.0;
        x[[1, 1]] = 1.0;
        x[[2, 1]] = 1.0;

        assert!(extract_districts(&graph, &x, 2).is_err());
    }

    #[test]
    fn overlapping_membership_is_an_error() {
        let graph = path3();
        let mut x = Array2::zeros((3, 3));
        x[[0, 0]] = 1.0;
        x[[1, 1]] = 1.0;
        x[[0, 1]] = 1.0;
        x[[2, 1]] = 1.0;

        assert!(extract_districts(&graph, &x, 2).is_err());
    }

    #[test]
    fn omitted_county_is_an_error() {
        let graph = path3();
        let mut x = Array2::zeros((3, 3));
        x[[0, 0]] = 1.0;
        x[[1, 1]] = 1.0;

        let err = extract_districts(&graph, &x, 2).unwrap_err();
        assert!(err.to_string().contains("not assigned"));
    }
}
