mod contiguity;
mod distance;
mod graph;
mod populations;

pub use distance::DistanceTable;
pub use graph::{County, CountyGraph};
pub use populations::PopulationTable;
