mod io;
mod plan;

pub use plan::{District, Plan};
