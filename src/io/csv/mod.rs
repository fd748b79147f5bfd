//! CSV format reading and writing operations.

mod read;
mod write;

pub use read::read_populations;
pub(crate) use write::*;
