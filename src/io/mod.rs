//! IO module for format-specific reading and writing operations.
//!
//! - `csv` - population tables in, district labels out
//! - `json` - networkx county adjacency graphs

pub mod csv;
pub mod json;
