//! Domain ranking

mod pagerank;

pub use pagerank::{compute, DAMPING, DEFAULT_ITERATIONS};
