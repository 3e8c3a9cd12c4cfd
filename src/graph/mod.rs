//! Graph primitives for candidate evaluation.
//!
//! - [`ShortestPathSolver`] — Bellman-Ford from node 0 to node n-1 over a dense matrix
//! - [`is_acyclic`], [`has_cycle_through`] — cycle checks guarding the solver's input

mod bellman_ford;
mod cycles;

pub use bellman_ford::{ShortestPath, ShortestPathSolver, INFINITY, NO_EDGE};
pub use cycles::{has_cycle_through, is_acyclic};
