//! Bellman-Ford shortest path from node 0 to node n-1.
//!
//! # Algorithm
//!
//! The weight matrix is flattened into an edge list once (every entry other
//! than [`NO_EDGE`] is an edge). `solve` then runs up to n-1 relaxation passes
//! over that list, recording the relaxing predecessor of each node, and walks
//! the predecessors back from the target.
//!
//! Callers typically encode a longest-path (max-profit) problem by negating
//! weights, which is why [`ShortestPathSolver::value`] reports the negated
//! distance. Negative cycles are not detected; graphs are expected to be
//! acyclic (see [`is_acyclic`](super::is_acyclic)).
//!
//! # Complexity
//!
//! O(n · E) time, O(n + E) memory.

use log::trace;

use crate::error::RoutingError;

/// Matrix entry meaning "no direct edge".
pub const NO_EDGE: i64 = i64::MAX;

/// Distance reported for nodes the source cannot reach.
pub const INFINITY: i64 = 999_999;

#[derive(Debug, Clone, Copy)]
struct Edge {
    from: usize,
    to: usize,
    weight: i64,
}

/// Outcome of [`ShortestPathSolver::solve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortestPath {
    /// The target is reachable from the source.
    Reached {
        /// Shortest distance from node 0 to node n-1.
        distance: i64,
        /// Nodes from the target back to the source (destination first).
        path: Vec<usize>,
    },
    /// No path leads from node 0 to node n-1.
    Unreachable,
}

/// Single-use Bellman-Ford solver over a dense integer weight matrix.
///
/// # Examples
///
/// ```
/// use u_toptw::graph::{ShortestPath, ShortestPathSolver, NO_EDGE};
///
/// let m = vec![
///     vec![0, 4, 1],
///     vec![NO_EDGE, 0, 1],
///     vec![NO_EDGE, NO_EDGE, 0],
/// ];
/// let mut solver = ShortestPathSolver::new(&m).unwrap();
/// let result = solver.solve();
/// assert_eq!(result, ShortestPath::Reached { distance: 1, path: vec![2, 0] });
/// assert_eq!(solver.value(), -1);
/// ```
#[derive(Debug, Clone)]
pub struct ShortestPathSolver {
    nodes: usize,
    edges: Vec<Edge>,
    distances: Vec<i64>,
    path: Vec<usize>,
    value: i64,
}

impl ShortestPathSolver {
    /// Builds the edge list from an n×n matrix.
    ///
    /// Fails if the matrix is empty or not square.
    pub fn new(matrix: &[Vec<i64>]) -> Result<Self, RoutingError> {
        let nodes = matrix.len();
        if nodes == 0 {
            return Err(RoutingError::InvalidMatrix {
                reason: "matrix has no rows".to_string(),
            });
        }
        if let Some((row, r)) = matrix.iter().enumerate().find(|(_, r)| r.len() != nodes) {
            return Err(RoutingError::InvalidMatrix {
                reason: format!("row {row} has {} entries, expected {nodes}", r.len()),
            });
        }

        let edges = matrix
            .iter()
            .enumerate()
            .flat_map(|(from, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &w)| w != NO_EDGE)
                    .map(move |(to, &weight)| Edge { from, to, weight })
            })
            .collect();

        Ok(Self {
            nodes,
            edges,
            distances: Vec::new(),
            path: Vec::new(),
            value: INFINITY,
        })
    }

    /// Number of nodes.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Number of edges found in the matrix.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Computes shortest distances from node 0 and the path to node n-1.
    pub fn solve(&mut self) -> ShortestPath {
        let n = self.nodes;
        let target = n - 1;
        let mut predecessor: Vec<Option<usize>> = vec![None; n];
        let mut reached = vec![false; n];
        self.distances = vec![INFINITY; n];
        self.distances[0] = 0;
        reached[0] = true;

        for _ in 1..n {
            let mut changed = false;
            for e in &self.edges {
                if !reached[e.from] {
                    continue;
                }
                let candidate = self.distances[e.from].saturating_add(e.weight);
                if !reached[e.to] || candidate < self.distances[e.to] {
                    self.distances[e.to] = candidate;
                    predecessor[e.to] = Some(e.from);
                    reached[e.to] = true;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        self.path.clear();
        self.path.push(target);
        let mut current = predecessor[target];
        while let Some(p) = current {
            // a negative cycle would loop forever
            if self.path.len() > n {
                break;
            }
            self.path.push(p);
            current = predecessor[p];
        }
        self.value = self.distances[target].saturating_neg();
        trace!(
            "shortest path over {} nodes: distance {} via {} node(s)",
            n,
            self.distances[target],
            self.path.len()
        );

        if reached[target] {
            ShortestPath::Reached {
                distance: self.distances[target],
                path: self.path.clone(),
            }
        } else {
            ShortestPath::Unreachable
        }
    }

    /// Shortest distance from node 0 to every node ([`INFINITY`] if
    /// unreached). Empty before [`solve`](Self::solve).
    pub fn distances(&self) -> &[i64] {
        &self.distances
    }

    /// Path found by the last solve, destination first.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Negated shortest distance to node n-1, saturating at `i64::MAX` when
    /// the distance bottoms out at `i64::MIN`.
    ///
    /// `-INFINITY` when the target is unreachable, [`INFINITY`] before solving.
    pub fn value(&self) -> i64 {
        self.value
    }
}
