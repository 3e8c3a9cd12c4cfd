//! Error type shared by the solution structure and the search primitives.

use std::fmt;

/// Errors raised by [`RouteSolution`](crate::models::RouteSolution),
/// [`ShortestPathSolver`](crate::graph::ShortestPathSolver) and
/// [`SubsetEnumerator`](crate::combinatorics::SubsetEnumerator).
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// A node index lies outside the addressable range.
    NodeOutOfRange {
        /// Offending index.
        node: usize,
        /// Number of addressable indices.
        capacity: usize,
    },
    /// `add_route` was called with every vehicle already assigned.
    NoVehicleAvailable,
    /// The solution has not been reset with `init_solution`.
    SolutionNotInitialized,
    /// A traversal reached a node whose successor was never set.
    BrokenLink {
        /// Node with the missing successor.
        node: usize,
    },
    /// A traversal did not return to its depot.
    RouteNotClosed {
        /// Depot the walk started from.
        depot: usize,
    },
    /// A subset enumerator was advanced past its last subset.
    EndOfSequence,
    /// A time window closes before it opens or has a non-finite bound.
    InvalidTimeWindow {
        /// Opening time.
        ready: f64,
        /// Closing time.
        due: f64,
    },
    /// A weight matrix could not be used as a graph.
    InvalidMatrix {
        /// What is wrong with it.
        reason: String,
    },
    /// An instance document could not be read or written.
    #[cfg(feature = "json")]
    Json(String),
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::NodeOutOfRange { node, capacity } => {
                write!(f, "node {node} is out of range (capacity {capacity})")
            }
            RoutingError::NoVehicleAvailable => write!(f, "no vehicle available for a new route"),
            RoutingError::SolutionNotInitialized => write!(f, "solution has not been initialized"),
            RoutingError::BrokenLink { node } => write!(f, "node {node} has no successor"),
            RoutingError::RouteNotClosed { depot } => {
                write!(f, "route starting at depot {depot} does not return to it")
            }
            RoutingError::EndOfSequence => write!(f, "no more elements in the power set"),
            RoutingError::InvalidTimeWindow { ready, due } => {
                write!(f, "invalid time window [{ready}, {due}]")
            }
            RoutingError::InvalidMatrix { reason } => write!(f, "invalid matrix: {reason}"),
            #[cfg(feature = "json")]
            RoutingError::Json(msg) => write!(f, "instance document error: {msg}"),
        }
    }
}

impl std::error::Error for RoutingError {}
