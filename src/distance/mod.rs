//! Distance and travel time matrices.
//!
//! Provides a dense Euclidean distance matrix; distance and travel time are
//! numerically identical.

mod matrix;

pub use matrix::DistanceMatrix;
