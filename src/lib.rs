//! # u-toptw
//!
//! Core of a Team Orienteering Problem with Time Windows solver: the
//! instance model, an array-backed multi-route solution with feasibility and
//! fitness evaluation, and the search primitives a construction heuristic
//! builds on.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Poi, TimeWindow, NodeId, TopTwInstance, RouteSolution)
//! - [`distance`] — Distance and travel time matrix
//! - [`evaluation`] — Fitness, feasibility walk and cached objective
//! - [`report`] — Fixed-width text reports
//! - [`graph`] — Bellman-Ford shortest path and cycle checks
//! - [`combinatorics`] — Lazy power-set enumeration
//! - [`error`] — Crate error type

pub mod combinatorics;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod graph;
pub mod models;
pub mod report;

pub use error::RoutingError;
