//! Domain model types for the Team Orienteering Problem with Time Windows.
//!
//! Provides the instance data (POIs with scores and time windows, a shared
//! depot replicated per route) and the mutable multi-route solution built on
//! top of it.

mod document;
mod generate;
mod node;
mod poi;
mod problem;
mod solution;

pub use document::InstanceData;
pub use generate::random_instance;
pub use node::NodeId;
pub use poi::{Poi, TimeWindow};
pub use problem::TopTwInstance;
pub use solution::RouteSolution;
