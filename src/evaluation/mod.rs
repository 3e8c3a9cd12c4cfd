//! Solution evaluation.
//!
//! - [`evaluate_fitness`] — total score of every routed node (authoritative objective)
//! - [`check_feasibility`] — time propagation with due-time and duration checks
//! - [`cache_fitness`] — recompute and store the solution's cached objective

mod evaluator;

pub use evaluator::{
    cache_fitness, check_feasibility, evaluate_fitness, RouteReport, SolutionReport, Violation,
    ViolationType, Visit,
};
