//! Fitness and feasibility evaluation of a [`RouteSolution`].

use log::{debug, trace};

use crate::error::RoutingError;
use crate::models::RouteSolution;

/// A type of constraint violation found while walking a route.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Arrival after the node's time window closes.
    TimeWindowViolated {
        /// Node where the violation occurred.
        node: usize,
        /// Actual arrival time.
        arrival: f64,
        /// Time window due date.
        due: f64,
    },
    /// Elapsed time after serving a node exceeds the route duration cap.
    MaxDurationExceeded {
        /// Node whose service ended past the cap.
        node: usize,
        /// Elapsed time after service.
        elapsed: f64,
        /// Route duration cap.
        max_duration: f64,
    },
}

/// A constraint violation on one route.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Slot of the route in the solution.
    pub route_index: usize,
    /// The type of violation.
    pub kind: ViolationType,
}

/// Timing of one step along a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    /// Node reached.
    pub node: usize,
    /// Elapsed time on arrival, before any waiting.
    pub arrival: f64,
    /// Idle time spent until the window opens, `None` if not served.
    pub waiting: Option<f64>,
    /// Start of service after waiting for the ready time.
    ///
    /// `None` when the node was reached after its due time and therefore not
    /// served.
    pub service_start: Option<f64>,
    /// Elapsed time after service, `None` if not served.
    pub departure: Option<f64>,
}

impl Visit {
    /// Returns `true` if the node was served within its window.
    pub fn is_served(&self) -> bool {
        self.service_start.is_some()
    }
}

/// Result of walking one route.
#[derive(Debug, Clone)]
pub struct RouteReport {
    /// Slot of the route in the solution.
    pub route_index: usize,
    /// Depot anchoring the route.
    pub depot: usize,
    /// Steps after leaving the depot, the last one returning to it.
    pub visits: Vec<Visit>,
    /// Score of the nodes served within their windows.
    pub score: f64,
    /// Elapsed time when the walk ends.
    pub elapsed: f64,
    /// Violations found on this route.
    pub violations: Vec<Violation>,
}

impl RouteReport {
    /// Returns `true` if no violation was found.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Result of walking every created route.
#[derive(Debug, Clone, Default)]
pub struct SolutionReport {
    /// One report per created route, in slot order.
    pub routes: Vec<RouteReport>,
}

impl SolutionReport {
    /// Returns `true` if every route is feasible.
    pub fn is_feasible(&self) -> bool {
        self.routes.iter().all(RouteReport::is_feasible)
    }

    /// Score collected by served nodes across all routes.
    pub fn score(&self) -> f64 {
        self.routes.iter().map(|r| r.score).sum()
    }

    /// Summed elapsed time of all routes.
    pub fn time_cost(&self) -> f64 {
        self.routes.iter().map(|r| r.elapsed).sum()
    }

    /// All violations, route by route.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.routes.iter().flat_map(|r| r.violations.iter())
    }
}

/// Sums the score of every node on every created route.
///
/// Time windows are not consulted. The cached objective of the solution is
/// neither read nor written.
///
/// # Examples
///
/// ```
/// use u_toptw::models::{Poi, TopTwInstance, RouteSolution};
/// use u_toptw::evaluation::evaluate_fitness;
///
/// let pois = vec![Poi::new(0.0, 0.0), Poi::new(1.0, 1.0).with_score(7.0)];
/// let problem = TopTwInstance::from_pois(pois, 1);
/// let mut sol = RouteSolution::new(&problem);
/// sol.init_solution().unwrap();
/// assert_eq!(evaluate_fitness(&sol).unwrap(), 0.0);
/// sol.insert_after(0, 1).unwrap();
/// assert_eq!(evaluate_fitness(&sol).unwrap(), 7.0);
/// ```
pub fn evaluate_fitness(solution: &RouteSolution<'_>) -> Result<f64, RoutingError> {
    let problem = solution.problem();
    let mut total = 0.0;
    for depot in solution.route_depots() {
        let route: f64 = solution
            .walk_from(depot)?
            .into_iter()
            .map(|node| problem.score(node))
            .sum();
        total += route;
    }
    trace!(
        "fitness {} over {} route(s)",
        total,
        solution.created_routes()
    );
    Ok(total)
}

/// Recomputes the fitness and stores it as the solution's cached objective.
pub fn cache_fitness(solution: &mut RouteSolution<'_>) -> Result<f64, RoutingError> {
    let fitness = evaluate_fitness(solution)?;
    solution.set_cached_objective(fitness);
    Ok(fitness)
}

/// Walks every created route propagating time and checks its constraints.
///
/// At each node the arrival time is compared with the due time first. A late
/// node is recorded as violated and neither waits, is served, nor scores; the
/// duration cap is not assessed for it. Otherwise the clock waits for the
/// ready time, adds the service time and is then compared with the route
/// duration cap.
pub fn check_feasibility(solution: &RouteSolution<'_>) -> Result<SolutionReport, RoutingError> {
    let problem = solution.problem();
    let max_duration = problem.max_time_per_route();
    let mut report = SolutionReport::default();

    for (route_index, depot) in solution.route_depots().enumerate() {
        let mut route = RouteReport {
            route_index,
            depot,
            visits: Vec::new(),
            score: 0.0,
            elapsed: 0.0,
            violations: Vec::new(),
        };
        let mut prev = depot;

        for node in solution.walk_from(depot)? {
            route.elapsed += problem.travel_time(prev, node);
            let arrival = route.elapsed;
            let tw = problem.poi(node).time_window();

            if tw.is_violated(arrival) {
                debug!(
                    "route {}: node {} reached at {} after due time {}",
                    route_index,
                    node,
                    arrival,
                    tw.due()
                );
                route.violations.push(Violation {
                    route_index,
                    kind: ViolationType::TimeWindowViolated {
                        node,
                        arrival,
                        due: tw.due(),
                    },
                });
                route.visits.push(Visit {
                    node,
                    arrival,
                    waiting: None,
                    service_start: None,
                    departure: None,
                });
            } else {
                let waiting = tw.waiting_time(arrival);
                let start = arrival + waiting;
                route.elapsed = start + problem.service_time(node);
                if route.elapsed > max_duration {
                    debug!(
                        "route {}: elapsed {} exceeds cap {} at node {}",
                        route_index, route.elapsed, max_duration, node
                    );
                    route.violations.push(Violation {
                        route_index,
                        kind: ViolationType::MaxDurationExceeded {
                            node,
                            elapsed: route.elapsed,
                            max_duration,
                        },
                    });
                }
                route.score += problem.score(node);
                route.visits.push(Visit {
                    node,
                    arrival,
                    waiting: Some(waiting),
                    service_start: Some(start),
                    departure: Some(route.elapsed),
                });
            }
            prev = node;
        }
        report.routes.push(route);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Poi, TimeWindow, TopTwInstance};

    // depot (0,0), 1 at (3,4), 2 at (6,8): legs 5, 5, 10
    fn setup(tw1: TimeWindow, tw2: TimeWindow, max: f64) -> TopTwInstance {
        let horizon = TimeWindow::new(0.0, 1000.0).expect("valid");
        let pois = vec![
            Poi::new(0.0, 0.0).with_time_window(horizon),
            Poi::new(3.0, 4.0)
                .with_score(10.0)
                .with_service_time(2.0)
                .with_time_window(tw1),
            Poi::new(6.0, 8.0)
                .with_score(20.0)
                .with_service_time(3.0)
                .with_time_window(tw2),
        ];
        TopTwInstance::from_pois(pois, 2).with_max_time_per_route(max)
    }

    fn build(problem: &TopTwInstance) -> RouteSolution<'_> {
        let mut sol = RouteSolution::new(problem);
        sol.init_solution().expect("vehicles");
        sol.insert_after(0, 1).expect("ok");
        sol.insert_after(1, 2).expect("ok");
        sol
    }

    fn wide() -> TimeWindow {
        TimeWindow::new(0.0, 1000.0).expect("valid")
    }

    #[test]
    fn test_feasible_route() {
        let p = setup(wide(), wide(), 100.0);
        let sol = build(&p);
        let report = check_feasibility(&sol).expect("closed");
        assert!(report.is_feasible());
        assert_eq!(report.score(), 30.0);
        // 5 + 2 + 5 + 3 + 10
        assert!((report.time_cost() - 25.0).abs() < 1e-10);
        assert_eq!(report.routes[0].visits.len(), 3);
        assert_eq!(evaluate_fitness(&sol).expect("closed"), 30.0);
    }

    #[test]
    fn test_waiting_for_ready_time() {
        let late_open = TimeWindow::new(20.0, 100.0).expect("valid");
        let p = setup(late_open, wide(), 100.0);
        let sol = build(&p);
        let report = check_feasibility(&sol).expect("closed");
        let v = &report.routes[0].visits[0];
        assert_eq!(v.arrival, 5.0);
        assert_eq!(v.waiting, Some(15.0));
        assert_eq!(v.service_start, Some(20.0));
        assert_eq!(v.departure, Some(22.0));
        assert!((report.time_cost() - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_due_time_violation_skips_service() {
        let early_close = TimeWindow::new(0.0, 4.0).expect("valid");
        let p = setup(early_close, wide(), 100.0);
        let sol = build(&p);
        let report = check_feasibility(&sol).expect("closed");
        assert!(!report.is_feasible());
        assert_eq!(report.score(), 20.0);
        let first = &report.routes[0].visits[0];
        assert!(!first.is_served());
        assert_eq!(first.waiting, None);
        assert_eq!(report.routes[0].visits[1].waiting, Some(0.0));
        // no service at node 1: 5 + 5 + 3 + 10
        assert!((report.time_cost() - 23.0).abs() < 1e-10);
        // authoritative fitness ignores windows
        assert_eq!(evaluate_fitness(&sol).expect("closed"), 30.0);
    }

    #[test]
    fn test_due_check_precedes_duration_check() {
        let early_close = TimeWindow::new(0.0, 4.0).expect("valid");
        let p = setup(early_close, wide(), 1.0);
        let sol = build(&p);
        let report = check_feasibility(&sol).expect("closed");
        let kinds: Vec<_> = report.violations().map(|v| v.kind.clone()).collect();
        assert!(matches!(
            kinds[0],
            ViolationType::TimeWindowViolated { node: 1, .. }
        ));
        assert!(kinds[1..]
            .iter()
            .all(|k| matches!(k, ViolationType::MaxDurationExceeded { .. })));
    }

    #[test]
    fn test_duration_cap() {
        let p = setup(wide(), wide(), 24.0);
        let sol = build(&p);
        let report = check_feasibility(&sol).expect("closed");
        assert!(!report.is_feasible());
        let v: Vec<_> = report.violations().collect();
        assert_eq!(v.len(), 1);
        assert!(matches!(
            v[0].kind,
            ViolationType::MaxDurationExceeded { node: 0, .. }
        ));
    }

    #[test]
    fn test_cache_fitness() {
        let p = setup(wide(), wide(), 100.0);
        let mut sol = build(&p);
        assert!(sol.cached_objective().is_none());
        assert_eq!(cache_fitness(&mut sol).expect("closed"), 30.0);
        assert_eq!(sol.cached_objective(), Some(30.0));
        sol.init_solution().expect("vehicles");
        sol.set_cached_objective(30.0);
        // the cache is not refreshed by link changes
        assert_eq!(evaluate_fitness(&sol).expect("closed"), 0.0);
        assert_eq!(sol.cached_objective(), Some(30.0));
    }

    #[test]
    fn test_replica_route_uses_depot_attributes() {
        let p = setup(wide(), wide(), 100.0);
        let mut sol = RouteSolution::new(&p);
        sol.init_solution().expect("vehicles");
        let d = sol.add_route().expect("vehicle");
        sol.insert_after(d, 2).expect("ok");
        let report = check_feasibility(&sol).expect("closed");
        assert_eq!(report.routes.len(), 2);
        assert_eq!(report.routes[1].depot, 3);
        // 10 + 3 + 10
        assert!((report.routes[1].elapsed - 23.0).abs() < 1e-10);
        assert_eq!(report.routes[0].elapsed, 0.0);
    }
}
