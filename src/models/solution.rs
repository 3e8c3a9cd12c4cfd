//! Multi-route solution encoded as predecessor/successor arrays.

use std::hash::{Hash, Hasher};

use log::debug;

use super::TopTwInstance;
use crate::error::RoutingError;
use crate::evaluation;

/// A TOPTW solution over a borrowed [`TopTwInstance`].
///
/// Every route is a cycle threaded through one shared pair of link arrays
/// indexed by global node id: following successors from a route's depot
/// visits that route's POIs and comes back to the depot. The first route is
/// anchored at the canonical depot 0; every further route gets its own depot
/// replica (see [`NodeId`](super::NodeId)).
///
/// Link setters only check index bounds. Keeping each route a single closed
/// cycle is up to the construction heuristic driving the solution; traversals
/// report a broken structure as an error.
///
/// The instance is only ever read, so any number of solutions (one per
/// thread, if desired) can share it.
///
/// # Examples
///
/// ```
/// use u_toptw::models::{Poi, TopTwInstance, RouteSolution};
///
/// let pois = vec![
///     Poi::new(0.0, 0.0),
///     Poi::new(1.0, 0.0).with_score(10.0),
///     Poi::new(2.0, 0.0).with_score(20.0),
/// ];
/// let problem = TopTwInstance::from_pois(pois, 2);
/// let mut sol = RouteSolution::new(&problem);
/// sol.init_solution().unwrap();
/// sol.insert_after(0, 1).unwrap();
/// sol.insert_after(1, 2).unwrap();
///
/// assert_eq!(sol.route_nodes(0).unwrap(), vec![1, 2]);
/// assert_eq!(sol.evaluate_fitness().unwrap(), 30.0);
/// ```
#[derive(Debug, Clone)]
pub struct RouteSolution<'a> {
    problem: &'a TopTwInstance,
    predecessors: Vec<Option<usize>>,
    successors: Vec<Option<usize>>,
    waiting_time: Vec<Option<f64>>,
    position_in_route: Vec<Option<usize>>,
    routes: Vec<Option<usize>>,
    available_vehicles: usize,
    cached_objective: Option<f64>,
}

impl<'a> RouteSolution<'a> {
    /// Creates a solution with every link unset and no route opened.
    ///
    /// Call [`init_solution`](Self::init_solution) before building routes.
    pub fn new(problem: &'a TopTwInstance) -> Self {
        let capacity = problem.poi_count() + problem.vehicles();
        let records = problem.poi_count() + 1;
        Self {
            problem,
            predecessors: vec![None; capacity],
            successors: vec![None; capacity],
            waiting_time: vec![None; records],
            position_in_route: vec![None; records],
            routes: vec![None; problem.vehicles()],
            available_vehicles: problem.vehicles(),
            cached_objective: None,
        }
    }

    /// Resets to a single empty route anchored at depot 0.
    ///
    /// Clears all links, per-node state and the cached objective. Fails if
    /// the instance has no vehicle.
    pub fn init_solution(&mut self) -> Result<(), RoutingError> {
        let vehicles = self.problem.vehicles();
        if vehicles == 0 {
            return Err(RoutingError::NoVehicleAvailable);
        }
        self.predecessors.fill(None);
        self.successors.fill(None);
        self.waiting_time.fill(None);
        self.position_in_route.fill(None);
        self.routes.fill(None);
        self.routes[0] = Some(0);
        self.predecessors[0] = Some(0);
        self.successors[0] = Some(0);
        self.available_vehicles = vehicles - 1;
        self.cached_objective = None;
        debug!("solution reset: {} vehicle(s) left", self.available_vehicles);
        Ok(())
    }

    /// Opens a new empty route and returns its depot replica index.
    ///
    /// The replica is one past the highest replica in use, or
    /// `poi_count() + 1` for the first additional route.
    pub fn add_route(&mut self) -> Result<usize, RoutingError> {
        if self.routes.first().copied().flatten() != Some(0) {
            return Err(RoutingError::SolutionNotInitialized);
        }
        if self.available_vehicles == 0 {
            return Err(RoutingError::NoVehicleAvailable);
        }
        let (slot, depot) = self
            .routes
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.filter(|&d| d != 0).map(|d| (i + 1, d + 1)))
            .last()
            .unwrap_or((1, self.problem.poi_count() + 1));
        if slot >= self.routes.len() || depot >= self.capacity() {
            return Err(RoutingError::NoVehicleAvailable);
        }
        self.routes[slot] = Some(depot);
        self.available_vehicles -= 1;
        self.predecessors[depot] = Some(depot);
        self.successors[depot] = Some(depot);
        debug!(
            "opened route {} at depot {} ({} vehicle(s) left)",
            slot, depot, self.available_vehicles
        );
        Ok(depot)
    }

    /// The instance this solution is built on.
    pub fn problem(&self) -> &'a TopTwInstance {
        self.problem
    }

    /// Number of addressable node indices (POIs plus depot replicas).
    pub fn capacity(&self) -> usize {
        self.predecessors.len()
    }

    fn check_node(&self, node: usize) -> Result<(), RoutingError> {
        if node < self.capacity() {
            Ok(())
        } else {
            Err(RoutingError::NodeOutOfRange {
                node,
                capacity: self.capacity(),
            })
        }
    }

    fn check_record(&self, node: usize) -> Result<(), RoutingError> {
        if node < self.waiting_time.len() {
            Ok(())
        } else {
            Err(RoutingError::NodeOutOfRange {
                node,
                capacity: self.waiting_time.len(),
            })
        }
    }

    /// Returns `true` if `node` anchors one of the created routes.
    pub fn is_depot(&self, node: usize) -> bool {
        self.route_depots().any(|d| d == node)
    }

    /// Vehicles not yet assigned to a route.
    pub fn available_vehicles(&self) -> usize {
        self.available_vehicles
    }

    /// Overrides the number of unassigned vehicles.
    pub fn set_available_vehicles(&mut self, available: usize) {
        self.available_vehicles = available.min(self.problem.vehicles());
    }

    /// Number of routes opened so far.
    pub fn created_routes(&self) -> usize {
        self.problem.vehicles() - self.available_vehicles
    }

    /// Depot of the route in slot `k`, if opened.
    pub fn route_depot(&self, k: usize) -> Option<usize> {
        self.routes.get(k).copied().flatten()
    }

    /// Depots of the created routes, in slot order.
    pub fn route_depots(&self) -> impl Iterator<Item = usize> + '_ {
        self.routes
            .iter()
            .take(self.created_routes())
            .filter_map(|d| *d)
    }

    /// Distance between two nodes.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.problem.distance(i, j)
    }

    /// Predecessor of `node`, if set.
    pub fn predecessor(&self, node: usize) -> Option<usize> {
        self.predecessors.get(node).copied().flatten()
    }

    /// Successor of `node`, if set.
    pub fn successor(&self, node: usize) -> Option<usize> {
        self.successors.get(node).copied().flatten()
    }

    /// All predecessor links.
    pub fn predecessors(&self) -> &[Option<usize>] {
        &self.predecessors
    }

    /// All successor links.
    pub fn successors(&self) -> &[Option<usize>] {
        &self.successors
    }

    /// Sets the predecessor of `node`.
    pub fn set_predecessor(&mut self, node: usize, predecessor: usize) -> Result<(), RoutingError> {
        self.check_node(node)?;
        self.check_node(predecessor)?;
        self.predecessors[node] = Some(predecessor);
        Ok(())
    }

    /// Sets the successor of `node`.
    pub fn set_successor(&mut self, node: usize, successor: usize) -> Result<(), RoutingError> {
        self.check_node(node)?;
        self.check_node(successor)?;
        self.successors[node] = Some(successor);
        Ok(())
    }

    /// Links `node` between `anchor` and its current successor.
    pub fn insert_after(&mut self, anchor: usize, node: usize) -> Result<(), RoutingError> {
        self.check_node(node)?;
        let next = self
            .successor(anchor)
            .ok_or(RoutingError::BrokenLink { node: anchor })?;
        self.successors[anchor] = Some(node);
        self.predecessors[node] = Some(anchor);
        self.successors[node] = Some(next);
        self.predecessors[next] = Some(node);
        Ok(())
    }

    /// Position of a POI within its route, if placed.
    pub fn position_in_route(&self, node: usize) -> Option<usize> {
        self.position_in_route.get(node).copied().flatten()
    }

    /// Records the position of a POI within its route.
    pub fn set_position_in_route(
        &mut self,
        node: usize,
        position: usize,
    ) -> Result<(), RoutingError> {
        self.check_record(node)?;
        self.position_in_route[node] = Some(position);
        Ok(())
    }

    /// A node is placed once it has a position.
    pub fn is_placed(&self, node: usize) -> bool {
        self.position_in_route(node).is_some()
    }

    /// Waiting time recorded for a POI.
    pub fn waiting_time(&self, node: usize) -> Option<f64> {
        self.waiting_time.get(node).copied().flatten()
    }

    /// Records the waiting time of a POI.
    pub fn set_waiting_time(&mut self, node: usize, waiting: f64) -> Result<(), RoutingError> {
        self.check_record(node)?;
        self.waiting_time[node] = Some(waiting);
        Ok(())
    }

    /// Last objective value stored with
    /// [`set_cached_objective`](Self::set_cached_objective).
    ///
    /// Link changes do not refresh it, so it may be stale;
    /// [`evaluate_fitness`](Self::evaluate_fitness) is authoritative.
    pub fn cached_objective(&self) -> Option<f64> {
        self.cached_objective
    }

    /// Stores an objective value in the cache.
    pub fn set_cached_objective(&mut self, value: f64) {
        self.cached_objective = Some(value);
    }

    /// Follows successors from `depot` until it is reached again.
    ///
    /// Returns the visited nodes in order, ending with `depot` itself.
    pub fn walk_from(&self, depot: usize) -> Result<Vec<usize>, RoutingError> {
        let mut visited = Vec::new();
        let mut current = depot;
        loop {
            let next = self
                .successor(current)
                .ok_or(RoutingError::BrokenLink { node: current })?;
            visited.push(next);
            if next == depot {
                return Ok(visited);
            }
            if visited.len() > self.capacity() {
                return Err(RoutingError::RouteNotClosed { depot });
            }
            current = next;
        }
    }

    /// POIs of the route in slot `k`, in visiting order.
    pub fn route_nodes(&self, k: usize) -> Result<Vec<usize>, RoutingError> {
        let depot = self
            .route_depot(k)
            .ok_or(RoutingError::SolutionNotInitialized)?;
        let mut nodes = self.walk_from(depot)?;
        nodes.pop();
        Ok(nodes)
    }

    /// Total score collected by all created routes.
    pub fn evaluate_fitness(&self) -> Result<f64, RoutingError> {
        evaluation::evaluate_fitness(self)
    }

    /// Full feasibility report as text.
    pub fn info_solution(&self) -> Result<String, RoutingError> {
        let report = evaluation::check_feasibility(self)?;
        Ok(crate::report::render_solution(self.problem, &report))
    }

    /// One line per route (`0 - 3 - 1 - 0`) followed by `SC=<fitness>`.
    pub fn summary(&self) -> Result<String, RoutingError> {
        let mut text = String::new();
        for depot in self.route_depots() {
            let mut line = depot.to_string();
            for node in self.walk_from(depot)? {
                line.push_str(&format!(" - {node}"));
            }
            text.push_str(&line);
            text.push('\n');
        }
        text.push_str(&format!("SC={:?}", self.evaluate_fitness()?));
        Ok(text)
    }
}

impl PartialEq for RouteSolution<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.predecessors == other.predecessors
    }
}

impl Eq for RouteSolution<'_> {}

impl Hash for RouteSolution<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.predecessors.hash(state);
    }
}
