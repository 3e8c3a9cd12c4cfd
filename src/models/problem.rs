//! TOPTW problem instance.

use std::fmt;

use super::{NodeId, Poi, TimeWindow};
use crate::distance::DistanceMatrix;
use crate::error::RoutingError;
use crate::report::{format_row, Cell, COLUMN_WIDTH};

/// A Team Orienteering Problem with Time Windows instance.
///
/// Holds `customers + 1` records: index 0 is the depot, `1..=customers` are
/// the POIs. Any index beyond `customers` addresses a depot replica and
/// resolves to the depot record (see [`NodeId`]).
///
/// The distance matrix is not kept in sync with coordinate setters; call
/// [`calculate_distance_matrix`](Self::calculate_distance_matrix) after
/// editing positions. Constructors and [`add_node`](Self::add_node) compute it.
///
/// A [`RouteSolution`](super::RouteSolution) only borrows the instance and
/// addresses replicas `customers + 1 ..= customers + vehicles - 1` without
/// registering them. [`add_depot_replica`](Self::add_depot_replica) is a
/// counter for callers that own the instance and want to record how many
/// route anchors they handed out; no lookup depends on it.
///
/// # Examples
///
/// ```
/// use u_toptw::models::{Poi, TopTwInstance};
///
/// let pois = vec![
///     Poi::new(0.0, 0.0),
///     Poi::new(3.0, 4.0).with_score(10.0),
///     Poi::new(6.0, 8.0).with_score(20.0),
/// ];
/// let problem = TopTwInstance::from_pois(pois, 2).with_max_time_per_route(100.0);
///
/// assert_eq!(problem.poi_count(), 2);
/// assert!((problem.distance(0, 1) - 5.0).abs() < 1e-10);
/// // index 3 is the replica anchoring the second route
/// assert_eq!(problem.distance(3, 1), problem.distance(0, 1));
/// ```
#[derive(Debug, Clone)]
pub struct TopTwInstance {
    customers: usize,
    pois: Vec<Poi>,
    vehicles: usize,
    depot_replicas: usize,
    max_time_per_route: f64,
    max_routes: usize,
    distances: DistanceMatrix,
}

impl TopTwInstance {
    /// Creates a zero-filled instance with `customers` POIs plus the depot.
    pub fn new(customers: usize, vehicles: usize) -> Self {
        Self::from_pois(vec![Poi::default(); customers + 1], vehicles)
    }

    /// Creates an instance from its records (depot first) and computes the
    /// distance matrix.
    ///
    /// An empty `pois` list is treated as a lone depot at the origin.
    pub fn from_pois(mut pois: Vec<Poi>, vehicles: usize) -> Self {
        if pois.is_empty() {
            pois.push(Poi::default());
        }
        let distances = DistanceMatrix::from_pois(&pois);
        Self {
            customers: pois.len() - 1,
            pois,
            vehicles,
            depot_replicas: 0,
            max_time_per_route: 0.0,
            max_routes: vehicles,
            distances,
        }
    }

    /// Sets the route duration cap.
    pub fn with_max_time_per_route(mut self, max: f64) -> Self {
        self.max_time_per_route = max;
        self
    }

    /// Sets the reported route limit (defaults to the vehicle count).
    pub fn with_max_routes(mut self, max: usize) -> Self {
        self.max_routes = max;
        self
    }

    /// Number of customers (excluding the depot).
    pub fn poi_count(&self) -> usize {
        self.customers
    }

    /// Fleet size.
    pub fn vehicles(&self) -> usize {
        self.vehicles
    }

    /// Number of depot replicas registered so far.
    pub fn depot_replicas(&self) -> usize {
        self.depot_replicas
    }

    /// Route duration cap.
    pub fn max_time_per_route(&self) -> f64 {
        self.max_time_per_route
    }

    /// Reported route limit.
    pub fn max_routes(&self) -> usize {
        self.max_routes
    }

    /// Records indexed `0..=poi_count()`.
    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    /// Underlying distance matrix over the `poi_count() + 1` records.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Returns `true` if `index` addresses a depot replica.
    pub fn is_depot(&self, index: usize) -> bool {
        index > self.customers
    }

    /// Classifies a global index.
    pub fn node_id(&self, index: usize) -> NodeId {
        NodeId::from_index(index, self.customers)
    }

    /// Record for a node; replicas resolve to the depot.
    pub fn poi(&self, index: usize) -> &Poi {
        &self.pois[self.node_id(index).attribute_index()]
    }

    /// Distance between two nodes; replicas read the depot's distances.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances.get(i, j)
    }

    /// Travel time between two nodes (equal to the distance).
    pub fn travel_time(&self, i: usize, j: usize) -> f64 {
        self.distance(i, j)
    }

    /// Length of an open path visiting `route` in order.
    pub fn route_distance(&self, route: &[usize]) -> f64 {
        self.distances.path_length(route)
    }

    /// Summed length of several open paths.
    pub fn routes_distance(&self, routes: &[Vec<usize>]) -> f64 {
        routes.iter().map(|r| self.route_distance(r)).sum()
    }

    /// X-coordinate of a node.
    pub fn x(&self, index: usize) -> f64 {
        self.poi(index).x()
    }

    /// Y-coordinate of a node.
    pub fn y(&self, index: usize) -> f64 {
        self.poi(index).y()
    }

    /// Score of a node.
    pub fn score(&self, index: usize) -> f64 {
        self.poi(index).score()
    }

    /// Ready time of a node.
    pub fn ready_time(&self, index: usize) -> f64 {
        self.poi(index).time_window().ready()
    }

    /// Due time of a node.
    pub fn due_time(&self, index: usize) -> f64 {
        self.poi(index).time_window().due()
    }

    /// Service time of a node.
    pub fn service_time(&self, index: usize) -> f64 {
        self.poi(index).service_time()
    }

    fn record_mut(&mut self, index: usize) -> Result<&mut Poi, RoutingError> {
        let capacity = self.pois.len();
        self.pois
            .get_mut(index)
            .ok_or(RoutingError::NodeOutOfRange {
                node: index,
                capacity,
            })
    }

    /// Moves a record. The distance matrix is left untouched.
    pub fn set_position(&mut self, index: usize, x: f64, y: f64) -> Result<(), RoutingError> {
        self.record_mut(index)?.set_position(x, y);
        Ok(())
    }

    /// Sets the score of a record.
    pub fn set_score(&mut self, index: usize, score: f64) -> Result<(), RoutingError> {
        self.record_mut(index)?.set_score(score);
        Ok(())
    }

    /// Sets the time window of a record.
    pub fn set_time_window(&mut self, index: usize, tw: TimeWindow) -> Result<(), RoutingError> {
        self.record_mut(index)?.set_time_window(tw);
        Ok(())
    }

    /// Sets the service time of a record.
    pub fn set_service_time(&mut self, index: usize, service: f64) -> Result<(), RoutingError> {
        self.record_mut(index)?.set_service_time(service);
        Ok(())
    }

    /// Recomputes every Euclidean distance from the current coordinates.
    pub fn calculate_distance_matrix(&mut self) {
        self.distances = DistanceMatrix::from_pois(&self.pois);
    }

    /// Appends a customer, recomputes the matrix and returns the new index.
    ///
    /// Indices previously addressing replicas shift by one; call this before
    /// any solution is built on the instance.
    pub fn add_node(&mut self, poi: Poi) -> usize {
        self.pois.push(poi);
        self.customers += 1;
        self.calculate_distance_matrix();
        self.customers
    }

    /// Registers one more depot replica and returns the replica count.
    ///
    /// Replica attributes always come from the depot record, so this only
    /// tracks how many route anchors have been handed out.
    pub fn add_depot_replica(&mut self) -> usize {
        self.depot_replicas += 1;
        self.depot_replicas
    }
}

impl fmt::Display for TopTwInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes: {}", self.customers)?;
        let header = [
            "CUST NO.",
            "XCOORD.",
            "YCOORD.",
            "SCORE",
            "READY TIME",
            "DUE DATE",
            "SERVICE TIME",
        ]
        .map(Cell::from);
        writeln!(f, "{}", format_row(&header, COLUMN_WIDTH))?;
        for (i, poi) in self.pois.iter().enumerate() {
            let row = [
                Cell::Int(i as i64),
                Cell::Real(poi.x()),
                Cell::Real(poi.y()),
                Cell::Real(poi.score()),
                Cell::Real(poi.time_window().ready()),
                Cell::Real(poi.time_window().due()),
                Cell::Real(poi.service_time()),
            ];
            writeln!(f, "{}", format_row(&row, COLUMN_WIDTH))?;
        }
        writeln!(f, "Vehicles: {}", self.vehicles)?;
        let vehicles = ["VEHICLE", "CAPACITY"].map(Cell::from);
        writeln!(f, "{}", format_row(&vehicles, COLUMN_WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TopTwInstance {
        let tw = TimeWindow::new(0.0, 100.0).expect("valid");
        let pois = vec![
            Poi::new(0.0, 0.0).with_time_window(tw),
            Poi::new(3.0, 4.0)
                .with_score(10.0)
                .with_service_time(2.0)
                .with_time_window(tw),
            Poi::new(0.0, 8.0)
                .with_score(20.0)
                .with_service_time(3.0)
                .with_time_window(tw),
        ];
        TopTwInstance::from_pois(pois, 3).with_max_time_per_route(50.0)
    }

    #[test]
    fn test_new_zero_filled() {
        let p = TopTwInstance::new(4, 2);
        assert_eq!(p.poi_count(), 4);
        assert_eq!(p.pois().len(), 5);
        assert_eq!(p.vehicles(), 2);
        assert_eq!(p.max_routes(), 2);
        assert_eq!(p.distance(1, 4), 0.0);
    }

    #[test]
    fn test_replica_normalisation() {
        let p = sample();
        for replica in 3..6 {
            assert!(p.is_depot(replica));
            for j in 0..3 {
                assert_eq!(p.distance(replica, j), p.distance(0, j));
                assert_eq!(p.distance(j, replica), p.distance(j, 0));
            }
            assert_eq!(p.score(replica), p.score(0));
            assert_eq!(p.due_time(replica), p.due_time(0));
        }
        assert!(!p.is_depot(2));
    }

    #[test]
    fn test_matrix_invariants() {
        let p = sample();
        assert!(p.distances().is_symmetric(1e-12));
        for i in 0..3 {
            assert_eq!(p.distance(i, i), 0.0);
        }
        assert_eq!(p.travel_time(1, 2), p.distance(1, 2));
    }

    #[test]
    fn test_route_distance() {
        let p = sample();
        let d = p.route_distance(&[0, 1, 2, 3]);
        assert!((d - (5.0 + 5.0 + 8.0)).abs() < 1e-10);
        assert_eq!(p.route_distance(&[]), 0.0);
        let total = p.routes_distance(&[vec![0, 1, 0], vec![4, 2, 4]]);
        assert!((total - 26.0).abs() < 1e-10);
    }

    #[test]
    fn test_setters_require_recompute() {
        let mut p = sample();
        p.set_position(1, 6.0, 8.0).expect("in range");
        assert!((p.distance(0, 1) - 5.0).abs() < 1e-10);
        p.calculate_distance_matrix();
        assert!((p.distance(0, 1) - 10.0).abs() < 1e-10);
        assert!(p.set_score(9, 1.0).is_err());
    }

    #[test]
    fn test_add_node() {
        let mut p = sample();
        let idx = p.add_node(Poi::new(0.0, 3.0).with_score(5.0));
        assert_eq!(idx, 3);
        assert_eq!(p.poi_count(), 3);
        assert!((p.distance(0, 3) - 3.0).abs() < 1e-10);
        assert!(!p.is_depot(3));
    }

    #[test]
    fn test_add_depot_replica() {
        let mut p = sample();
        assert_eq!(p.add_depot_replica(), 1);
        assert_eq!(p.add_depot_replica(), 2);
        assert_eq!(p.depot_replicas(), 2);
        // the counter does not change how replica indices resolve
        assert_eq!(p.distance(4, 1), p.distance(0, 1));
        assert_eq!(p.distance(9, 2), p.distance(0, 2));
    }

    #[test]
    fn test_display_table() {
        let text = sample().to_string();
        assert!(text.starts_with("Nodes: 2\n"));
        assert!(text.contains("       CUST NO."));
        assert!(text.contains("         3.000"));
        assert!(text.contains("Vehicles: 3\n"));
    }
}
