//! Euclidean distance matrix over the records of an instance.

use crate::models::{NodeId, Poi};

/// Pairwise Euclidean distances between the depot and the customers.
///
/// Only the `customers + 1` real records are stored. Lookups accept any
/// global node index: indices past the last customer address depot replicas
/// and read the depot's row or column. Distances double as travel times.
///
/// # Examples
///
/// ```
/// use u_toptw::models::Poi;
/// use u_toptw::distance::DistanceMatrix;
///
/// let pois = vec![Poi::new(0.0, 0.0), Poi::new(3.0, 4.0), Poi::new(6.0, 8.0)];
/// let dm = DistanceMatrix::from_pois(&pois);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// // index 3 is a depot replica
/// assert_eq!(dm.get(3, 2), dm.get(0, 2));
/// assert_eq!(dm.records(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    records: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes the distances between `pois` (depot first).
    pub fn from_pois(pois: &[Poi]) -> Self {
        let records = pois.len();
        let data = pois
            .iter()
            .flat_map(|a| pois.iter().map(move |b| a.distance_to(b)))
            .collect();
        Self { records, data }
    }

    /// Number of stored records (depot included).
    pub fn records(&self) -> usize {
        self.records
    }

    fn slot(&self, index: usize) -> usize {
        NodeId::from_index(index, self.records.saturating_sub(1)).attribute_index()
    }

    /// Distance between two global node indices.
    ///
    /// # Panics
    ///
    /// Panics if the matrix holds no record.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[self.slot(from) * self.records + self.slot(to)]
    }

    /// Length of the open path visiting `nodes` in order.
    pub fn path_length(&self, nodes: &[usize]) -> f64 {
        nodes.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }

    /// Returns `true` if `d(i, j)` and `d(j, i)` agree within `tol` for every
    /// pair of records.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.records)
            .flat_map(|i| (i + 1..self.records).map(move |j| (i, j)))
            .all(|(i, j)| (self.get(i, j) - self.get(j, i)).abs() <= tol)
    }
}
