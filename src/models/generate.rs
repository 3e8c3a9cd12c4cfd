//! Synthetic instance generation.

use rand::Rng;

use super::{Poi, TimeWindow, TopTwInstance};

/// Side of the square customers are scattered over.
const GRID: f64 = 100.0;

/// Builds a random Solomon-style instance.
///
/// The depot sits in the middle of a 100×100 square and is open over
/// `[0, horizon]`; customers get integer scores in `1..=30`, service times in
/// `1..=10` and a window around a random centre, clipped to the horizon. The
/// route duration cap equals the horizon. Horizons below 1 are raised to 1.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_toptw::models::random_instance;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let problem = random_instance(&mut rng, 20, 3, 240.0);
/// assert_eq!(problem.poi_count(), 20);
/// assert_eq!(problem.vehicles(), 3);
/// assert_eq!(problem.max_time_per_route(), 240.0);
/// ```
pub fn random_instance<R: Rng>(
    rng: &mut R,
    customers: usize,
    vehicles: usize,
    horizon: f64,
) -> TopTwInstance {
    let horizon = horizon.max(1.0);
    let full = TimeWindow::new(0.0, horizon).unwrap_or_default();
    let mut pois = Vec::with_capacity(customers + 1);
    pois.push(Poi::new(GRID / 2.0, GRID / 2.0).with_time_window(full));

    for _ in 0..customers {
        let centre = rng.random_range(0.0..horizon);
        let half_width = rng.random_range(horizon / 20.0..=horizon / 4.0);
        let ready = (centre - half_width).max(0.0);
        let due = (centre + half_width).min(horizon);
        let tw = TimeWindow::new(ready, due).unwrap_or(full);
        let poi = Poi::new(rng.random_range(0.0..GRID), rng.random_range(0.0..GRID))
            .with_score(rng.random_range(1..=30) as f64)
            .with_service_time(rng.random_range(1..=10) as f64)
            .with_time_window(tw);
        pois.push(poi);
    }

    TopTwInstance::from_pois(pois, vehicles).with_max_time_per_route(horizon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_reproducible() {
        let a = random_instance(&mut StdRng::seed_from_u64(42), 10, 2, 100.0);
        let b = random_instance(&mut StdRng::seed_from_u64(42), 10, 2, 100.0);
        assert_eq!(a.pois(), b.pois());
    }

    #[test]
    fn test_windows_inside_horizon() {
        let p = random_instance(&mut StdRng::seed_from_u64(1), 50, 4, 300.0);
        for poi in &p.pois()[1..] {
            let tw = poi.time_window();
            assert!(tw.ready() >= 0.0 && tw.due() <= 300.0);
            assert!((1.0..=30.0).contains(&poi.score()));
        }
        assert_eq!(p.score(0), 0.0);
        assert!(p.distances().is_symmetric(1e-12));
    }

    #[test]
    fn test_degenerate_horizon() {
        let p = random_instance(&mut StdRng::seed_from_u64(3), 3, 1, 0.0);
        assert_eq!(p.max_time_per_route(), 1.0);
    }
}
