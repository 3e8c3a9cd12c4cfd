//! Point of interest and time window types.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::RoutingError;

/// A time window constraint for service at a point of interest.
///
/// A vehicle must arrive no later than `due` and may arrive as early as
/// `ready` (waiting is allowed if early).
///
/// # Examples
///
/// ```
/// use u_toptw::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert_eq!(tw.waiting_time(40.0), 60.0);
/// assert!(!tw.is_violated(200.0));
/// assert!(tw.is_violated(250.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeWindow {
    ready: f64,
    due: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `ready > due` or either value is non-finite.
    pub fn new(ready: f64, due: f64) -> Option<Self> {
        if !ready.is_finite() || !due.is_finite() || ready > due {
            return None;
        }
        Some(Self { ready, due })
    }

    /// Earliest allowable start of service.
    pub fn ready(&self) -> f64 {
        self.ready
    }

    /// Latest allowable arrival time.
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Returns the waiting time if arriving at the given time.
    pub fn waiting_time(&self, arrival: f64) -> f64 {
        if arrival < self.ready {
            self.ready - arrival
        } else {
            0.0
        }
    }

    /// Returns `true` if arriving at the given time violates this window.
    pub fn is_violated(&self, arrival: f64) -> bool {
        arrival > self.due
    }
}

impl<'de> Deserialize<'de> for TimeWindow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Bounds {
            ready: f64,
            due: f64,
        }

        let Bounds { ready, due } = Bounds::deserialize(deserializer)?;
        TimeWindow::new(ready, due)
            .ok_or_else(|| de::Error::custom(RoutingError::InvalidTimeWindow { ready, due }))
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            ready: 0.0,
            due: 0.0,
        }
    }
}

/// A point of interest (or the depot) in an orienteering instance.
///
/// Index 0 of an instance is the depot; its score and service time are
/// conventionally zero.
///
/// # Examples
///
/// ```
/// use u_toptw::models::{Poi, TimeWindow};
///
/// let p = Poi::new(41.0, 49.0)
///     .with_score(10.0)
///     .with_service_time(10.0)
///     .with_time_window(TimeWindow::new(0.0, 200.0).unwrap());
/// assert_eq!(p.score(), 10.0);
/// assert_eq!(p.time_window().due(), 200.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    x: f64,
    y: f64,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    service_time: f64,
    time_window: TimeWindow,
}

impl Poi {
    /// Creates a POI at the given coordinates with zero score, zero service
    /// time and a `[0, 0]` window.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Sets the collected reward.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Sets the service duration.
    pub fn with_service_time(mut self, service_time: f64) -> Self {
        self.service_time = service_time;
        self
    }

    /// Sets the time window.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = tw;
        self
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Reward collected when this POI is visited.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Service duration.
    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    /// Time window constraint.
    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub(crate) fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub(crate) fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    pub(crate) fn set_service_time(&mut self, service_time: f64) {
        self.service_time = service_time;
    }

    pub(crate) fn set_time_window(&mut self, tw: TimeWindow) {
        self.time_window = tw;
    }

    /// Euclidean distance to another POI.
    pub fn distance_to(&self, other: &Poi) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(20.0, 10.0).is_none());
        assert!(TimeWindow::new(f64::NAN, 10.0).is_none());
        assert!(TimeWindow::new(10.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_time_window_waiting() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert!((tw.waiting_time(5.0) - 5.0).abs() < 1e-10);
        assert!((tw.waiting_time(15.0)).abs() < 1e-10);
        assert_eq!(tw.waiting_time(20.0), 0.0);
    }

    #[test]
    fn test_time_window_violated() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert!(!tw.is_violated(20.0));
        assert!(tw.is_violated(20.1));
    }

    #[test]
    fn test_poi_defaults() {
        let p = Poi::new(10.0, 20.0);
        assert_eq!(p.x(), 10.0);
        assert_eq!(p.y(), 20.0);
        assert_eq!(p.score(), 0.0);
        assert_eq!(p.service_time(), 0.0);
        assert_eq!(*p.time_window(), TimeWindow::default());
    }

    #[test]
    fn test_poi_distance() {
        let a = Poi::new(0.0, 0.0);
        let b = Poi::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-10);
    }
}
