//! Serde representation of an instance.

use serde::{Deserialize, Serialize};

use super::{Poi, TopTwInstance};

/// Serializable description of a [`TopTwInstance`].
///
/// `pois[0]` is the depot. The distance matrix is derived, not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceData {
    /// Fleet size.
    pub vehicles: usize,
    /// Route duration cap.
    pub max_time_per_route: f64,
    /// Reported route limit; defaults to `vehicles`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_routes: Option<usize>,
    /// Depot followed by the customers.
    pub pois: Vec<Poi>,
}

impl From<InstanceData> for TopTwInstance {
    fn from(data: InstanceData) -> Self {
        let max_routes = data.max_routes.unwrap_or(data.vehicles);
        TopTwInstance::from_pois(data.pois, data.vehicles)
            .with_max_time_per_route(data.max_time_per_route)
            .with_max_routes(max_routes)
    }
}

impl From<&TopTwInstance> for InstanceData {
    fn from(problem: &TopTwInstance) -> Self {
        Self {
            vehicles: problem.vehicles(),
            max_time_per_route: problem.max_time_per_route(),
            max_routes: Some(problem.max_routes()),
            pois: problem.pois().to_vec(),
        }
    }
}

#[cfg(feature = "json")]
impl TopTwInstance {
    /// Reads an instance from an [`InstanceData`] JSON document.
    ///
    /// Every POI must carry a `time_window` with `ready <= due`; `score` and
    /// `service_time` default to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_toptw::models::TopTwInstance;
    ///
    /// let doc = r#"{
    ///     "vehicles": 2,
    ///     "max_time_per_route": 100.0,
    ///     "pois": [
    ///         { "x": 0.0, "y": 0.0, "time_window": { "ready": 0.0, "due": 100.0 } },
    ///         {
    ///             "x": 3.0, "y": 4.0, "score": 10.0,
    ///             "time_window": { "ready": 10.0, "due": 60.0 }
    ///         }
    ///     ]
    /// }"#;
    /// let problem = TopTwInstance::from_json(doc).unwrap();
    /// assert_eq!(problem.poi_count(), 1);
    /// assert!((problem.distance(0, 1) - 5.0).abs() < 1e-10);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, crate::error::RoutingError> {
        let data: InstanceData = serde_json::from_str(text)
            .map_err(|e| crate::error::RoutingError::Json(e.to_string()))?;
        Ok(data.into())
    }

    /// Writes the instance as an [`InstanceData`] JSON document.
    pub fn to_json(&self) -> Result<String, crate::error::RoutingError> {
        serde_json::to_string_pretty(&InstanceData::from(self))
            .map_err(|e| crate::error::RoutingError::Json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;

    #[test]
    fn test_data_roundtrip_through_instance() {
        let tw = TimeWindow::new(0.0, 50.0).expect("valid");
        let data = InstanceData {
            vehicles: 3,
            max_time_per_route: 50.0,
            max_routes: None,
            pois: vec![
                Poi::new(0.0, 0.0).with_time_window(tw),
                Poi::new(1.0, 1.0).with_score(4.0).with_time_window(tw),
            ],
        };
        let problem = TopTwInstance::from(data.clone());
        assert_eq!(problem.max_routes(), 3);
        let back = InstanceData::from(&problem);
        assert_eq!(back.pois, data.pois);
        assert_eq!(back.max_routes, Some(3));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_errors() {
        assert!(matches!(
            TopTwInstance::from_json("{ not json"),
            Err(crate::error::RoutingError::Json(_))
        ));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_rejects_inverted_window() {
        let doc = r#"{
            "vehicles": 1,
            "max_time_per_route": 10.0,
            "pois": [{ "x": 0.0, "y": 0.0, "time_window": { "ready": 8.0, "due": 2.0 } }]
        }"#;
        match TopTwInstance::from_json(doc) {
            Err(crate::error::RoutingError::Json(msg)) => {
                assert!(msg.contains("invalid time window [8, 2]"), "{msg}");
            }
            other => panic!("expected a document error, got {other:?}"),
        }
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_requires_window() {
        let doc = r#"{
            "vehicles": 1,
            "max_time_per_route": 10.0,
            "pois": [{ "x": 0.0, "y": 0.0 }]
        }"#;
        assert!(matches!(
            TopTwInstance::from_json(doc),
            Err(crate::error::RoutingError::Json(_))
        ));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_roundtrip() {
        let problem = TopTwInstance::from_pois(
            vec![Poi::new(0.0, 0.0), Poi::new(6.0, 8.0).with_score(2.0)],
            1,
        )
        .with_max_time_per_route(30.0);
        let text = problem.to_json().expect("serializable");
        let back = TopTwInstance::from_json(&text).expect("valid");
        assert_eq!(back.pois(), problem.pois());
        assert_eq!(back.max_time_per_route(), 30.0);
    }
}
