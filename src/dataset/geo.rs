use serde::{Deserialize, Serialize};

/// Mean earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Fixed point every dataset distance is measured from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for ReferencePoint {
    fn default() -> Self {
        ReferencePoint {
            name: "Grenoble".to_string(),
            latitude: 45.166667,
            longitude: 5.716667,
        }
    }
}

impl ReferencePoint {
    /// Great-circle distance in km from this point to `(latitude, longitude)`.
    pub fn distance_km(&self, latitude: f64, longitude: f64) -> f64 {
        haversine_km(self.latitude, self.longitude, latitude, longitude)
    }
}

/// Haversine distance between two coordinates given in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance_to_self() {
        let grenoble = ReferencePoint::default();
        assert!(grenoble.distance_km(45.166667, 5.716667).abs() < 1e-9);
    }

    #[test]
    fn test_grenoble_to_paris() {
        let grenoble = ReferencePoint::default();
        let d = grenoble.distance_km(48.8566, 2.3522);
        assert!((d - 480.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn test_symmetric() {
        let a = haversine_km(45.0, 5.0, 43.3, 5.4);
        let b = haversine_km(43.3, 5.4, 45.0, 5.0);
        assert!((a - b).abs() < 1e-9);
    }
}
