//! Great-circle distance helpers.
//!
//! Coordinates enter the core only through the device location provider,
//! so inputs are assumed to be inside the valid latitude/longitude ranges.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// WGS84-style point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn distance_km_to(&self, other: &Coordinates) -> f64 {
        distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Haversine distance in kilometres between two points.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` marginally above 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::{distance_km, Coordinates, EARTH_RADIUS_KM};

    #[test]
    fn same_point_is_zero() {
        for (lat, lon) in [(0.0, 0.0), (48.8566, 2.3522), (-90.0, 180.0), (89.9, -179.9)] {
            assert_eq!(distance_km(lat, lon, lat, lon), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let forward = distance_km(40.7128, -74.0060, 35.6762, 139.6503);
        let backward = distance_km(35.6762, 139.6503, 40.7128, -74.0060);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn paris_to_london() {
        let km = distance_km(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((341.5..=345.5).contains(&km), "got {km}");
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let km = distance_km(0.0, 0.0, 0.0, 180.0);
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((km - expected).abs() < 1e-6);
    }

    #[test]
    fn coordinates_delegate_to_distance_km() {
        let paris = Coordinates::new(48.8566, 2.3522);
        let london = Coordinates::new(51.5074, -0.1278);
        assert_eq!(
            paris.distance_km_to(&london),
            distance_km(48.8566, 2.3522, 51.5074, -0.1278)
        );
    }
}
