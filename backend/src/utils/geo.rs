use crate::constants::{EARTH_RADIUS_KM, KM_PER_DEGREE_LAT};

/// Great-circle distance between two coordinates in kilometers.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * a.sqrt().asin()
}

/// Degree window that is guaranteed to contain every point within
/// `radius_km` of the center. Used as a cheap SQL prefilter; the exact
/// haversine check runs on the rows it lets through.
pub fn bounding_box(lat: f64, lon: f64, radius_km: f64) -> (f64, f64, f64, f64) {
    let d_lat = radius_km / KM_PER_DEGREE_LAT;

    // Longitude degrees shrink with latitude; clamp the cosine so the window
    // stays finite near the poles.
    let lat_cos = lat.to_radians().cos().max(0.01);
    let d_lon = radius_km / (KM_PER_DEGREE_LAT * lat_cos);

    (lat - d_lat, lat + d_lat, lon - d_lon, lon + d_lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_distance() {
        assert!(haversine_km(52.52, 13.405, 52.52, 13.405) < 1e-9);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Berlin -> Hamburg is roughly 255 km as the crow flies
        let d = haversine_km(52.52, 13.405, 53.5511, 9.9937);
        assert!((d - 255.0).abs() < 5.0, "got {}", d);
    }

    #[test]
    fn test_haversine_short_distance() {
        // Two points ~1.1 km apart (0.01 degrees of latitude)
        let d = haversine_km(48.1374, 11.5755, 48.1474, 11.5755);
        assert!((d - 1.11).abs() < 0.05, "got {}", d);
    }

    #[test]
    fn test_bounding_box_contains_radius() {
        let (lat_min, lat_max, lon_min, lon_max) = bounding_box(48.0, 11.0, 10.0);

        // Points exactly radius away in the cardinal directions stay inside
        // the window
        assert!(lat_min < 48.0 - 10.0 / KM_PER_DEGREE_LAT + 1e-9);
        assert!(lat_max > 48.0 + 10.0 / KM_PER_DEGREE_LAT - 1e-9);
        assert!(lon_min < 11.0 && lon_max > 11.0);

        let east_edge = haversine_km(48.0, 11.0, 48.0, lon_max);
        assert!(east_edge >= 10.0);
    }
}
