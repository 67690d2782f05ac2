//! Great-circle distance between coordinates.
//!
//! Uses the Haversine formula on a sphere with a fixed radius. Good to well
//! under a meter at pedestrian range, which is all a check-in needs; not exact
//! for antipodal points.

use crate::models::Coordinate;

/// Spherical Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Calculate Haversine distance between two coordinates in meters
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude().to_radians();
    let phi2 = b.latitude().to_radians();
    let delta_phi = (b.latitude() - a.latitude()).to_radians();
    let delta_lambda = (b.longitude() - a.longitude()).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    // Rounding can push h a hair outside [0, 1] for near-antipodal pairs.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// "N meters" under a kilometer, "X.Y km" from there on.
pub fn format_distance(meters: f64) -> String {
    if meters > 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{} meters", meters.round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geo::{Distance, Haversine};

    fn river() -> Coordinate {
        Coordinate::new(46.0123456, -84.7894324)
    }

    fn oak() -> Coordinate {
        Coordinate::new(46.0156789, -84.7856432)
    }

    #[test]
    fn test_zero_distance_to_self() {
        for c in [river(), oak(), Coordinate::new(0.0, 0.0), Coordinate::new(-89.9, 179.9)] {
            assert_eq!(haversine_distance(c, c), 0.0);
        }
    }

    #[test]
    fn test_symmetry() {
        let nyc = Coordinate::new(40.7128, -74.0060);
        let la = Coordinate::new(34.0522, -118.2437);

        assert_eq!(haversine_distance(river(), oak()), haversine_distance(oak(), river()));
        assert_eq!(haversine_distance(nyc, la), haversine_distance(la, nyc));
    }

    #[test]
    fn test_pinned_fixture() {
        let d = haversine_distance(river(), oak());
        assert_abs_diff_eq!(d, 472.23, epsilon = 0.01);
    }

    #[test]
    fn test_long_range() {
        // Distance from NYC to LA is approximately 3,936 km
        let nyc = Coordinate::new(40.7128, -74.0060);
        let la = Coordinate::new(34.0522, -118.2437);

        let dist = haversine_distance(nyc, la);
        assert!((dist - 3_936_000.0).abs() < 50_000.0); // Within 50km
    }

    #[test]
    fn test_agrees_with_geo() {
        // geo's mean radius is a few meters larger; irrelevant at this range.
        let ours = haversine_distance(river(), oak());
        let theirs = Haversine.distance(river().point(), oak().point());
        assert_abs_diff_eq!(ours, theirs, epsilon = 0.01);
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.4), "0 meters");
        assert_eq!(format_distance(472.23), "472 meters");
        assert_eq!(format_distance(1000.0), "1000 meters");
        assert_eq!(format_distance(1586.5), "1.6 km");
    }
}
