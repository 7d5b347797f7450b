//! Distances on the WGS-84 ellipsoid.

use ::geo::{Distance, Geodesic, Point};

use super::Coordinate;

impl From<Coordinate> for Point<f64> {
    fn from(c: Coordinate) -> Self {
        Point::new(c.lon, c.lat)
    }
}

/// Geodesic distance in kilometers (Karney's algorithm).
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    Geodesic.distance(Point::from(a), Point::from(b)) / 1000.0
}
