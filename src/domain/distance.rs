//! Flat-earth distance approximation between two nearby coordinates.

use super::message::Coordinates;

/// Miles per degree used by the approximation.
pub const MILES_PER_DEGREE: f64 = 69.0;

/// Approximate straight-line distance in miles.
///
/// Treats degrees of longitude and latitude as equal lengths, which only holds
/// for short ranges. The result is not geodesically correct.
pub fn distance(a: Coordinates, b: Coordinates) -> f64 {
    let d_lon = a.longitude - b.longitude;
    let d_lat = a.latitude - b.latitude;
    MILES_PER_DEGREE * (d_lon.powi(2) + d_lat.powi(2)).sqrt()
}

/// Distance between two optional fixes; `None` when either is unknown.
pub fn distance_between(a: Option<Coordinates>, b: Option<Coordinates>) -> Option<f64> {
    Some(distance(a?, b?))
}
