//! Great-circle distance between coordinate pairs.

/// Earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine distance in miles between two points given in degrees.
///
/// Pure and deterministic. Inputs outside [-90, 90] latitude or
/// [-180, 180] longitude are not validated; supplying them is the caller's
/// mistake and yields a meaningless result.
#[must_use]
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}
