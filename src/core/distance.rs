use crate::models::GeoPoint;

/// Earth's radius in miles
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Calculate the Haversine great-circle distance between two points in miles
///
/// # Arguments
/// * `a` - First point in degrees
/// * `b` - Second point in degrees
///
/// # Returns
/// Distance in miles
///
/// The formula is defined for any pair of floats; coordinates outside the
/// valid latitude/longitude ranges are accepted numerically and range
/// validation is left to the caller.
#[inline]
pub fn distance_miles(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat_a_rad = a.latitude.to_radians();
    let lat_b_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a_rad.cos() * lat_b_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}
