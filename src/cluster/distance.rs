use super::error::InvalidParameter;
use super::point::Point;

/// Mean Earth radius in kilometers
///
/// Only a default: every function taking a radius receives it explicitly.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Calculates great-circle (haversine) distance between two points
///
/// Longitude differences are fed to the trigonometric terms as-is, so points on
/// both sides of the antimeridian come out close together without any wrapping.
///
/// # Returns
///
/// Angular distance in radians, in `[0, PI]`
pub fn angular_distance(a: &Point, b: &Point) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    // rounding can push h slightly outside [0, 1]
    2.0 * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Converts a linear distance budget into the angular epsilon used by DBSCAN
///
/// # Errors
///
/// Fails if `km` or `earth_radius_km` is not a positive finite number
pub fn epsilon_from_km(km: f64, earth_radius_km: f64) -> Result<f64, InvalidParameter> {
    if !(km.is_finite() && km > 0.0) {
        return Err(InvalidParameter::Distance(km));
    }
    if !(earth_radius_km.is_finite() && earth_radius_km > 0.0) {
        return Err(InvalidParameter::EarthRadius(earth_radius_km));
    }

    Ok(km / earth_radius_km)
}

/// Converts a point to a unit vector on the sphere
pub(crate) fn to_unit_vector(p: &Point) -> [f64; 3] {
    let lat = p.latitude.to_radians();
    let lon = p.longitude.to_radians();
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// Straight-line distance through the unit sphere matching an angular distance
///
/// Monotonic in the angle on `[0, PI]`, which is what lets the tree prune by chord.
pub(crate) fn chord_length(angle: f64) -> f64 {
    2.0 * (angle.min(std::f64::consts::PI) / 2.0).sin()
}
