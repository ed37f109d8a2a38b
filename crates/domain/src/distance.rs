//! Great-circle distance estimation
//!
//! Straight-line (haversine) distance between two coordinates. This is not a
//! road distance.

use crate::value_objects::{Coordinate, GeoLocation};

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two locations on a sphere of
/// [`EARTH_RADIUS_KM`]
#[must_use]
pub fn haversine_km(from: GeoLocation, to: GeoLocation) -> f64 {
    let (phi1, phi2) = (from.latitude().to_radians(), to.latitude().to_radians());
    let half_dphi = (to.latitude() - from.latitude()).to_radians() / 2.0;
    let half_dlambda = (to.longitude() - from.longitude()).to_radians() / 2.0;

    let h = (phi1.cos() * phi2.cos()).mul_add(half_dlambda.sin().powi(2), half_dphi.sin().powi(2));
    // Rounding can push h slightly above 1 for antipodal points
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Estimate the distance between two coordinates in kilometers
///
/// Returns `None` when either coordinate is absent. Symmetric, and zero for
/// identical positions.
#[must_use]
pub fn estimate(a: Option<&Coordinate>, b: Option<&Coordinate>) -> Option<f64> {
    let (a, b) = a.zip(b)?;
    Some(a.distance_km(b))
}

/// Render a distance with two decimals, e.g. `"1148.09 km"`
#[must_use]
pub fn format_distance_km(km: f64) -> String {
    format!("{km:.2} km")
}
