//! Great-circle distance between coordinates

use thiserror::Error;

use crate::types::Coordinate;

/// Earth mean radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Errors from geographic calculations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeoError {
    #[error("coordinate out of range: latitude must be in [-90, 90], longitude in [-180, 180]")]
    OutOfRange,
}

/// Great-circle distance between two coordinates in kilometers.
///
/// Haversine on a sphere of Earth's mean radius; accurate to well within
/// normal GPS error at the 1-25 km radii this platform queries over.
/// Symmetric, and zero for identical inputs.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> Result<f64, GeoError> {
    if !a.is_valid() || !b.is_valid() {
        return Err(GeoError::OutOfRange);
    }

    let dlat = (b.latitude - a.latitude).to_radians();
    let dlng = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1.0 near antipodal pairs, and
    // asin of anything past 1.0 is NaN. Clamp before taking the root.
    Ok(2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin())
}
