//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether latitude and longitude are inside the valid WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Radius presets offered by the calling surface, in kilometers.
///
/// The engine itself accepts any positive radius; these are the values the
/// client UI exposes.
pub const RADIUS_PRESETS_KM: [f64; 5] = [1.0, 3.0, 5.0, 10.0, 25.0];
