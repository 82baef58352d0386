//! Match result projection

use serde::{Deserialize, Serialize};

use crate::models::Donation;

/// One ranked hit from a radius query.
///
/// A transient projection: distance and urgency are computed at query time
/// and never persisted. Two queries at different instants may score the same
/// donation differently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub donation: Donation,
    /// Great-circle distance from the observer, in kilometers
    pub distance_km: f64,
    /// Urgency score at query time, 0-100
    pub urgency: u8,
}
