//! Urgency scoring for donations
//!
//! Urgency is a derived value, recomputed on demand from `created_at`, the
//! perishability window, and the current time. It is never persisted, so it
//! cannot drift from the formula it represents.

use chrono::{DateTime, Utc};
use shared::Donation;

use crate::config::UrgencyConfig;

/// Derives a 0-100 priority score from a donation's remaining shelf time.
///
/// The curve is linear in the elapsed fraction of the donation's own window:
/// a donation with a 1-hour window at 30 minutes remaining scores higher than
/// one with a 24-hour window at the same absolute remaining time. A freshly
/// created donation scores the configured floor; an expired one scores 100.
/// The curve shape is a tunable, not a law; only monotonicity is contractual.
#[derive(Debug, Clone, Copy)]
pub struct UrgencyScorer {
    floor: u8,
}

impl UrgencyScorer {
    pub fn new(config: &UrgencyConfig) -> Self {
        Self {
            floor: config.floor.min(100),
        }
    }

    /// Score the donation at the given instant.
    ///
    /// Pure in its inputs: repeated calls at the same instant yield the same
    /// value. Status plays no part.
    pub fn score(&self, donation: &Donation, now: DateTime<Utc>) -> u8 {
        let window_secs = donation.perishability_window().num_seconds();
        if window_secs <= 0 {
            return 100;
        }

        let elapsed_secs = (now - donation.created_at).num_seconds();
        if elapsed_secs >= window_secs {
            return 100;
        }
        if elapsed_secs <= 0 {
            return self.floor;
        }

        let fraction = elapsed_secs as f64 / window_secs as f64;
        let span = f64::from(100 - self.floor);
        let score = f64::from(self.floor) + span * fraction;
        (score.round() as u8).clamp(self.floor, 100)
    }
}
