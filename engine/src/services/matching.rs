//! Proximity matching engine
//!
//! Given an observer location and radius, fetches candidate donations from
//! the store, filters them to the radius, and ranks them by urgency. Results
//! are a read-time snapshot: a donation whose status changed moments before
//! the query returns may still appear. That is tolerated by contract, not a
//! correctness defect.

use std::sync::Arc;

use shared::{distance_km, Coordinate, DonationStatus, MatchResult, Role};

use crate::config::EngineConfig;
use crate::error::{AppError, AppResult};
use crate::external::{
    ActorFilter, Clock, DonationFilter, NotificationEvent, NotificationKind, NotificationTrigger,
    Store,
};
use crate::services::urgency::UrgencyScorer;

/// Stateless radius-query service
#[derive(Clone)]
pub struct MatchEngine {
    store: Arc<dyn Store>,
    notifier: Arc<dyn NotificationTrigger>,
    clock: Arc<dyn Clock>,
    scorer: UrgencyScorer,
    high_threshold: u8,
}

impl MatchEngine {
    pub fn new(
        store: Arc<dyn Store>,
        notifier: Arc<dyn NotificationTrigger>,
        clock: Arc<dyn Clock>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            clock,
            scorer: UrgencyScorer::new(&config.urgency),
            high_threshold: config.urgency.high_threshold,
        }
    }

    /// Find donations within `radius_km` of the observer, ranked by urgency
    /// descending, then distance ascending, then donation id.
    ///
    /// Candidates without a valid pickup coordinate are excluded from the
    /// result rather than failing the query; that soft exclusion is the only
    /// condition this method does not surface.
    pub async fn find_matches(
        &self,
        observer: Coordinate,
        radius_km: f64,
        statuses: &[DonationStatus],
    ) -> AppResult<Vec<MatchResult>> {
        shared::validate_radius_km(radius_km)
            .map_err(|e| AppError::InvalidArgument(e.to_string()))?;
        shared::validate_coordinate(&observer)
            .map_err(|e| AppError::InvalidCoordinate(e.to_string()))?;

        let candidates = self
            .store
            .fetch_donations(&DonationFilter::with_statuses(statuses))
            .await?;
        let now = self.clock.now();

        let mut results: Vec<MatchResult> = Vec::new();
        for donation in candidates {
            let Some(pickup) = donation.pickup_location else {
                tracing::debug!(donation_id = %donation.id, "skipping candidate without pickup coordinate");
                continue;
            };
            let distance = match distance_km(&observer, &pickup) {
                Ok(d) => d,
                Err(e) => {
                    tracing::debug!(donation_id = %donation.id, error = %e, "skipping candidate with invalid stored coordinate");
                    continue;
                }
            };
            if distance > radius_km {
                continue;
            }
            let urgency = self.scorer.score(&donation, now);
            results.push(MatchResult {
                donation,
                distance_km: distance,
                urgency,
            });
        }

        results.sort_by(|a, b| {
            b.urgency
                .cmp(&a.urgency)
                .then(a.distance_km.total_cmp(&b.distance_km))
                .then(a.donation.id.cmp(&b.donation.id))
        });

        self.alert_high_urgency(&results, radius_km).await;

        Ok(results)
    }

    /// Fire a high-urgency notification for results at or above the
    /// threshold, at most once per donation per threshold crossing.
    ///
    /// The claim lives in the store so repeated queries (from any observer)
    /// do not re-alert. Failures here are logged and never fail the query;
    /// the ranked results are the contract of `find_matches`.
    async fn alert_high_urgency(&self, results: &[MatchResult], radius_km: f64) {
        let hot: Vec<_> = results
            .iter()
            .filter(|r| r.urgency >= self.high_threshold)
            .collect();
        if hot.is_empty() {
            return;
        }

        let responders = match self
            .store
            .fetch_actors(&ActorFilter {
                roles: vec![Role::Ngo, Role::Volunteer],
            })
            .await
        {
            Ok(actors) => actors,
            Err(e) => {
                tracing::warn!(error = %e, "could not fetch responders for high-urgency alert");
                return;
            }
        };

        for result in hot {
            let claimed = match self
                .store
                .claim_urgency_notification(result.donation.id, result.urgency)
                .await
            {
                Ok(claimed) => claimed,
                Err(e) => {
                    tracing::warn!(donation_id = %result.donation.id, error = %e, "urgency notification claim failed");
                    continue;
                }
            };
            if !claimed {
                continue;
            }

            // Address the alert to responders operating near the pickup point
            let pickup = result.donation.pickup_location;
            let targets: Vec<_> = responders
                .iter()
                .filter(|actor| match (actor.location, pickup) {
                    (Some(loc), Some(pickup)) => distance_km(&loc, &pickup)
                        .map(|d| d <= radius_km)
                        .unwrap_or(false),
                    _ => false,
                })
                .map(|actor| actor.id)
                .collect();

            tracing::info!(
                donation_id = %result.donation.id,
                urgency = result.urgency,
                targets = targets.len(),
                "high-urgency match"
            );
            self.notifier
                .notify(NotificationEvent {
                    kind: NotificationKind::HighUrgencyMatch,
                    donation_id: result.donation.id,
                    target_actor_ids: targets,
                })
                .await;
        }
    }
}
