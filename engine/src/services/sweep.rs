//! Periodic expiry sweep
//!
//! Walks donations that have not advanced past Accepted and expires the
//! overdue ones through the lifecycle service. A failure on one donation is
//! isolated: it is logged, counted, and the sweep moves on to the rest.

use std::sync::Arc;
use std::time::Duration;

use shared::DonationStatus;

use crate::config::EngineConfig;
use crate::error::AppResult;
use crate::external::{Clock, DonationFilter, Store};
use crate::services::lifecycle::LifecycleService;

/// Summary of one sweep pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Donations fetched for evaluation
    pub examined: usize,
    /// Donations this pass moved to Expired
    pub expired: usize,
    /// Donations whose expiry attempt errored
    pub failed: usize,
}

/// Driver for the time-based Expire path
#[derive(Clone)]
pub struct ExpirySweeper {
    store: Arc<dyn Store>,
    lifecycle: LifecycleService,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl ExpirySweeper {
    pub fn new(
        store: Arc<dyn Store>,
        lifecycle: LifecycleService,
        clock: Arc<dyn Clock>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            store,
            lifecycle,
            clock,
            interval: Duration::from_secs(config.sweep.interval_seconds),
        }
    }

    /// Run one sweep pass over all donations still eligible for expiry.
    ///
    /// Only the initial fetch can fail the pass; per-donation errors are
    /// counted in the report and logged.
    pub async fn run_once(&self) -> AppResult<SweepReport> {
        let candidates = self
            .store
            .fetch_donations(&DonationFilter::with_statuses(&[
                DonationStatus::Available,
                DonationStatus::Accepted,
            ]))
            .await?;

        let now = self.clock.now();
        let mut report = SweepReport {
            examined: candidates.len(),
            ..Default::default()
        };

        for donation in &candidates {
            if now < donation.expires_at() {
                continue;
            }
            match self.lifecycle.expire(donation).await {
                Ok(true) => report.expired += 1,
                // Lost the race to an accept or another sweep; nothing to do
                Ok(false) => {}
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(donation_id = %donation.id, error = %e, "expiry failed for donation");
                }
            }
        }

        tracing::info!(
            examined = report.examined,
            expired = report.expired,
            failed = report.failed,
            "expiry sweep complete"
        );
        Ok(report)
    }

    /// Drive `run_once` forever on the configured interval. Intended to be
    /// spawned as a background task by the embedding process.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = self.run_once().await {
                tracing::error!(error = %e, "expiry sweep pass failed");
            }
        }
    }
}
