//! Data store collaborator interface
//!
//! The system-of-record owns all donation and actor state. The engine reads
//! snapshots through the fetch methods and writes status changes through
//! [`Store::commit_transition`], a compare-and-swap keyed on the expected
//! current status. How the store indexes or replicates the data is not the
//! engine's concern.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{Actor, Donation, DonationStatus, Role};
use uuid::Uuid;

use crate::error::AppResult;

/// Filter for fetching donations
#[derive(Debug, Clone, Default)]
pub struct DonationFilter {
    /// Match any of these statuses; empty means all
    pub statuses: Vec<DonationStatus>,
    pub donor_id: Option<Uuid>,
}

impl DonationFilter {
    pub fn with_statuses(statuses: &[DonationStatus]) -> Self {
        Self {
            statuses: statuses.to_vec(),
            donor_id: None,
        }
    }
}

/// Filter for fetching actors
#[derive(Debug, Clone, Default)]
pub struct ActorFilter {
    /// Match any of these roles; empty means all
    pub roles: Vec<Role>,
}

/// Outcome of a compare-and-swap commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Status matched the expected value and the write was applied
    Applied,
    /// Another writer changed the status first; nothing was written
    Conflict,
}

/// Lifecycle timestamp columns the store can set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampField {
    PickedUpAt,
    DeliveredAt,
    CompletedAt,
}

/// Fields written together with a status change.
///
/// The store must apply the whole write atomically: new status, `accepted_by`
/// and the timestamp land as one unit or not at all.
#[derive(Debug, Clone)]
pub struct TransitionWrite {
    pub new_status: DonationStatus,
    /// Set on Accept; `None` leaves the column untouched
    pub accepted_by: Option<Uuid>,
    /// Which timestamp column to stamp, if any
    pub timestamp_field: Option<TimestampField>,
    /// Value for the stamped column
    pub timestamp: DateTime<Utc>,
}

/// Persistence collaborator
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch a read-time snapshot of donations matching the filter
    async fn fetch_donations(&self, filter: &DonationFilter) -> AppResult<Vec<Donation>>;

    /// Fetch a single donation by id
    async fn fetch_donation(&self, donation_id: Uuid) -> AppResult<Option<Donation>>;

    /// Fetch actors matching the filter
    async fn fetch_actors(&self, filter: &ActorFilter) -> AppResult<Vec<Actor>>;

    /// Commit a status transition if the donation's status still equals
    /// `expected_from`
    async fn commit_transition(
        &self,
        donation_id: Uuid,
        expected_from: DonationStatus,
        write: TransitionWrite,
    ) -> AppResult<CommitOutcome>;

    /// Remove a donation record outright (Cancel under the `remove` policy)
    /// if its status still equals `expected_from`. Same compare-and-swap
    /// contract as [`Store::commit_transition`]: a record whose status moved
    /// since the snapshot was read must survive untouched.
    async fn remove_donation(
        &self,
        donation_id: Uuid,
        expected_from: DonationStatus,
    ) -> AppResult<CommitOutcome>;

    /// Claim the right to send a high-urgency notification for this donation.
    ///
    /// Returns `true` exactly once per donation per threshold crossing; later
    /// claims at the same tier return `false`. This is what keeps repeated
    /// radius queries from re-alerting on the same donation.
    async fn claim_urgency_notification(&self, donation_id: Uuid, score: u8) -> AppResult<bool>;
}
