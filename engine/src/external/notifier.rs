//! Notification collaborator interface
//!
//! Delivery, retry, and channel (email, push, in-app) are the collaborator's
//! concern; the engine only raises events.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of event being notified
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    DonationAccepted,
    DonationCompleted,
    DonationCancelled,
    DonationExpired,
    HighUrgencyMatch,
}

/// A notification raised by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub donation_id: Uuid,
    /// Actors the event is addressed to; empty means the collaborator
    /// resolves recipients from its own subscription data
    pub target_actor_ids: Vec<Uuid>,
}

/// Notification collaborator; fire-and-forget
#[async_trait]
pub trait NotificationTrigger: Send + Sync {
    async fn notify(&self, event: NotificationEvent);
}
