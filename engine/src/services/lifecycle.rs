//! Donation lifecycle state machine
//!
//! Validates and applies status transitions, enforcing the transition table,
//! role gates, and time-based expiry. Commits go through the store's
//! compare-and-swap so two actors can never both win a transition that should
//! be mutually exclusive; the loser sees `ConflictingTransition`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{Actor, Donation, DonationStatus, Role};
use uuid::Uuid;

use crate::config::{CancelPolicy, EngineConfig};
use crate::error::{AppError, AppResult};
use crate::external::{
    Clock, CommitOutcome, NotificationEvent, NotificationKind, NotificationTrigger, Store,
    TimestampField, TransitionWrite,
};

/// An actor-requested transition. Time-based expiry is not an event an actor
/// can request; it goes through [`LifecycleService::expire`] only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransitionEvent {
    Accept,
    PickUp,
    Deliver,
    Complete,
    Cancel,
}

impl std::fmt::Display for TransitionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransitionEvent::Accept => "accept",
            TransitionEvent::PickUp => "pick_up",
            TransitionEvent::Deliver => "deliver",
            TransitionEvent::Complete => "complete",
            TransitionEvent::Cancel => "cancel",
        };
        f.write_str(s)
    }
}

/// Who may request a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    /// Any NGO or volunteer
    AcceptorRoles,
    /// The actor that accepted the donation, or an admin
    AcceptingActorOrAdmin,
    /// The owning donor, the accepting NGO confirming receipt, or an admin
    ReceiptConfirmers,
    /// The owning donor (only reachable while Available), or an admin
    OwnerDonorOrAdmin,
    /// Admin only
    AdminOnly,
}

/// One edge of the transition table
struct TransitionRule {
    from: DonationStatus,
    event: TransitionEvent,
    to: DonationStatus,
    gate: Gate,
    /// Timestamp column stamped by this edge, if any
    timestamp_field: Option<TimestampField>,
}

/// The full role-gated transition table. Lookup is by (from, event); an edge
/// missing here is an `InvalidTransition`. Cancel from Accepted onward is an
/// admin intervention; the donor can only cancel while still Available.
///
/// Time-based expiry only ever fires from Available or Accepted (see
/// [`LifecycleService::expire`]). The Cancel edges from PickedUp and
/// Delivered also land on Expired: an admin abort reuses the same dead-end
/// terminal rather than introducing a separate cancelled marker, so those
/// two edges are the only way Expired is reached from a later state.
const TRANSITIONS: &[TransitionRule] = &[
    TransitionRule {
        from: DonationStatus::Available,
        event: TransitionEvent::Accept,
        to: DonationStatus::Accepted,
        gate: Gate::AcceptorRoles,
        timestamp_field: None,
    },
    TransitionRule {
        from: DonationStatus::Accepted,
        event: TransitionEvent::PickUp,
        to: DonationStatus::PickedUp,
        gate: Gate::AcceptingActorOrAdmin,
        timestamp_field: Some(TimestampField::PickedUpAt),
    },
    TransitionRule {
        from: DonationStatus::PickedUp,
        event: TransitionEvent::Deliver,
        to: DonationStatus::Delivered,
        gate: Gate::AcceptingActorOrAdmin,
        timestamp_field: Some(TimestampField::DeliveredAt),
    },
    TransitionRule {
        from: DonationStatus::Delivered,
        event: TransitionEvent::Complete,
        to: DonationStatus::Completed,
        gate: Gate::ReceiptConfirmers,
        timestamp_field: Some(TimestampField::CompletedAt),
    },
    TransitionRule {
        from: DonationStatus::Available,
        event: TransitionEvent::Cancel,
        to: DonationStatus::Expired,
        gate: Gate::OwnerDonorOrAdmin,
        timestamp_field: None,
    },
    TransitionRule {
        from: DonationStatus::Accepted,
        event: TransitionEvent::Cancel,
        to: DonationStatus::Expired,
        gate: Gate::AdminOnly,
        timestamp_field: None,
    },
    TransitionRule {
        from: DonationStatus::PickedUp,
        event: TransitionEvent::Cancel,
        to: DonationStatus::Expired,
        gate: Gate::AdminOnly,
        timestamp_field: None,
    },
    TransitionRule {
        from: DonationStatus::Delivered,
        event: TransitionEvent::Cancel,
        to: DonationStatus::Expired,
        gate: Gate::AdminOnly,
        timestamp_field: None,
    },
];

fn rule_for(from: DonationStatus, event: TransitionEvent) -> Option<&'static TransitionRule> {
    TRANSITIONS
        .iter()
        .find(|r| r.from == from && r.event == event)
}

/// Stateless lifecycle transition service
#[derive(Clone)]
pub struct LifecycleService {
    store: Arc<dyn Store>,
    notifier: Arc<dyn NotificationTrigger>,
    clock: Arc<dyn Clock>,
    cancel_policy: CancelPolicy,
}

impl LifecycleService {
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
            cancel_policy: config.lifecycle.cancel_policy,
        }
    }

    /// Apply an actor-requested transition to a donation.
    ///
    /// Validation order: already-expired check (so an expired donation always
    /// answers `AlreadyExpired` rather than the generic edge error), then the
    /// transition table (`InvalidTransition`), then the role gate
    /// (`Forbidden`). The commit is a compare-and-swap on the status read
    /// here; a lost race surfaces `ConflictingTransition` with no partial
    /// state change, and notifications fire only after a successful commit.
    ///
    /// Returns the donation as committed. Under the `remove` cancel policy
    /// the record is deleted and the pre-removal snapshot is returned.
    pub async fn apply(
        &self,
        donation_id: Uuid,
        event: TransitionEvent,
        actor: &Actor,
    ) -> AppResult<Donation> {
        let mut donation = self
            .store
            .fetch_donation(donation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Donation".to_string()))?;

        if donation.status == DonationStatus::Expired {
            return Err(AppError::AlreadyExpired);
        }

        let rule = rule_for(donation.status, event).ok_or(AppError::InvalidTransition {
            from: donation.status,
            event,
        })?;

        self.authorize(rule.gate, actor, &donation)?;
        self.check_prior_timestamps(rule, &donation)?;

        if event == TransitionEvent::Cancel && self.cancel_policy == CancelPolicy::Remove {
            match self
                .store
                .remove_donation(donation.id, donation.status)
                .await?
            {
                CommitOutcome::Applied => {}
                CommitOutcome::Conflict => return Err(AppError::ConflictingTransition),
            }
            tracing::info!(donation_id = %donation.id, actor_id = %actor.id, "donation cancelled and removed");
            self.notify_parties(&donation, NotificationKind::DonationCancelled)
                .await;
            return Ok(donation);
        }

        let now = self.clock.now();
        let write = TransitionWrite {
            new_status: rule.to,
            accepted_by: (event == TransitionEvent::Accept).then_some(actor.id),
            timestamp_field: rule.timestamp_field,
            timestamp: now,
        };

        match self
            .store
            .commit_transition(donation.id, donation.status, write)
            .await?
        {
            CommitOutcome::Applied => {}
            CommitOutcome::Conflict => return Err(AppError::ConflictingTransition),
        }

        tracing::info!(
            donation_id = %donation.id,
            actor_id = %actor.id,
            from = %donation.status,
            to = %rule.to,
            event = %event,
            "transition applied"
        );

        // Mirror the committed write onto the local snapshot
        donation.status = rule.to;
        if event == TransitionEvent::Accept {
            donation.accepted_by = Some(actor.id);
        }
        match rule.timestamp_field {
            Some(TimestampField::PickedUpAt) => donation.picked_up_at = Some(now),
            Some(TimestampField::DeliveredAt) => donation.delivered_at = Some(now),
            Some(TimestampField::CompletedAt) => donation.completed_at = Some(now),
            None => {}
        }

        match event {
            TransitionEvent::Accept => {
                self.notifier
                    .notify(NotificationEvent {
                        kind: NotificationKind::DonationAccepted,
                        donation_id: donation.id,
                        target_actor_ids: vec![donation.donor_id],
                    })
                    .await;
            }
            TransitionEvent::Complete => {
                self.notify_parties(&donation, NotificationKind::DonationCompleted)
                    .await;
            }
            TransitionEvent::Cancel => {
                self.notify_parties(&donation, NotificationKind::DonationCancelled)
                    .await;
            }
            _ => {}
        }

        Ok(donation)
    }

    /// Move an overdue donation to Expired. System-only path, driven by the
    /// expiry sweep; never reachable from an actor request.
    ///
    /// Returns `true` if this call expired the donation. A donation that is
    /// not yet overdue, has advanced past Accepted, or loses the commit race
    /// (someone accepted or expired it concurrently) returns `false`.
    pub async fn expire(&self, donation: &Donation) -> AppResult<bool> {
        if !matches!(
            donation.status,
            DonationStatus::Available | DonationStatus::Accepted
        ) {
            return Ok(false);
        }
        if self.clock.now() < donation.expires_at() {
            return Ok(false);
        }

        let write = TransitionWrite {
            new_status: DonationStatus::Expired,
            accepted_by: None,
            timestamp_field: None,
            timestamp: self.clock.now(),
        };
        match self
            .store
            .commit_transition(donation.id, donation.status, write)
            .await?
        {
            CommitOutcome::Applied => {}
            CommitOutcome::Conflict => return Ok(false),
        }

        tracing::info!(donation_id = %donation.id, from = %donation.status, "donation expired");
        self.notify_parties(donation, NotificationKind::DonationExpired)
            .await;
        Ok(true)
    }

    fn authorize(&self, gate: Gate, actor: &Actor, donation: &Donation) -> AppResult<()> {
        let allowed = match gate {
            Gate::AcceptorRoles => actor.role.can_accept(),
            Gate::AcceptingActorOrAdmin => {
                actor.role == Role::Admin || donation.accepted_by == Some(actor.id)
            }
            Gate::ReceiptConfirmers => {
                actor.role == Role::Admin
                    || (actor.role == Role::Donor && donation.donor_id == actor.id)
                    || (actor.role == Role::Ngo && donation.accepted_by == Some(actor.id))
            }
            Gate::OwnerDonorOrAdmin => {
                actor.role == Role::Admin
                    || (actor.role == Role::Donor && donation.donor_id == actor.id)
            }
            Gate::AdminOnly => actor.role == Role::Admin,
        };
        if allowed {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "{} {} may not perform this transition",
                actor.role, actor.id
            )))
        }
    }

    /// Lifecycle timestamps must be monotone: a later stamp is never written
    /// while an earlier required one is absent. A violation here means the
    /// stored record is inconsistent with its own status.
    fn check_prior_timestamps(&self, rule: &TransitionRule, donation: &Donation) -> AppResult<()> {
        let consistent = match rule.timestamp_field {
            Some(TimestampField::DeliveredAt) => donation.picked_up_at.is_some(),
            Some(TimestampField::CompletedAt) => {
                donation.picked_up_at.is_some() && donation.delivered_at.is_some()
            }
            _ => true,
        };
        if consistent {
            Ok(())
        } else {
            Err(AppError::Storage(format!(
                "donation {} is missing a lifecycle timestamp required before {}",
                donation.id, rule.event
            )))
        }
    }

    /// Notify everyone attached to the donation: the donor and, if accepted,
    /// the acceptor.
    async fn notify_parties(&self, donation: &Donation, kind: NotificationKind) {
        let mut targets = vec![donation.donor_id];
        if let Some(acceptor) = donation.accepted_by {
            targets.push(acceptor);
        }
        self.notifier
            .notify(NotificationEvent {
                kind,
                donation_id: donation.id,
                target_actor_ids: targets,
            })
            .await;
    }
}
