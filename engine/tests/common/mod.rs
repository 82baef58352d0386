//! Shared test fixtures: in-memory collaborators and donation builders
#![allow(dead_code)] // each test binary uses a different slice of this module

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use food_rescue_engine::config::EngineConfig;
use food_rescue_engine::error::AppResult;
use food_rescue_engine::external::{
    ActorFilter, Clock, CommitOutcome, DonationFilter, NotificationEvent, NotificationTrigger,
    Store, TimestampField, TransitionWrite,
};
use shared::{Actor, Coordinate, Donation, DonationStatus, FoodCategory, Role};

/// In-memory store with compare-and-swap commit semantics
#[derive(Default)]
pub struct MockStore {
    pub donations: Mutex<HashMap<Uuid, Donation>>,
    pub actors: Mutex<Vec<Actor>>,
    pub claimed: Mutex<HashSet<Uuid>>,
    pub removed: Mutex<Vec<Uuid>>,
}

impl MockStore {
    pub fn with_donations(donations: Vec<Donation>) -> Arc<Self> {
        let store = Self::default();
        {
            let mut map = store.donations.lock().unwrap();
            for d in donations {
                map.insert(d.id, d);
            }
        }
        Arc::new(store)
    }

    pub fn insert(&self, donation: Donation) {
        self.donations.lock().unwrap().insert(donation.id, donation);
    }

    pub fn add_actor(&self, actor: Actor) {
        self.actors.lock().unwrap().push(actor);
    }

    pub fn get(&self, id: Uuid) -> Option<Donation> {
        self.donations.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl Store for MockStore {
    async fn fetch_donations(&self, filter: &DonationFilter) -> AppResult<Vec<Donation>> {
        let donations = self.donations.lock().unwrap();
        Ok(donations
            .values()
            .filter(|d| filter.statuses.is_empty() || filter.statuses.contains(&d.status))
            .filter(|d| filter.donor_id.map_or(true, |id| d.donor_id == id))
            .cloned()
            .collect())
    }

    async fn fetch_donation(&self, donation_id: Uuid) -> AppResult<Option<Donation>> {
        Ok(self.donations.lock().unwrap().get(&donation_id).cloned())
    }

    async fn fetch_actors(&self, filter: &ActorFilter) -> AppResult<Vec<Actor>> {
        let actors = self.actors.lock().unwrap();
        Ok(actors
            .iter()
            .filter(|a| filter.roles.is_empty() || filter.roles.contains(&a.role))
            .cloned()
            .collect())
    }

    async fn commit_transition(
        &self,
        donation_id: Uuid,
        expected_from: DonationStatus,
        write: TransitionWrite,
    ) -> AppResult<CommitOutcome> {
        let mut donations = self.donations.lock().unwrap();
        let Some(donation) = donations.get_mut(&donation_id) else {
            return Ok(CommitOutcome::Conflict);
        };
        if donation.status != expected_from {
            return Ok(CommitOutcome::Conflict);
        }
        donation.status = write.new_status;
        if let Some(acceptor) = write.accepted_by {
            donation.accepted_by = Some(acceptor);
        }
        match write.timestamp_field {
            Some(TimestampField::PickedUpAt) => donation.picked_up_at = Some(write.timestamp),
            Some(TimestampField::DeliveredAt) => donation.delivered_at = Some(write.timestamp),
            Some(TimestampField::CompletedAt) => donation.completed_at = Some(write.timestamp),
            None => {}
        }
        Ok(CommitOutcome::Applied)
    }

    async fn remove_donation(
        &self,
        donation_id: Uuid,
        expected_from: DonationStatus,
    ) -> AppResult<CommitOutcome> {
        let mut donations = self.donations.lock().unwrap();
        match donations.get(&donation_id) {
            Some(d) if d.status == expected_from => {
                donations.remove(&donation_id);
                self.removed.lock().unwrap().push(donation_id);
                Ok(CommitOutcome::Applied)
            }
            _ => Ok(CommitOutcome::Conflict),
        }
    }

    async fn claim_urgency_notification(&self, donation_id: Uuid, _score: u8) -> AppResult<bool> {
        Ok(self.claimed.lock().unwrap().insert(donation_id))
    }
}

/// Notifier that records every event it is handed
#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<NotificationEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationTrigger for RecordingNotifier {
    async fn notify(&self, event: NotificationEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Clock pinned to a settable instant
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Donation builder with sensible defaults for tests
pub struct DonationBuilder {
    donation: Donation,
}

impl DonationBuilder {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            donation: Donation {
                id: Uuid::new_v4(),
                donor_id: Uuid::new_v4(),
                category: FoodCategory::Produce,
                description: "surplus produce".into(),
                quantity_kg: Decimal::from(10),
                pickup_location: Some(Coordinate::new(0.0, 0.0)),
                perishability_minutes: 240,
                created_at,
                status: DonationStatus::Available,
                accepted_by: None,
                picked_up_at: None,
                delivered_at: None,
                completed_at: None,
            },
        }
    }

    pub fn donor(mut self, donor_id: Uuid) -> Self {
        self.donation.donor_id = donor_id;
        self
    }

    pub fn status(mut self, status: DonationStatus) -> Self {
        self.donation.status = status;
        self
    }

    pub fn accepted_by(mut self, actor_id: Uuid) -> Self {
        self.donation.accepted_by = Some(actor_id);
        self
    }

    pub fn location(mut self, latitude: f64, longitude: f64) -> Self {
        self.donation.pickup_location = Some(Coordinate::new(latitude, longitude));
        self
    }

    pub fn no_location(mut self) -> Self {
        self.donation.pickup_location = None;
        self
    }

    pub fn perishability_minutes(mut self, minutes: i64) -> Self {
        self.donation.perishability_minutes = minutes;
        self
    }

    pub fn picked_up_at(mut self, at: DateTime<Utc>) -> Self {
        self.donation.picked_up_at = Some(at);
        self
    }

    pub fn delivered_at(mut self, at: DateTime<Utc>) -> Self {
        self.donation.delivered_at = Some(at);
        self
    }

    pub fn build(self) -> Donation {
        self.donation
    }
}

pub fn actor(role: Role) -> Actor {
    Actor {
        id: Uuid::new_v4(),
        name: format!("test {}", role),
        role,
        location: None,
    }
}

pub fn actor_at(role: Role, latitude: f64, longitude: f64) -> Actor {
    Actor {
        location: Some(Coordinate::new(latitude, longitude)),
        ..actor(role)
    }
}

pub fn test_config() -> EngineConfig {
    EngineConfig::default()
}
