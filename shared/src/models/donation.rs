//! Donation and lifecycle status models

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Coordinate;

/// A unit of surplus food offered by a donor, tracked through its lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donation {
    pub id: Uuid,
    /// Owning donor; set at creation and never reassigned
    pub donor_id: Uuid,
    pub category: FoodCategory,
    pub description: String,
    pub quantity_kg: Decimal,
    /// Pickup location; immutable once attached
    pub pickup_location: Option<Coordinate>,
    /// Minutes from `created_at` until the food spoils, set at creation
    pub perishability_minutes: i64,
    pub created_at: DateTime<Utc>,
    pub status: DonationStatus,
    /// NGO or volunteer that accepted the donation, set by the Accept transition
    pub accepted_by: Option<Uuid>,
    pub picked_up_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Donation {
    /// Duration from creation until spoilage
    pub fn perishability_window(&self) -> Duration {
        Duration::minutes(self.perishability_minutes)
    }

    /// When the donation spoils if not advanced past Accepted
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + self.perishability_window()
    }
}

/// Lifecycle status of a donation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    Available,
    Accepted,
    PickedUp,
    Delivered,
    Completed,
    Expired,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Available => "available",
            DonationStatus::Accepted => "accepted",
            DonationStatus::PickedUp => "picked_up",
            DonationStatus::Delivered => "delivered",
            DonationStatus::Completed => "completed",
            DonationStatus::Expired => "expired",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "available" => Some(DonationStatus::Available),
            "accepted" => Some(DonationStatus::Accepted),
            "picked_up" => Some(DonationStatus::PickedUp),
            "delivered" => Some(DonationStatus::Delivered),
            "completed" => Some(DonationStatus::Completed),
            "expired" => Some(DonationStatus::Expired),
            _ => None,
        }
    }

    /// Completed and Expired accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, DonationStatus::Completed | DonationStatus::Expired)
    }
}

impl std::fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of donated food
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Produce,
    Bakery,
    Dairy,
    PreparedMeals,
    CannedGoods,
    Frozen,
    Beverages,
    Other,
}

impl std::fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FoodCategory::Produce => write!(f, "Produce"),
            FoodCategory::Bakery => write!(f, "Bakery"),
            FoodCategory::Dairy => write!(f, "Dairy"),
            FoodCategory::PreparedMeals => write!(f, "Prepared Meals"),
            FoodCategory::CannedGoods => write!(f, "Canned Goods"),
            FoodCategory::Frozen => write!(f, "Frozen"),
            FoodCategory::Beverages => write!(f, "Beverages"),
            FoodCategory::Other => write!(f, "Other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_format_is_snake_case() {
        let json = serde_json::to_string(&DonationStatus::PickedUp).unwrap();
        assert_eq!(json, "\"picked_up\"");
        let back: DonationStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DonationStatus::PickedUp);
    }

    #[test]
    fn status_as_str_round_trips() {
        for status in [
            DonationStatus::Available,
            DonationStatus::Accepted,
            DonationStatus::PickedUp,
            DonationStatus::Delivered,
            DonationStatus::Completed,
            DonationStatus::Expired,
        ] {
            assert_eq!(DonationStatus::from_str(status.as_str()), Some(status));
        }
    }

    #[test]
    fn expires_at_adds_the_window() {
        let created = Utc::now();
        let donation = Donation {
            id: uuid::Uuid::new_v4(),
            donor_id: uuid::Uuid::new_v4(),
            category: FoodCategory::Bakery,
            description: "day-old bread".into(),
            quantity_kg: Decimal::from(3),
            pickup_location: None,
            perishability_minutes: 90,
            created_at: created,
            status: DonationStatus::Available,
            accepted_by: None,
            picked_up_at: None,
            delivered_at: None,
            completed_at: None,
        };
        assert_eq!(donation.expires_at(), created + Duration::minutes(90));
    }
}
