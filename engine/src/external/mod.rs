//! External collaborator interfaces
//!
//! The engine holds no durable state of its own. Persistence, notification
//! delivery, and the clock are injected through these traits.

pub mod clock;
pub mod notifier;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use notifier::{NotificationEvent, NotificationKind, NotificationTrigger};
pub use store::{
    ActorFilter, CommitOutcome, DonationFilter, Store, TimestampField, TransitionWrite,
};
