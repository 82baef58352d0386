//! Business logic services for the Food Rescue Platform engine

pub mod lifecycle;
pub mod matching;
pub mod sweep;
pub mod urgency;

pub use lifecycle::{LifecycleService, TransitionEvent};
pub use matching::MatchEngine;
pub use sweep::{ExpirySweeper, SweepReport};
pub use urgency::UrgencyScorer;
