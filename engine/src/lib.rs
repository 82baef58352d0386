//! Food Rescue Platform - Matching & Lifecycle Engine
//!
//! The stateless core of the platform: a proximity matching engine that ranks
//! nearby surplus-food donations by urgency, and a role-gated lifecycle state
//! machine that tracks each donation from Available through Completed (or
//! Expired). Persistence, notification delivery, and the clock are external
//! collaborators injected through the traits in [`external`].

pub mod config;
pub mod error;
pub mod external;
pub mod services;

pub use config::EngineConfig;
pub use error::{AppError, AppResult};
