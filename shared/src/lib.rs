//! Shared types and models for the Food Rescue Platform
//!
//! This crate contains the domain model and the pure domain functions
//! (great-circle distance, urgency-independent validation helpers) shared
//! between the matching engine and other components of the system.

pub mod geo;
pub mod models;
pub mod types;
pub mod validation;

pub use geo::*;
pub use models::*;
pub use types::*;
pub use validation::*;
