//! Domain models for the Food Rescue Platform

mod actor;
mod donation;
mod matching;

pub use actor::*;
pub use donation::*;
pub use matching::*;
