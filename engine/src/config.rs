//! Configuration management for the matching and lifecycle engine
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FRP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Engine configuration
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Current environment (development, production)
    pub environment: String,

    /// Urgency scoring tunables
    pub urgency: UrgencyConfig,

    /// Lifecycle state machine tunables
    pub lifecycle: LifecycleConfig,

    /// Expiry sweep tunables
    pub sweep: SweepConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UrgencyConfig {
    /// Score assigned to a freshly created donation (the curve's floor)
    pub floor: u8,

    /// Score at or above which a match fires a high-urgency notification
    pub high_threshold: u8,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LifecycleConfig {
    /// What Cancel does with the donation record
    pub cancel_policy: CancelPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SweepConfig {
    /// Seconds between periodic expiry sweeps
    pub interval_seconds: u64,
}

/// Policy for what happens to a cancelled donation.
///
/// The record can either be routed through the Expired state, keeping it
/// visible in history, or removed from the store outright.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    Expire,
    Remove,
}

impl EngineConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("FRP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("urgency.floor", 10)?
            .set_default("urgency.high_threshold", 80)?
            .set_default("lifecycle.cancel_policy", "expire")?
            .set_default("sweep.interval_seconds", 300)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FRP_ prefix)
            .add_source(
                Environment::with_prefix("FRP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            urgency: UrgencyConfig {
                floor: 10,
                high_threshold: 80,
            },
            lifecycle: LifecycleConfig {
                cancel_policy: CancelPolicy::Expire,
            },
            sweep: SweepConfig {
                interval_seconds: 300,
            },
        }
    }
}
