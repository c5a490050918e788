//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Loyalty points per ticket must be at least 1")]
    InvalidPointsPerTicket,

    #[error("Loyalty tier at {min_points} points has discount {discount}%, must be below 100")]
    InvalidTierDiscount { min_points: u32, discount: u8 },

    #[error("Loyalty tiers are not monotonic: {0}")]
    NonMonotonicTiers(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
