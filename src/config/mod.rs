//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Values come from an optional `box-office.{toml,yaml,json}`
//! file in the working directory, overridden by environment variables with the
//! `BOX_OFFICE` prefix; nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use box_office::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Data directory: {}", config.storage.data_dir.display());
//! ```

mod error;
mod logging;
mod loyalty;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use loyalty::{LoyaltyConfig, TierConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Base name of the optional configuration file.
const CONFIG_FILE: &str = "box-office";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Flat-file storage location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Point accrual and discount tiers
    #[serde(default)]
    pub loyalty: LoyaltyConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `box-office.toml` (or `.yaml`/`.json`) if present
    /// 3. Reads environment variables with `BOX_OFFICE` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `BOX_OFFICE__STORAGE__DATA_DIR=/var/lib/box-office` -> `storage.data_dir`
    /// - `BOX_OFFICE__LOYALTY__POINTS_PER_TICKET=2` -> `loyalty.points_per_ticket`
    /// - `BOX_OFFICE__LOGGING__JSON=true` -> `logging.json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or a value cannot be
    /// parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::default()
                    .prefix("BOX_OFFICE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the data directory is empty, loyalty tiers
    /// are out of range or not monotonic, or the log level does not parse.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.loyalty.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
