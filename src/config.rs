use crate::report::OutputFormat;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "token-carry";

/// Prefix for environment overrides, e.g. `TOKEN_CARRY_ECONOMICS__DEFAULT_FEE_RATE`
pub const ENV_PREFIX: &str = "TOKEN_CARRY";

/// Shorthand override for the default fee rate
pub const FEE_RATE_ENV: &str = "TOKEN_CARRY_FEE_RATE";

/// Application configuration loaded from token-carry.toml or environment variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub economics: EconomicsConfig,
    pub output: OutputConfig,
}

/// Fee estimation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicsConfig {
    /// Fee rate in sat/vB used when the CLI is not given one
    pub default_fee_rate: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            economics: EconomicsConfig {
                default_fee_rate: 10,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from token-carry.toml (if present) and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name(CONFIG_FILE).required(false))
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        let config = Config::builder()
            .set_default(
                "economics.default_fee_rate",
                defaults.economics.default_fee_rate,
            )?
            .set_default("output.format", defaults.output.format.as_str())?
            .add_source(file)
            // TOKEN_CARRY_ECONOMICS__DEFAULT_FEE_RATE, TOKEN_CARRY_OUTPUT__FORMAT
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(rate) = env::var(FEE_RATE_ENV) {
            app_config.economics.default_fee_rate = rate.trim().parse().map_err(|_| {
                ConfigError::Message(format!(
                    "{} must be a whole number of sat/vB, got {:?}",
                    FEE_RATE_ENV, rate
                ))
            })?;
        }

        Ok(app_config)
    }
}
