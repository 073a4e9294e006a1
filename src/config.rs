//! Service configuration
//!
//! Sources are layered with the `config` crate, later sources winning:
//!
//! 1. Compiled defaults ([`AppConfig::default`])
//! 2. Optional TOML file (`xbar.toml` in the working directory, or an explicit path)
//! 3. Environment variables prefixed `XBAR`, nested with `__`
//!    (e.g. `XBAR__SERVER__PORT=9000`, `XBAR__CHART__CLAMP_LCL_AT_ZERO=true`)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::factors::FactorSource;
use crate::generator::GeneratorConfig;
use crate::params::ParameterLimits;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "xbar.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "XBAR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadFailed(#[from] config::ConfigError),

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub generator: GeneratorConfig,
    pub chart: ChartConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub max_concurrent_requests: usize,
    /// CORS origins; empty allows none
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
            max_concurrent_requests: 64,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub factor: FactorSource,
    /// Floor the reported LCL at zero; the engine result stays signed
    pub clamp_lcl_at_zero: bool,
    pub max_num_samples: usize,
    pub max_measurements_per_sample: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let limits = ParameterLimits::default();
        Self {
            factor: FactorSource::default(),
            clamp_lcl_at_zero: false,
            max_num_samples: limits.max_num_samples,
            max_measurements_per_sample: limits.max_measurements_per_sample,
        }
    }
}

impl ChartConfig {
    pub fn limits(&self) -> ParameterLimits {
        ParameterLimits {
            max_num_samples: self.max_num_samples,
            max_measurements_per_sample: self.max_measurements_per_sample,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,tower_http=debug".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load defaults, the config file, then `XBAR__*` environment overrides
    ///
    /// An explicit `file` must exist; without one, `xbar.toml` is read if present.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_environment(file, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_environment(
        file: Option<&Path>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let config: AppConfig = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.max_concurrent_requests == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.max_concurrent_requests",
                reason: "must be greater than 0".to_string(),
            });
        }

        if !self.generator.mean.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "generator.mean",
                reason: format!("must be finite, got {}", self.generator.mean),
            });
        }
        if !self.generator.std_dev.is_finite() || self.generator.std_dev < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "generator.std_dev",
                reason: format!("must be finite and non-negative, got {}", self.generator.std_dev),
            });
        }

        if let FactorSource::Fixed { value } = self.chart.factor {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: "chart.factor.value",
                    reason: format!("must be finite and non-negative, got {value}"),
                });
            }
        }

        if self.chart.max_num_samples == 0 {
            return Err(ConfigError::InvalidValue {
                key: "chart.max_num_samples",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.chart.max_measurements_per_sample == 0 {
            return Err(ConfigError::InvalidValue {
                key: "chart.max_measurements_per_sample",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
