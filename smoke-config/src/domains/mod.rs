//! Domain-specific configuration modules

pub mod auth;
pub mod environments;
pub mod http;
pub mod logging;
pub mod runner;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Complete smoke-test configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SmokeConfig {
    /// Environment name to service base URLs
    pub environments: environments::EnvironmentsConfig,

    /// Token acquisition
    pub auth: auth::AuthConfig,

    /// HTTP client configuration
    pub http: http::HttpConfig,

    /// Logging configuration
    pub logging: logging::LoggingConfig,

    /// Probe runner settings
    pub runner: runner::RunnerConfig,
}

impl SmokeConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.environments.validate()?;
        self.auth.validate()?;
        self.http.validate()?;
        self.logging.validate()?;
        self.runner.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = SmokeConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
