//! Configuration loading and environment variable handling

use crate::domains::utils::parse_duration;
use crate::domains::environments::EnvironmentsConfig;
use crate::domains::SmokeConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::validation::Validatable;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Default prefix of override variables
pub const DEFAULT_PREFIX: &str = "OPTISAM_SMOKE";

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<SmokeConfig> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        self.from_yaml_str(&content)
    }

    /// Load configuration from YAML text with environment overrides
    pub fn from_yaml_str(&self, content: &str) -> ConfigResult<SmokeConfig> {
        let mut config: SmokeConfig = serde_yaml::from_str(content)?;
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration from built-in defaults and environment variables only
    pub fn from_env(&self) -> ConfigResult<SmokeConfig> {
        let mut config = SmokeConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<SmokeConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut SmokeConfig) -> ConfigResult<()> {
        self.apply_environment_overrides(config)?;
        self.apply_auth_overrides(&mut config.auth);
        self.apply_http_overrides(&mut config.http)?;
        self.apply_logging_overrides(&mut config.logging)?;
        self.apply_runner_overrides(&mut config.runner)?;
        Ok(())
    }

    /// `<PREFIX>_ENV` selects the default environment
    fn apply_environment_overrides(&self, config: &mut SmokeConfig) -> ConfigResult<()> {
        if let Ok(env) = self.get_env_var("ENV") {
            if env.trim().is_empty() {
                return Err(ConfigError::EnvError(format!("{}_ENV is empty", self.prefix)));
            }
            config.environments.default_environment = env;
        }
        Ok(())
    }

    /// Apply `<PREFIX>_<SERVICE>_URL` overrides to the environment a run targets
    ///
    /// Called once the environment is chosen, so the overrides land in the
    /// table that is actually used. The environment must already exist.
    pub fn apply_service_overrides(
        &self,
        environments: &mut EnvironmentsConfig,
        environment: &str,
    ) -> ConfigResult<()> {
        environments.get(environment)?;

        for (service, url) in self.service_overrides()? {
            debug!("Overriding {} base URL in '{}'", service, environment);
            environments.set_service_url(environment, &service, url);
        }

        environments.validate()
    }

    /// Collect `<PREFIX>_<SERVICE>_URL` variables as lowercase service names
    fn service_overrides(&self) -> ConfigResult<Vec<(String, String)>> {
        let head = format!("{}_", self.prefix);
        let mut overrides = Vec::new();

        for (name, value) in std::env::vars_os() {
            // Names that are not UTF-8 cannot carry the prefix
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some(service) = name
                .strip_prefix(&head)
                .and_then(|rest| rest.strip_suffix("_URL"))
            else {
                continue;
            };
            if service.is_empty() {
                continue;
            }

            let value = value
                .into_string()
                .map_err(|_| ConfigError::EnvError(format!("{} is not valid UTF-8", name)))?;
            overrides.push((service.to_lowercase(), value));
        }

        overrides.sort();
        Ok(overrides)
    }

    /// Apply credential overrides
    fn apply_auth_overrides(&self, config: &mut crate::domains::auth::AuthConfig) {
        if let Ok(username) = self.get_env_var("AUTH_USERNAME") {
            config.username = username;
        }

        if let Ok(password) = self.get_env_var("AUTH_PASSWORD") {
            config.password = password;
        }

        if let Ok(token) = self.get_env_var("ACCESS_TOKEN") {
            config.access_token = Some(token);
        }
    }

    /// Apply HTTP config overrides
    fn apply_http_overrides(
        &self,
        config: &mut crate::domains::http::HttpConfig,
    ) -> ConfigResult<()> {
        if let Ok(timeout) = self.get_env_var("HTTP_TIMEOUT") {
            // Plain seconds or a humantime value such as "500ms"
            config.timeout = match timeout.parse::<u64>() {
                Ok(seconds) => std::time::Duration::from_secs(seconds),
                Err(_) => parse_duration(&timeout)
                    .map_err(|e| ConfigError::EnvError(format!("Invalid HTTP_TIMEOUT: {}", e)))?,
            };
        }

        if let Ok(verify_ssl) = self.get_env_var("HTTP_VERIFY_SSL") {
            config.verify_ssl = verify_ssl
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid HTTP_VERIFY_SSL: {}", e)))?;
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(
        &self,
        config: &mut crate::domains::logging::LoggingConfig,
    ) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Apply runner overrides
    fn apply_runner_overrides(
        &self,
        config: &mut crate::domains::runner::RunnerConfig,
    ) -> ConfigResult<()> {
        if let Ok(sleep) = self.get_env_var("SLEEP_BETWEEN") {
            config.sleep_between = parse_duration(&sleep)
                .map_err(|e| ConfigError::EnvError(format!("Invalid SLEEP_BETWEEN: {}", e)))?;
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
