//! Configuration error types

use thiserror::Error;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error reading configuration file
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvError(String),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Domain-specific configuration error
    #[error("Domain configuration error in {domain}: {message}")]
    DomainError { domain: String, message: String },

    /// The selected environment is not in the table
    #[error("Unknown environment '{name}'. Available: {}", available.join(", "))]
    UnknownEnvironment {
        name: String,
        available: Vec<String>,
    },

    /// The environment has no base URL for a service
    #[error("Environment '{environment}' has no base URL for service '{service}'")]
    UnknownService { environment: String, service: String },

    /// Several services referenced by a run are missing from an environment
    #[error("Environment '{environment}' is missing base URLs for: {}", services.join(", "))]
    MissingServices {
        environment: String,
        services: Vec<String>,
    },
}
