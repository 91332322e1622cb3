//! Domain-driven configuration for the optisam smoke tests
//!
//! Settings are split by functional domain (environments, auth, http,
//! logging, runner), loaded from YAML with `OPTISAM_SMOKE_*` overrides and
//! validated per domain.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    auth::AuthConfig,
    environments::{EnvironmentConfig, EnvironmentsConfig, AUTH_SERVICE},
    http::HttpConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    runner::RunnerConfig,
    SmokeConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
