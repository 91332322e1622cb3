//! Configuration validation traits and utilities

use crate::error::{ConfigError, ConfigResult};

/// Trait for validatable configuration
pub trait Validatable {
    /// Validate the configuration
    fn validate(&self) -> ConfigResult<()>;

    /// Get the domain name for error reporting
    fn domain_name(&self) -> &'static str;

    /// Helper to create a domain-specific validation error
    fn validation_error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::DomainError {
            domain: self.domain_name().to_string(),
            message: message.into(),
        }
    }
}

/// Validate a required string field
pub fn validate_required_string(value: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}

/// Validate a base URL: non-empty, absolute and http(s)
pub fn validate_base_url(url: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    if url.trim().is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be empty", field_name),
        });
    }

    let parsed = url::Url::parse(url).map_err(|e| ConfigError::DomainError {
        domain: domain.to_string(),
        message: format!("{} has invalid URL format: {}", field_name, e),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ConfigError::DomainError {
                domain: domain.to_string(),
                message: format!("{} scheme '{}' not allowed (only http/https)", field_name, scheme),
            })
        }
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} must have a valid host", field_name),
        });
    }

    Ok(())
}

/// Validate an HTTP status code
pub fn validate_status_code(status: u16, field_name: &str, domain: &str) -> ConfigResult<()> {
    if !(100..=599).contains(&status) {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} must be between 100 and 599, got {}", field_name, status),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://optisam-auth-dev.example.com", "auth", "t").is_ok());
        assert!(validate_base_url("http://localhost:7090", "application", "t").is_ok());
        assert!(validate_base_url("", "auth", "t").is_err());
        assert!(validate_base_url("not-a-url", "auth", "t").is_err());
        assert!(validate_base_url("ftp://files.example.com", "auth", "t").is_err());
    }

    #[test]
    fn test_validate_status_code() {
        assert!(validate_status_code(200, "status", "t").is_ok());
        assert!(validate_status_code(99, "status", "t").is_err());
        assert!(validate_status_code(600, "status", "t").is_err());
    }

    #[test]
    fn test_validate_required_string_rejects_whitespace() {
        assert!(validate_required_string("   ", "username", "auth").is_err());
        assert!(validate_required_string("admin@test.com", "username", "auth").is_ok());
    }
}
