//! Credentials for the bearer-token setup call

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Password-grant credentials and token endpoint settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Login sent as the `username` form field
    pub username: String,

    /// Sent as the `password` form field
    pub password: String,

    /// OAuth grant type form field
    pub grant_type: String,

    /// Path of the token endpoint below the auth service base URL
    pub token_path: String,

    /// Pre-issued bearer token; when set no token call is made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl AuthConfig {
    /// A non-empty static token, if one is configured
    pub fn static_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin@test.com".to_string(),
            password: "admin".to_string(),
            grant_type: "password".to_string(),
            token_path: "/api/v1/token".to_string(),
            access_token: None,
        }
    }
}

// Keep secrets out of logs
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("grant_type", &self.grant_type)
            .field("token_path", &self.token_path)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Validatable for AuthConfig {
    fn validate(&self) -> ConfigResult<()> {
        // A static token makes the credentials unused
        if self.static_token().is_some() {
            return Ok(());
        }

        validate_required_string(&self.username, "username", self.domain_name())?;
        validate_required_string(&self.password, "password", self.domain_name())?;
        validate_required_string(&self.grant_type, "grant_type", self.domain_name())?;

        if !self.token_path.starts_with('/') {
            return Err(self.validation_error(format!(
                "token_path must start with '/', got '{}'",
                self.token_path
            )));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "auth"
    }
}
