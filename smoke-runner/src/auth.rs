//! Bearer-token setup call

use crate::error::{RunError, RunResult};
use smoke_config::AuthConfig;
use smoke_http::ProbeClient;
use std::fmt;
use tracing::{debug, info};
use url::Url;

/// An access token; never printed in full
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a token, rejecting empty ones
    pub fn new(token: impl Into<String>) -> RunResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(RunError::EmptyToken);
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "BearerToken({}…)", prefix)
    }
}

/// Obtain the bearer token used by every probe of a run
///
/// A configured static token is returned as is. Otherwise the credentials
/// are POSTed as a form to `auth_base + token_path` and the `access_token`
/// field of the JSON reply is used. A non-2xx status is reported before the
/// body is looked at.
pub async fn acquire_token<C>(client: &C, auth_base: &Url, auth: &AuthConfig) -> RunResult<BearerToken>
where
    C: ProbeClient + ?Sized,
{
    if let Some(token) = auth.static_token() {
        info!("Using configured access token");
        return BearerToken::new(token);
    }

    let url = token_url(auth_base, &auth.token_path)?;
    debug!("Requesting token for {} from {}", auth.username, url);

    let response = client
        .post_form(
            &url,
            &[
                ("username", auth.username.as_str()),
                ("password", auth.password.as_str()),
                ("grant_type", auth.grant_type.as_str()),
            ],
        )
        .await?;

    if !(200..300).contains(&response.status) {
        return Err(RunError::TokenRejected {
            url: url.to_string(),
            status: response.status,
        });
    }

    let body = response.json(&url)?;
    let token = body
        .get("access_token")
        .and_then(|value| value.as_str())
        .ok_or(RunError::MissingTokenField)?;

    let token = BearerToken::new(token)?;
    info!("Logged in successfully as {}", auth.username);
    Ok(token)
}

fn token_url(auth_base: &Url, token_path: &str) -> RunResult<Url> {
    let base = auth_base.as_str().trim_end_matches('/');
    Url::parse(&format!("{}{}", base, token_path)).map_err(|e| RunError::Config(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use smoke_http::{FormResponse, HttpError, ProbeRequest, ProbeResponse};
    use std::sync::Mutex;

    struct TokenEndpoint {
        status: u16,
        body: String,
        calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl TokenEndpoint {
        fn new(status: u16, body: impl ToString) -> Self {
            Self {
                status,
                body: body.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ProbeClient for TokenEndpoint {
        async fn send(&self, _request: &ProbeRequest) -> Result<ProbeResponse, HttpError> {
            unreachable!("token tests never send probes")
        }

        async fn post_form(
            &self,
            url: &Url,
            fields: &[(&str, &str)],
        ) -> Result<FormResponse, HttpError> {
            self.calls.lock().unwrap().push((
                url.to_string(),
                fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ));
            Ok(FormResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    fn auth_base() -> Url {
        Url::parse("https://optisam-auth-int.example.com/").unwrap()
    }

    #[tokio::test]
    async fn test_acquire_token_posts_credentials() {
        let endpoint = TokenEndpoint::new(200, json!({"access_token": "eyJ0eXAi", "token_type": "Bearer"}));
        let token = acquire_token(&endpoint, &auth_base(), &AuthConfig::default())
            .await
            .unwrap();

        assert_eq!(token.as_str(), "eyJ0eXAi");

        let calls = endpoint.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://optisam-auth-int.example.com/api/v1/token");
        assert_eq!(
            calls[0].1,
            vec![
                ("username".to_string(), "admin@test.com".to_string()),
                ("password".to_string(), "admin".to_string()),
                ("grant_type".to_string(), "password".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected() {
        let endpoint = TokenEndpoint::new(200, json!({"access_token": ""}));
        let err = acquire_token(&endpoint, &auth_base(), &AuthConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::EmptyToken));
    }

    #[tokio::test]
    async fn test_missing_token_field() {
        let endpoint = TokenEndpoint::new(200, json!({"error": "invalid_grant"}));
        let err = acquire_token(&endpoint, &auth_base(), &AuthConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::MissingTokenField));
    }

    #[tokio::test]
    async fn test_rejected_status() {
        let endpoint = TokenEndpoint::new(401, json!({"access_token": "ignored"}));
        let err = acquire_token(&endpoint, &auth_base(), &AuthConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::TokenRejected { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_rejected_status_with_html_body() {
        let endpoint = TokenEndpoint::new(502, "<html>Bad Gateway</html>");
        let err = acquire_token(&endpoint, &auth_base(), &AuthConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::TokenRejected { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_accepted_status_with_html_body() {
        let endpoint = TokenEndpoint::new(200, "<html>login</html>");
        let err = acquire_token(&endpoint, &auth_base(), &AuthConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::Http(HttpError::InvalidJson { .. })));
    }

    #[tokio::test]
    async fn test_static_token_skips_the_call() {
        let endpoint = TokenEndpoint::new(500, "");
        let auth = AuthConfig {
            access_token: Some("static-token".to_string()),
            ..AuthConfig::default()
        };
        let token = acquire_token(&endpoint, &auth_base(), &auth).await.unwrap();

        assert_eq!(token.as_str(), "static-token");
        assert!(endpoint.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_debug_hides_token() {
        let token = BearerToken::new("eyJhbGciOiJSUzI1NiIs").unwrap();
        assert_eq!(format!("{:?}", token), "BearerToken(eyJhbG…)");
    }
}
