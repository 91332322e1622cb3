//! HTTP client implementation

use crate::config::HttpConfig;
use crate::errors::HttpError;
use crate::types::HttpMethod;
use reqwest::{header, Client};
use serde_json::Value as JsonValue;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// A single probe request
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub method: HttpMethod,
    pub url: Url,
    /// Sent as `Authorization: Bearer <token>` when present
    pub bearer_token: Option<String>,
    /// JSON body, only sent for methods that allow one
    pub body: Option<JsonValue>,
}

impl ProbeRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            bearer_token: None,
            body: None,
        }
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

/// Response of a probe request
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: u16,
    pub elapsed: Duration,
    pub body: String,
}

/// Response of a form POST; the body is kept as text until the status is checked
#[derive(Debug, Clone)]
pub struct FormResponse {
    pub status: u16,
    pub body: String,
}

impl FormResponse {
    /// Parse the body as JSON
    pub fn json(&self, url: &Url) -> Result<JsonValue, HttpError> {
        serde_json::from_str(&self.body).map_err(|source| HttpError::InvalidJson {
            url: url.to_string(),
            source,
        })
    }
}

/// HTTP client seam used by the runner
#[async_trait::async_trait]
pub trait ProbeClient: Send + Sync {
    /// Send one probe request and return its status
    async fn send(&self, request: &ProbeRequest) -> Result<ProbeResponse, HttpError>;

    /// POST url-encoded form fields and return the reply
    async fn post_form(
        &self,
        url: &Url,
        fields: &[(&str, &str)],
    ) -> Result<FormResponse, HttpError>;
}

/// reqwest-backed [`ProbeClient`]; one connection pool for the whole run
#[derive(Debug, Clone)]
pub struct HttpManager {
    client: Client,
}

impl HttpManager {
    /// Create a new HttpManager with default configuration
    pub fn new() -> Result<Self, HttpError> {
        Self::with_config(HttpConfig::default())
    }

    /// Create a new HttpManager with specific configuration
    pub fn with_config(config: HttpConfig) -> Result<Self, HttpError> {
        debug!(
            "Creating HttpManager with timeout: {:?}, verify_ssl: {}",
            config.timeout,
            config.verify_ssl
        );
        if !config.verify_ssl {
            warn!("TLS certificate verification is disabled");
        }

        let client = Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .redirect(reqwest::redirect::Policy::limited(
                config.max_redirects as usize,
            ))
            .build()
            .map_err(|e| HttpError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl ProbeClient for HttpManager {
    async fn send(&self, request: &ProbeRequest) -> Result<ProbeResponse, HttpError> {
        info!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method.into(), request.url.clone())
            .header(header::ACCEPT, "application/json");

        if let Some(token) = &request.bearer_token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| HttpError::InvalidHeader {
                    name: "Authorization",
                })?;
            builder = builder.header(header::AUTHORIZATION, value);
        }

        if let Some(body) = &request.body {
            if request.method.allows_body() {
                builder = builder.json(body);
            } else {
                warn!("Ignoring body on {} request to {}", request.method, request.url);
            }
        }

        let started = Instant::now();
        let response = builder.send().await?;
        let status = response.status().as_u16();
        // The status is in; a broken body must not hide it
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read response body from {}: {}", request.url, e);
                String::new()
            }
        };
        let elapsed = started.elapsed();

        debug!(
            "HTTP response received: {} in {}ms ({} bytes)",
            status,
            elapsed.as_millis(),
            body.len()
        );

        Ok(ProbeResponse {
            status,
            elapsed,
            body,
        })
    }

    async fn post_form(
        &self,
        url: &Url,
        fields: &[(&str, &str)],
    ) -> Result<FormResponse, HttpError> {
        info!("POST {} (form)", url);

        let response = self
            .client
            .post(url.clone())
            .header(header::ACCEPT, "application/json")
            .form(fields)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("Form response received: {} ({} bytes)", status, body.len());

        Ok(FormResponse { status, body })
    }
}
