//! Runner error types

use smoke_config::ConfigError;
use smoke_http::HttpError;
use std::path::PathBuf;
use thiserror::Error;

/// Runner result type
pub type RunResult<T> = Result<T, RunError>;

/// Errors that stop a run before or during setup
///
/// A probe whose status does not match is not an error; it is recorded as a
/// failed check in the report.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Invalid probe '{probe}': {source}")]
    Template {
        probe: String,
        #[source]
        source: TemplateError,
    },

    #[error("Token request to {url} was rejected with status {status}")]
    TokenRejected { url: String, status: u16 },

    #[error("Token response has no 'access_token' string field")]
    MissingTokenField,

    #[error("Token endpoint returned an empty access token")]
    EmptyToken,

    #[error("Failed to read suite file {path}: {source}")]
    SuiteRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse suite: {0}")]
    SuiteParse(#[from] serde_yaml::Error),

    #[error("Invalid suite '{suite}': {message}")]
    InvalidSuite { suite: String, message: String },

    #[error("Unknown suite '{name}'. Available: {}", available.join(", "))]
    UnknownSuite {
        name: String,
        available: Vec<String>,
    },
}

/// Errors building a probe URL from its template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unclosed '{{' in path template '{template}'")]
    Unclosed { template: String },

    #[error("unmatched '}}' in path template '{template}'")]
    Unmatched { template: String },

    #[error("empty placeholder in path template '{template}'")]
    EmptyPlaceholder { template: String },

    #[error("no value for placeholder '{name}'")]
    MissingParam { name: String },

    #[error("path template '{template}' must start with '/'")]
    Relative { template: String },

    #[error("base URL '{base}' cannot carry a path")]
    InvalidBase { base: String },
}
