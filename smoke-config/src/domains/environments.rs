//! Environment table: deployment environment name to per-service base URLs

use crate::error::{ConfigError, ConfigResult};
use crate::validation::{validate_base_url, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use url::Url;

/// Service name of the token endpoint
pub const AUTH_SERVICE: &str = "auth";

/// Environment used when nothing else selects one
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// All known environments and the one selected by default
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentsConfig {
    /// Environment used when the caller does not name one
    pub default_environment: String,

    /// Environment name to service table
    pub table: BTreeMap<String, EnvironmentConfig>,
}

/// Base URLs of one deployment environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Service name to base URL
    pub services: BTreeMap<String, String>,
}

impl EnvironmentConfig {
    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            services: pairs
                .iter()
                .map(|(service, url)| (service.to_string(), url.to_string()))
                .collect(),
        }
    }

    /// Base URL of a service, if configured and non-empty
    pub fn base_url(&self, service: &str) -> Option<&str> {
        self.services
            .get(service)
            .map(String::as_str)
            .filter(|url| !url.trim().is_empty())
    }
}

impl EnvironmentsConfig {
    /// Names of all configured environments, sorted
    pub fn names(&self) -> Vec<String> {
        self.table.keys().cloned().collect()
    }

    /// Pick the requested environment or fall back to the default one
    pub fn select<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.default_environment)
    }

    /// Look up an environment by name
    pub fn get(&self, name: &str) -> ConfigResult<&EnvironmentConfig> {
        self.table
            .get(name)
            .ok_or_else(|| ConfigError::UnknownEnvironment {
                name: name.to_string(),
                available: self.names(),
            })
    }

    /// Resolve the base URL of `service` in `environment`
    pub fn resolve(&self, environment: &str, service: &str) -> ConfigResult<Url> {
        let env = self.get(environment)?;
        let base = env
            .base_url(service)
            .ok_or_else(|| ConfigError::UnknownService {
                environment: environment.to_string(),
                service: service.to_string(),
            })?;
        Ok(Url::parse(base)?)
    }

    /// Check that `environment` has a base URL for every listed service
    ///
    /// All missing services are reported at once, sorted and deduplicated.
    pub fn ensure_services<'a, I>(&self, environment: &str, services: I) -> ConfigResult<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let env = self.get(environment)?;
        let missing: BTreeSet<String> = services
            .into_iter()
            .filter(|service| env.base_url(service).is_none())
            .map(str::to_string)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingServices {
                environment: environment.to_string(),
                services: missing.into_iter().collect(),
            })
        }
    }

    /// Override one service URL in an environment, creating the entry if needed
    pub fn set_service_url(&mut self, environment: &str, service: &str, url: impl Into<String>) {
        self.table
            .entry(environment.to_string())
            .or_default()
            .services
            .insert(service.to_string(), url.into());
    }
}

impl Default for EnvironmentsConfig {
    fn default() -> Self {
        let mut table = BTreeMap::new();

        table.insert(
            "local".to_string(),
            EnvironmentConfig::from_pairs(&[
                (AUTH_SERVICE, "https://optisam-auth-int.apps.fr01.paas.tech.orange"),
                ("application", "http://localhost:7090"),
                ("product", "http://localhost:12091"),
                ("dps", "http://localhost:10001"),
                ("simulation", "http://localhost:22091"),
                ("import", "http://localhost:9092"),
            ]),
        );
        table.insert("dev".to_string(), hosted_environment("dev"));
        table.insert("int".to_string(), hosted_environment("int"));
        // Performance runs target the int deployment with the load-test services only
        table.insert(
            "performance".to_string(),
            EnvironmentConfig::from_pairs(&[
                (AUTH_SERVICE, "https://optisam-auth-int.apps.fr01.paas.tech.orange"),
                ("application", "https://optisam-application-int.apps.fr01.paas.tech.orange"),
                ("equipment", "https://optisam-equipment-int.apps.fr01.paas.tech.orange"),
            ]),
        );

        Self {
            default_environment: DEFAULT_ENVIRONMENT.to_string(),
            table,
        }
    }
}

const HOSTED_SERVICES: &[&str] = &[
    AUTH_SERVICE,
    "account",
    "application",
    "product",
    "dps",
    "import",
    "equipment",
    "license",
    "report",
    "metric",
    "simulation",
];

fn hosted_environment(stage: &str) -> EnvironmentConfig {
    EnvironmentConfig {
        services: HOSTED_SERVICES
            .iter()
            .map(|service| {
                (
                    service.to_string(),
                    format!("https://optisam-{}-{}.apps.fr01.paas.tech.orange", service, stage),
                )
            })
            .collect(),
    }
}

impl Validatable for EnvironmentsConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(
            &self.default_environment,
            "default_environment",
            self.domain_name(),
        )?;

        if self.table.is_empty() {
            return Err(self.validation_error("At least one environment must be configured"));
        }

        if !self.table.contains_key(&self.default_environment) {
            return Err(self.validation_error(format!(
                "default_environment '{}' is not in the table",
                self.default_environment
            )));
        }

        for (name, env) in &self.table {
            if env.services.is_empty() {
                return Err(self.validation_error(format!("environment '{}' has no services", name)));
            }
            for (service, url) in &env.services {
                validate_base_url(url, &format!("{}.{}", name, service), self.domain_name())?;
            }
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "environments"
    }
}
