//! Probe and suite definitions

use crate::error::{RunError, RunResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use smoke_http::HttpMethod;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

const BUILTIN_SUITES: &[(&str, &str)] = &[
    ("equipment.yaml", include_str!("../suites/equipment.yaml")),
    ("application.yaml", include_str!("../suites/application.yaml")),
];

/// A literal HTTP request and the status it must return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Probe {
    /// Group name, usually the path template
    pub name: String,

    #[serde(default)]
    pub method: HttpMethod,

    /// Path template with `{placeholder}` segments
    pub path: String,

    /// Placeholder values
    #[serde(
        default,
        deserialize_with = "scalar_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub params: BTreeMap<String, String>,

    /// Query-string parameters in declaration order, sent even when empty
    #[serde(
        default,
        deserialize_with = "scalar_pairs",
        serialize_with = "pairs_as_map",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub query: Vec<(String, String)>,

    /// Falls back to the runner default (200) when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_status: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
}

impl Probe {
    /// A GET probe with no parameters
    pub fn get(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: path.clone(),
            method: HttpMethod::Get,
            path,
            params: BTreeMap::new(),
            query: Vec::new(),
            expected_status: None,
            body: None,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Append a query parameter, or replace the value of an existing one in place
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let (name, value) = (name.into(), value.into());
        match self.query.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.query.push((name, value)),
        }
        self
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn expecting(mut self, status: u16) -> Self {
        self.expected_status = Some(status);
        self
    }

    pub fn expected_status_or(&self, default: u16) -> u16 {
        self.expected_status.unwrap_or(default)
    }
}

/// An ordered, named list of probes against one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    pub name: String,

    /// Environment-table service supplying the base URL
    pub service: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub probes: Vec<Probe>,
}

impl Suite {
    /// Parse and validate a suite from YAML
    pub fn from_yaml_str(content: &str) -> RunResult<Self> {
        let suite: Suite = serde_yaml::from_str(content)?;
        suite.validate()?;
        Ok(suite)
    }

    /// Read a suite file
    pub fn from_file(path: impl AsRef<Path>) -> RunResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RunError::SuiteRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Structural checks; URL templates are checked when the run is planned
    pub fn validate(&self) -> RunResult<()> {
        if self.name.trim().is_empty() {
            return Err(self.invalid("suite name cannot be empty"));
        }
        if self.service.trim().is_empty() {
            return Err(self.invalid("service cannot be empty"));
        }
        if self.probes.is_empty() {
            return Err(self.invalid("a suite needs at least one probe"));
        }

        let mut seen = HashSet::new();
        for probe in &self.probes {
            if probe.name.trim().is_empty() {
                return Err(self.invalid("probe name cannot be empty"));
            }
            if !seen.insert(probe.name.as_str()) {
                return Err(self.invalid(format!("duplicate probe '{}'", probe.name)));
            }
            if let Some(status) = probe.expected_status {
                if !(100..=599).contains(&status) {
                    return Err(self.invalid(format!(
                        "probe '{}' expects invalid status {}",
                        probe.name, status
                    )));
                }
            }
            if probe.body.is_some() && !probe.method.allows_body() {
                return Err(self.invalid(format!(
                    "probe '{}' has a body but uses {}",
                    probe.name, probe.method
                )));
            }
        }

        Ok(())
    }

    /// Probes whose name contains `filter`, in suite order
    ///
    /// The probes borrow from the suite only; the filter may be shorter-lived.
    pub fn selected<'a, 'f>(
        &'a self,
        filter: Option<&'f str>,
    ) -> impl Iterator<Item = &'a Probe> + use<'a, 'f> {
        self.probes
            .iter()
            .filter(move |probe| filter.map_or(true, |f| probe.name.contains(f)))
    }

    fn invalid(&self, message: impl Into<String>) -> RunError {
        RunError::InvalidSuite {
            suite: self.name.clone(),
            message: message.into(),
        }
    }
}

/// Suites shipped with the binary
pub fn builtin_suites() -> RunResult<Vec<Suite>> {
    BUILTIN_SUITES
        .iter()
        .map(|(_, content)| Suite::from_yaml_str(content))
        .collect()
}

/// Find a suite by name
pub fn find_suite<'a>(suites: &'a [Suite], name: &str) -> RunResult<&'a Suite> {
    suites
        .iter()
        .find(|suite| suite.name == name)
        .ok_or_else(|| RunError::UnknownSuite {
            name: name.to_string(),
            available: suites.iter().map(|suite| suite.name.clone()).collect(),
        })
}

/// Accept `page_num: 1` as well as `page_num: "1"`
fn scalar_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_pairs(deserializer)?.into_iter().collect())
}

/// Scalar mapping entries as strings, in document order
fn scalar_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_yaml::Mapping::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            let key = scalar_text(key)
                .ok_or_else(|| serde::de::Error::custom("parameter names must be scalars"))?;
            let text = scalar_text(value).ok_or_else(|| {
                serde::de::Error::custom(format!("parameter '{}' must be a scalar", key))
            })?;
            Ok((key, text))
        })
        .collect()
}

fn scalar_text(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some(String::new()),
        _ => None,
    }
}

fn pairs_as_map<S>(pairs: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(pairs.iter().map(|(name, value)| (name, value)))
}
