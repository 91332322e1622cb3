//! Probe runner settings

use crate::error::ConfigResult;
use crate::validation::{validate_status_code, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings applied to every suite run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Pause between consecutive probes; none before the first or after the last
    #[serde(with = "humantime_serde")]
    pub sleep_between: Duration,

    /// Status expected from probes that do not set one
    pub default_expected_status: u16,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            sleep_between: Duration::from_millis(100),
            default_expected_status: 200,
        }
    }
}

impl Validatable for RunnerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_status_code(
            self.default_expected_status,
            "default_expected_status",
            self.domain_name(),
        )?;

        if self.sleep_between > Duration::from_secs(60) {
            return Err(self.validation_error(format!(
                "sleep_between must be at most 60s, got {:?}",
                self.sleep_between
            )));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "runner"
    }
}
