//! Sequential probe execution

use crate::auth::{acquire_token, BearerToken};
use crate::error::{RunError, RunResult};
use crate::probe::{Probe, Suite};
use crate::report::{CheckOutcome, ProbeResult, RunReport, SuiteReport};
use crate::template::build_url;
use smoke_config::{AuthConfig, EnvironmentsConfig, RunnerConfig, AUTH_SERVICE};
use smoke_http::{ProbeClient, ProbeRequest};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Per-run behaviour of the runner
#[derive(Debug, Clone)]
pub struct RunnerSettings {
    /// Pause between consecutive probes
    pub sleep_between: Duration,
    /// Status expected from probes that do not set one
    pub default_expected_status: u16,
    /// Only probes whose name contains this run
    pub filter: Option<String>,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        (&RunnerConfig::default()).into()
    }
}

impl From<&RunnerConfig> for RunnerSettings {
    fn from(config: &RunnerConfig) -> Self {
        Self {
            sleep_between: config.sleep_between,
            default_expected_status: config.default_expected_status,
            filter: None,
        }
    }
}

/// What to run and where
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub environment: String,
    pub suites: Vec<Suite>,
}

impl RunPlan {
    pub fn new(environment: impl Into<String>, suites: Vec<Suite>) -> Self {
        Self {
            environment: environment.into(),
            suites,
        }
    }

    /// Services the plan needs base URLs for
    pub fn services(&self, needs_auth: bool) -> Vec<&str> {
        let mut services: Vec<&str> = self.suites.iter().map(|s| s.service.as_str()).collect();
        if needs_auth {
            services.push(AUTH_SERVICE);
        }
        services
    }
}

/// A suite with every probe URL already built
struct PreparedSuite<'a> {
    suite: &'a Suite,
    base: Url,
    probes: Vec<(&'a Probe, Url)>,
}

/// Runs probe suites one probe at a time
pub struct SmokeRunner<C> {
    client: C,
    settings: RunnerSettings,
}

impl<C: ProbeClient> SmokeRunner<C> {
    pub fn new(client: C, settings: RunnerSettings) -> Self {
        Self { client, settings }
    }

    /// Run every suite of `plan`
    ///
    /// The environment table and all probe URLs are checked before the token
    /// call; any problem there aborts the run with no probe sent.
    pub async fn run(
        &self,
        environments: &EnvironmentsConfig,
        auth: &AuthConfig,
        plan: &RunPlan,
    ) -> RunResult<RunReport> {
        let needs_auth = auth.static_token().is_none();
        environments.ensure_services(&plan.environment, plan.services(needs_auth))?;

        let prepared = plan
            .suites
            .iter()
            .map(|suite| {
                let base = environments.resolve(&plan.environment, &suite.service)?;
                self.prepare(suite, base)
            })
            .collect::<RunResult<Vec<_>>>()?;

        let token = self.setup(environments, auth, &plan.environment).await?;

        info!(
            "Running {} suite(s) against '{}'",
            prepared.len(),
            plan.environment
        );

        let mut first = true;
        let mut suites = Vec::with_capacity(prepared.len());
        for suite in prepared {
            suites.push(self.execute(suite, &token, &mut first).await);
        }

        let report = RunReport {
            environment: plan.environment.clone(),
            suites,
        };
        info!(
            "Run finished: {} passed, {} failed",
            report.passed(),
            report.failed()
        );
        Ok(report)
    }

    /// Run one suite against `base` with an existing token
    pub async fn run_suite(
        &self,
        base: &Url,
        suite: &Suite,
        token: &BearerToken,
    ) -> RunResult<SuiteReport> {
        let prepared = self.prepare(suite, base.clone())?;
        let mut first = true;
        Ok(self.execute(prepared, token, &mut first).await)
    }

    async fn setup(
        &self,
        environments: &EnvironmentsConfig,
        auth: &AuthConfig,
        environment: &str,
    ) -> RunResult<BearerToken> {
        match auth.static_token() {
            Some(token) => BearerToken::new(token),
            None => {
                let auth_base = environments.resolve(environment, AUTH_SERVICE)?;
                acquire_token(&self.client, &auth_base, auth).await
            }
        }
    }

    fn prepare<'a>(&self, suite: &'a Suite, base: Url) -> RunResult<PreparedSuite<'a>> {
        let probes = suite
            .selected(self.settings.filter.as_deref())
            .map(|probe| {
                build_url(&base, probe)
                    .map(|url| (probe, url))
                    .map_err(|source| RunError::Template {
                        probe: probe.name.clone(),
                        source,
                    })
            })
            .collect::<RunResult<Vec<_>>>()?;

        if probes.is_empty() {
            warn!("Suite '{}' has no probes matching the filter", suite.name);
        }

        Ok(PreparedSuite {
            suite,
            base,
            probes,
        })
    }

    async fn execute(
        &self,
        prepared: PreparedSuite<'_>,
        token: &BearerToken,
        first: &mut bool,
    ) -> SuiteReport {
        let PreparedSuite {
            suite,
            base,
            probes,
        } = prepared;
        info!("Suite '{}' ({} probes) at {}", suite.name, probes.len(), base);

        let mut results = Vec::with_capacity(probes.len());
        for (probe, url) in probes {
            if !*first && !self.settings.sleep_between.is_zero() {
                tokio::time::sleep(self.settings.sleep_between).await;
            }
            *first = false;

            results.push(self.check(probe, url, token).await);
        }

        SuiteReport {
            suite: suite.name.clone(),
            service: suite.service.clone(),
            base_url: base.to_string(),
            results,
        }
    }

    async fn check(&self, probe: &Probe, url: Url, token: &BearerToken) -> ProbeResult {
        let expected = probe.expected_status_or(self.settings.default_expected_status);
        let request = ProbeRequest {
            method: probe.method,
            body: probe.body.clone(),
            ..ProbeRequest::get(url.clone()).with_bearer(token.as_str())
        };

        let outcome = match self.client.send(&request).await {
            Ok(response) => {
                let outcome = CheckOutcome::from_status(expected, response.status, response.elapsed);
                if outcome.is_passed() {
                    info!(probe = %probe.name, status = response.status, "check passed");
                } else {
                    warn!(
                        probe = %probe.name,
                        expected,
                        status = response.status,
                        "check failed"
                    );
                    debug!("Response body: {:.512}", response.body);
                }
                outcome
            }
            Err(e) => {
                warn!(
                    probe = %probe.name,
                    transport = e.is_transport(),
                    error = %e,
                    "request failed"
                );
                CheckOutcome::Errored {
                    message: e.to_string(),
                }
            }
        };

        ProbeResult {
            probe: probe.name.clone(),
            method: probe.method,
            url: url.to_string(),
            expected_status: expected,
            outcome,
        }
    }
}
