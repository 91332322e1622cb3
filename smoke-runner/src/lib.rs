//! Sequential smoke-test runner for the optisam REST services
//!
//! A run acquires one bearer token, then walks each suite's probes in
//! order: build the URL, send the request, compare the status, record the
//! outcome and pause. Failed checks are recorded and never retried.

pub mod auth;
pub mod error;
pub mod probe;
pub mod report;
pub mod runner;
pub mod template;

pub use auth::{acquire_token, BearerToken};
pub use error::{RunError, RunResult, TemplateError};
pub use probe::{builtin_suites, find_suite, Probe, Suite};
pub use report::{CheckOutcome, ProbeResult, RunReport, SuiteReport};
pub use runner::{RunPlan, RunnerSettings, SmokeRunner};
pub use template::build_url;
