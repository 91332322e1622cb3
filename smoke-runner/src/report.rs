//! Check outcomes recorded during a run

use serde::{Serialize, Serializer};
use smoke_http::HttpMethod;
use std::time::Duration;

/// Result of one status check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The expected status came back
    Passed {
        status: u16,
        #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
        elapsed: Duration,
    },
    /// A different status came back
    Failed {
        status: u16,
        #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
        elapsed: Duration,
    },
    /// No response was received
    Errored { message: String },
}

impl CheckOutcome {
    pub fn from_status(expected: u16, status: u16, elapsed: Duration) -> Self {
        if status == expected {
            CheckOutcome::Passed { status, elapsed }
        } else {
            CheckOutcome::Failed { status, elapsed }
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed { .. })
    }
}

/// One probe and its outcome
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    pub probe: String,
    pub method: HttpMethod,
    pub url: String,
    pub expected_status: u16,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

/// Outcomes of one suite, in probe order
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub suite: String,
    pub service: String,
    pub base_url: String,
    pub results: Vec<ProbeResult>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Outcomes of every suite of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub environment: String,
    pub suites: Vec<SuiteReport>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.suites.iter().map(|s| s.results.len()).sum()
    }

    pub fn passed(&self) -> usize {
        self.suites.iter().map(SuiteReport::passed).sum()
    }

    pub fn failed(&self) -> usize {
        self.suites.iter().map(SuiteReport::failed).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Every non-passing result with its suite name
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ProbeResult)> {
        self.suites.iter().flat_map(|suite| {
            suite
                .results
                .iter()
                .filter(|r| !r.outcome.is_passed())
                .map(move |r| (suite.suite.as_str(), r))
        })
    }
}

fn as_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(probe: &str, outcome: CheckOutcome) -> ProbeResult {
        ProbeResult {
            probe: probe.to_string(),
            method: HttpMethod::Get,
            url: format!("https://h.example.com{}", probe),
            expected_status: 200,
            outcome,
        }
    }

    #[test]
    fn test_outcome_from_status() {
        let elapsed = Duration::from_millis(12);
        assert!(CheckOutcome::from_status(200, 200, elapsed).is_passed());
        assert_eq!(
            CheckOutcome::from_status(200, 404, elapsed),
            CheckOutcome::Failed {
                status: 404,
                elapsed
            }
        );
    }

    #[test]
    fn test_counts_and_failures() {
        let report = RunReport {
            environment: "int".to_string(),
            suites: vec![SuiteReport {
                suite: "equipment".to_string(),
                service: "equipment".to_string(),
                base_url: "https://h.example.com/".to_string(),
                results: vec![
                    result("/a", CheckOutcome::from_status(200, 200, Duration::ZERO)),
                    result("/b", CheckOutcome::from_status(200, 500, Duration::ZERO)),
                    result(
                        "/c",
                        CheckOutcome::Errored {
                            message: "connection refused".to_string(),
                        },
                    ),
                ],
            }],
        };

        assert_eq!(report.total(), 3);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 2);
        assert!(!report.is_success());

        let failing: Vec<_> = report.failures().map(|(_, r)| r.probe.as_str()).collect();
        assert_eq!(failing, vec!["/b", "/c"]);
    }

    #[test]
    fn test_result_serialization() {
        let value = serde_json::to_value(result(
            "/api/v1/equipments/types",
            CheckOutcome::from_status(200, 200, Duration::from_millis(42)),
        ))
        .unwrap();

        assert_eq!(
            value,
            json!({
                "probe": "/api/v1/equipments/types",
                "method": "GET",
                "url": "https://h.example.com/api/v1/equipments/types",
                "expected_status": 200,
                "outcome": "passed",
                "status": 200,
                "elapsed_ms": 42
            })
        );
    }
}
