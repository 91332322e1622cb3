use anyhow::{bail, Context, Result};
use smoke_config::SmokeConfig;
use smoke_http::{HttpConfig, HttpManager};
use smoke_runner::{builtin_suites, find_suite, RunPlan, RunnerSettings, SmokeRunner, Suite};
use std::path::PathBuf;
use tracing::info;

use super::targeted_environments;
use crate::output;

/// Arguments of the `run` command
#[derive(Debug, Default)]
pub struct RunArgs {
    pub env: Option<String>,
    pub suites: Vec<String>,
    pub suite_files: Vec<PathBuf>,
    pub filter: Option<String>,
    pub json: bool,
}

/// Run the selected suites; fails when any check did not pass
pub async fn run_command(config: &SmokeConfig, args: RunArgs) -> Result<()> {
    let suites = collect_suites(&args.suites, &args.suite_files)?;
    let (environment, environments) =
        targeted_environments(&config.environments, args.env.as_deref())?;
    info!(
        "Running {} suite(s) against environment '{}'",
        suites.len(),
        environment
    );

    let client = HttpManager::with_config(HttpConfig::from(&config.http))
        .context("Failed to create HTTP client")?;

    let mut settings = RunnerSettings::from(&config.runner);
    settings.filter = args.filter;

    let runner = SmokeRunner::new(client, settings);
    let plan = RunPlan::new(environment, suites);
    let report = runner
        .run(&environments, &config.auth, &plan)
        .await
        .context("Smoke run aborted")?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        output::print_report(&report);
    }

    if !report.is_success() {
        bail!("{} of {} checks failed", report.failed(), report.total());
    }
    Ok(())
}

/// Named built-in suites followed by suite files; every built-in suite when neither is given
pub(crate) fn collect_suites(names: &[String], files: &[PathBuf]) -> Result<Vec<Suite>> {
    let builtin = builtin_suites().context("Built-in suites are invalid")?;
    if names.is_empty() && files.is_empty() {
        return Ok(builtin);
    }

    let mut suites = Vec::with_capacity(names.len() + files.len());
    for name in names {
        suites.push(find_suite(&builtin, name)?.clone());
    }
    for file in files {
        let suite = Suite::from_file(file)
            .with_context(|| format!("Failed to load suite file {}", file.display()))?;
        suites.push(suite);
    }
    Ok(suites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_all_builtin_suites_by_default() {
        let suites = collect_suites(&[], &[]).unwrap();
        let names: Vec<_> = suites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["equipment", "application"]);
    }

    #[test]
    fn test_named_suites_keep_requested_order() {
        let suites =
            collect_suites(&["application".to_string(), "equipment".to_string()], &[]).unwrap();
        assert_eq!(suites[0].name, "application");
        assert_eq!(suites[1].name, "equipment");
    }

    #[test]
    fn test_suite_file_only() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "name: license\nservice: license\nprobes:\n  - name: products\n    path: /api/v1/license/products"
        )
        .unwrap();

        let suites = collect_suites(&[], &[file.path().to_path_buf()]).unwrap();
        assert_eq!(suites.len(), 1);
        assert_eq!(suites[0].service, "license");
    }

    #[test]
    fn test_unknown_suite_name() {
        let err = collect_suites(&["metric".to_string()], &[]).unwrap_err();
        assert!(err.to_string().contains("metric"));
    }
}
