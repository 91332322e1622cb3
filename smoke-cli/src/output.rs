//! Human-readable run report

use colored::Colorize;
use smoke_runner::{CheckOutcome, ProbeResult, RunReport};

pub fn print_report(report: &RunReport) {
    println!("Environment: {}", report.environment.bold());

    for suite in &report.suites {
        println!();
        println!(
            "{} {}",
            suite.suite.bold(),
            format!("({})", suite.base_url).dimmed()
        );
        for result in &suite.results {
            println!("  {}", format_result(result));
        }
    }

    println!();
    let summary = format!(
        "{} checks, {} passed, {} failed",
        report.total(),
        report.passed(),
        report.failed()
    );
    if report.is_success() {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.red().bold());
    }
}

fn format_result(result: &ProbeResult) -> String {
    match &result.outcome {
        CheckOutcome::Passed { status, elapsed } => format!(
            "{} {} {} {}",
            "✓".green(),
            result.method,
            result.probe,
            format!("{} in {}ms", status, elapsed.as_millis()).dimmed()
        ),
        CheckOutcome::Failed { status, elapsed } => format!(
            "{} {} {} expected {}, got {} in {}ms",
            "✗".red(),
            result.method,
            result.probe,
            result.expected_status,
            status.to_string().red(),
            elapsed.as_millis()
        ),
        CheckOutcome::Errored { message } => format!(
            "{} {} {} {}",
            "!".yellow(),
            result.method,
            result.probe,
            message.yellow()
        ),
    }
}
