use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use super::run::collect_suites;

/// Print every built-in suite plus the given suite files
pub fn list_command(suite_files: &[PathBuf]) -> Result<()> {
    let mut suites = collect_suites(&[], &[])?;
    if !suite_files.is_empty() {
        suites.extend(collect_suites(&[], suite_files)?);
    }

    for suite in &suites {
        println!(
            "{} {}",
            suite.name.bold(),
            format!("(service: {}, {} probes)", suite.service, suite.probes.len()).dimmed()
        );
        if let Some(description) = &suite.description {
            println!("  {}", description);
        }
        for probe in &suite.probes {
            println!("  {:<6} {}", probe.method.as_str(), probe.name);
        }
        println!();
    }
    Ok(())
}
