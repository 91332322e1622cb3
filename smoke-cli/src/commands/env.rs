use anyhow::{Context, Result};
use colored::Colorize;
use smoke_config::SmokeConfig;

use super::targeted_environments;

/// Print the base URLs of one environment
pub fn env_show_command(config: &SmokeConfig, env: Option<&str>) -> Result<()> {
    let (name, environments) = targeted_environments(&config.environments, env)?;
    let environment = environments
        .get(&name)
        .with_context(|| format!("Cannot show environment '{}'", name))?;

    println!("{}", name.bold());
    for (service, url) in &environment.services {
        if url.is_empty() {
            println!("  {:<12} {}", service, "(unset)".dimmed());
        } else {
            println!("  {:<12} {}", service, url);
        }
    }
    Ok(())
}

/// Print the environment names, marking the default one
pub fn env_list_command(config: &SmokeConfig) -> Result<()> {
    for name in config.environments.names() {
        if name == config.environments.default_environment {
            println!("{} {}", name.bold(), "(default)".green());
        } else {
            println!("{}", name);
        }
    }
    Ok(())
}
