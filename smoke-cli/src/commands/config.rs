use anyhow::{anyhow, Context, Result};
use smoke_config::{ConfigLoader, SmokeConfig};
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Handle configuration validation
pub fn config_validate_command(config_file: &Path) -> Result<()> {
    info!("Validating configuration file: {}", config_file.display());

    if !config_file.exists() {
        return Err(anyhow!(
            "Configuration file not found: {}",
            config_file.display()
        ));
    }

    match ConfigLoader::new().from_file(config_file) {
        Ok(config) => {
            println!("✅ Configuration file is valid");
            println!(
                "   Environments: {} (default: {})",
                config.environments.names().join(", "),
                config.environments.default_environment
            );
            info!("Configuration validation passed");
            Ok(())
        }
        Err(e) => {
            println!("❌ Configuration validation failed: {}", e);
            error!("Configuration validation failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handle sample configuration generation
pub fn config_generate_command(output: &Path, force: bool) -> Result<()> {
    info!("Generating configuration at: {}", output.display());

    if output.exists() && !force {
        return Err(anyhow!(
            "Output file already exists: {}. Use --force to overwrite.",
            output.display()
        ));
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("Failed to create output directory")?;
        }
    }

    fs::write(output, SmokeConfig::generate_sample())
        .context("Failed to write configuration file")?;

    println!("✅ Configuration generated at: {}", output.display());
    println!(
        "🔧 Validate with: optisam-smoke config validate --config-file {}",
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_then_validate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("smoke.yaml");

        config_generate_command(&path, false).unwrap();
        config_validate_command(&path).unwrap();
    }

    #[test]
    fn test_generate_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smoke.yaml");
        fs::write(&path, "keep me").unwrap();

        assert!(config_generate_command(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

        config_generate_command(&path, true).unwrap();
        assert_ne!(fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_validate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(config_validate_command(&dir.path().join("absent.yaml")).is_err());
    }
}
