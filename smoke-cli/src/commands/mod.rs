//! CLI command implementations

pub mod config;
pub mod env;
pub mod list;
pub mod run;

pub use config::*;
pub use env::*;
pub use list::*;
pub use run::*;

use anyhow::{Context, Result};
use smoke_config::{ConfigLoader, EnvironmentsConfig};

/// Pick the environment a command targets and apply its `OPTISAM_SMOKE_<SERVICE>_URL` overrides
pub(crate) fn targeted_environments(
    environments: &EnvironmentsConfig,
    requested: Option<&str>,
) -> Result<(String, EnvironmentsConfig)> {
    let name = environments.select(requested).to_string();
    let mut environments = environments.clone();
    ConfigLoader::new()
        .apply_service_overrides(&mut environments, &name)
        .with_context(|| format!("Cannot use environment '{}'", name))?;
    Ok((name, environments))
}
