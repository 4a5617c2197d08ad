mod resolve;
mod schema;
mod toggles;
mod validation;

pub use resolve::{resolve, Operation};
pub use schema::{
    CatalogOverrides, GadgetEntry, GadgetSpec, HeadEntry, ModeSpec, ModuleEntry, Scenario,
    SlotSpec, TargetSpec, UnitSpec, VehicleEntry,
};
pub use toggles::{parse_toggles, set_module_active, ModuleRef};
pub use validation::validate_scenario;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/rock-breaker/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("rock-breaker"))
}

/// Get the default scenario file path (~/.config/rock-breaker/scenario.yaml)
pub fn get_scenario_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("scenario.yaml"))
}

/// Load a scenario from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to the scenario. If None, uses the default path
///   (~/.config/rock-breaker/scenario.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - The scenario file does not exist
/// - The file cannot be read
/// - The YAML cannot be parsed
pub fn load_scenario(path: Option<PathBuf>) -> Result<Scenario> {
    let scenario_path = match path {
        Some(p) => p,
        None => get_scenario_path()?,
    };
    load_scenario_from(&scenario_path)
}

fn load_scenario_from(path: &Path) -> Result<Scenario> {
    if !path.exists() {
        anyhow::bail!(
            "Scenario file not found at {}. Create ~/.config/rock-breaker/scenario.yaml or pass --config",
            path.display()
        );
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file at {}", path.display()))?;

    let scenario: Scenario = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse scenario: invalid YAML in {}", path.display()))?;

    tracing::debug!(path = %path.display(), units = scenario.units.len(), "Loaded scenario");
    Ok(scenario)
}
