use std::fs;
use std::path::Path;

use anyhow::Context;
use medterm_config::Config;
use serde::{Deserialize, Serialize};

/// Represents a named configuration profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Load config from a profile file if given, otherwise from the environment.
/// Environment variables override values in the file.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::new());
    };

    tracing::info!("Loading config from {}", path.display());
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let mut config = parse_profile(&data)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    config.apply_env();

    Ok(config)
}

/// Accepts either a `{ "name", "value" }` profile or a bare config object.
/// A top-level `value` key selects the profile shape.
pub(crate) fn parse_profile(data: &str) -> anyhow::Result<Config> {
    let json: serde_json::Value = serde_json::from_str(data)?;

    if json.get("value").is_some() {
        let profile: Profile = serde_json::from_value(json).context("Invalid profile")?;
        tracing::debug!("Using profile '{}'", profile.name);
        return Ok(profile.value);
    }

    Ok(serde_json::from_value(json)?)
}

/// Write a default profile, without any credential, for the user to edit
pub fn write_default_profile(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    let profile = Profile {
        name: "main".into(),
        value: Config::default(),
    };
    fs::write(path, serde_json::to_string_pretty(&profile)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created profile at {}", path.display());

    Ok(())
}
