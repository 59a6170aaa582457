use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Configuration bundled into the binary: the two-shelf chip aisle
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../configs/chip_aisle.yaml");

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    // Open the configuration file
    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    // Parse the YAML content
    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    log_counts(&config);

    // Validate the configuration
    config.validate()?;

    Ok(config)
}

/// Parse the configuration embedded in the binary
pub fn load_default_config() -> Result<Config> {
    info!("Using the built-in chip aisle configuration");

    let config: Config =
        serde_yaml::from_str(DEFAULT_CONFIG_YAML).wrap_err("Failed to parse built-in configuration")?;

    log_counts(&config);
    config.validate()?;

    Ok(config)
}

fn log_counts(config: &Config) {
    info!(
        "Configuration declares {} shelf template(s) and {} product group template(s)",
        config.shelves.len(),
        config.products.len()
    );
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output: Option<String>,
    pub shuffle_members: Option<bool>,
    pub seed: Option<u64>,
    pub pretty: Option<bool>,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(output) = &overrides.output {
        info!("Output path overridden: {}", output);
        config.general.output = Some(output.clone());
    }

    if let Some(shuffle) = overrides.shuffle_members {
        info!("Member shuffling overridden: {}", shuffle);
        config.general.shuffle_members = Some(shuffle);
    }

    if let Some(seed) = overrides.seed {
        info!("Shuffle seed overridden: {}", seed);
        config.general.seed = Some(seed);
    }

    if let Some(pretty) = overrides.pretty {
        config.general.pretty = Some(pretty);
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}

/// Write the built-in configuration to disk as a starting point
pub fn export_default_config(output_path: &Path) -> Result<()> {
    info!("Exporting built-in configuration to {:?}", output_path);

    std::fs::write(output_path, DEFAULT_CONFIG_YAML)
        .wrap_err_with(|| format!("Failed to write configuration '{}'", output_path.display()))?;

    Ok(())
}
