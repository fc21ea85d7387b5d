use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Grid construction settings.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    /// Seed for the edge-weight and palette draws. Omit for an OS-seeded run.
    pub seed: Option<u64>,
    #[serde(default)]
    pub initial_probability: f64,
}

// Threshold sweep settings.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SweepConfig {
    /// Number of evenly spaced threshold steps between 0 and 1, inclusive.
    #[serde(default = "default_sweep_steps")]
    pub steps: u32,
}

fn default_sweep_steps() -> u32 {
    100
}

// Output settings for recorded snapshots.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub base_filename: String,
    /// Snapshot format: "json" or "csv".
    pub format: Option<String>,
    #[serde(default = "default_save_snapshots")]
    pub save_snapshots: bool,
}

fn default_save_snapshots() -> bool {
    true
}

// Main configuration structure, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PercolationConfig {
    pub grid: GridConfig,
    pub sweep: SweepConfig,
    pub output: OutputConfig,
}

impl PercolationConfig {
    /// Loads the configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        let config: PercolationConfig = toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML from '{}': {}", path_ref.display(), e))?;

        // --- Validation ---
        if config.grid.width == 0 || config.grid.height == 0 {
            anyhow::bail!("grid width and height must both be at least 1.");
        }
        if !(0.0..=1.0).contains(&config.grid.initial_probability) {
            anyhow::bail!("initial_probability must be within [0, 1].");
        }
        if config.sweep.steps == 0 {
            anyhow::bail!("sweep steps must be greater than 0.");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
        [grid]
        width = 800
        height = 600
        seed = 12

        [sweep]
        steps = 50

        [output]
        base_filename = "percolation"
        format = "csv"
    "#;

    #[test]
    fn parses_and_applies_defaults() {
        let config: PercolationConfig = toml::from_str(VALID).unwrap();
        assert_eq!(config.grid.width, 800);
        assert_eq!(config.grid.seed, Some(12));
        assert_eq!(config.grid.initial_probability, 0.0);
        assert!(config.output.save_snapshots);
    }

    fn load_from_str(name: &str, text: &str) -> Result<PercolationConfig> {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, text).unwrap();
        PercolationConfig::load(&path)
    }

    #[test]
    fn load_rejects_invalid_values() {
        assert!(load_from_str("percolation_valid.toml", VALID).is_ok());

        let zero_width = VALID.replace("width = 800", "width = 0");
        assert!(load_from_str("percolation_zero_width.toml", &zero_width).is_err());

        let bad_p = VALID.replace("seed = 12", "initial_probability = 1.5");
        assert!(load_from_str("percolation_bad_p.toml", &bad_p).is_err());

        let zero_steps = VALID.replace("steps = 50", "steps = 0");
        assert!(load_from_str("percolation_zero_steps.toml", &zero_steps).is_err());
    }
}
