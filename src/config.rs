//! Ranking configuration loading
//!
//! A YAML file supplies any subset of [`RankConfig`] fields; command-line overrides are
//! applied on top and the result is validated once.
//!
//! ```yaml
//! damping_factor: 0.85
//! sample_count: 10000
//! tolerance: 0.001
//! max_passes: 5000
//! seed: 42
//! ```

use crate::error::ConfigResult;
use linkrank_algorithms::RankConfig;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load and validate a config file
pub fn load_config<P: AsRef<Path>>(path: P) -> ConfigResult<RankConfig> {
    let path = path.as_ref();
    debug!("Loading rank config from {:?}", path);
    let text = fs::read_to_string(path)?;
    parse_config(&text)
}

/// Parse and validate YAML config text; missing fields take their defaults
pub fn parse_config(text: &str) -> ConfigResult<RankConfig> {
    let config: RankConfig = if text.trim().is_empty() {
        RankConfig::default()
    } else {
        serde_yaml::from_str(text)?
    };
    config.validate()?;
    Ok(config)
}

/// Per-field overrides, typically from command-line flags
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    pub damping_factor: Option<f64>,
    pub sample_count: Option<usize>,
    pub tolerance: Option<f64>,
    pub max_passes: Option<usize>,
    pub seed: Option<u64>,
}

impl ConfigOverrides {
    /// Apply the set overrides to `base` and validate the result
    pub fn apply(&self, base: RankConfig) -> ConfigResult<RankConfig> {
        let config = RankConfig {
            damping_factor: self.damping_factor.unwrap_or(base.damping_factor),
            sample_count: self.sample_count.unwrap_or(base.sample_count),
            tolerance: self.tolerance.unwrap_or(base.tolerance),
            max_passes: self.max_passes.unwrap_or(base.max_passes),
            seed: self.seed.or(base.seed),
        };
        config.validate()?;
        Ok(config)
    }
}
