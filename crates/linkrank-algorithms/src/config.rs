//! Tunable parameters shared by both estimators

use crate::error::{RankError, RankResult};

/// Ranking configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RankConfig {
    /// Probability of following an outgoing link (usually 0.85)
    pub damping_factor: f64,
    /// Number of pages visited by the random surfer
    pub sample_count: usize,
    /// Absolute per-page change below which iteration stops
    pub tolerance: f64,
    /// Iteration passes allowed before giving up
    pub max_passes: usize,
    /// Seed for the sampler; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            sample_count: 10_000,
            tolerance: 0.001,
            max_passes: 5_000,
            seed: None,
        }
    }
}

impl RankConfig {
    /// Config with the given damping factor and defaults elsewhere
    pub fn with_damping(damping_factor: f64) -> Self {
        Self {
            damping_factor,
            ..Self::default()
        }
    }

    /// Check every field
    pub fn validate(&self) -> RankResult<()> {
        self.validate_sampling()?;
        self.validate_iteration()
    }

    /// Fields read by the sampler
    pub fn validate_sampling(&self) -> RankResult<()> {
        validate_damping(self.damping_factor)?;
        if self.sample_count == 0 {
            return Err(RankError::DegenerateSampleCount(self.sample_count));
        }
        Ok(())
    }

    /// Fields read by the fixed-point iteration
    pub fn validate_iteration(&self) -> RankResult<()> {
        validate_damping(self.damping_factor)?;
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(RankError::InvalidInput(format!(
                "tolerance must be finite and > 0, got {}",
                self.tolerance
            )));
        }
        if self.max_passes == 0 {
            return Err(RankError::InvalidInput(
                "max_passes must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_damping(damping_factor: f64) -> RankResult<()> {
    if !damping_factor.is_finite() || !(0.0..=1.0).contains(&damping_factor) {
        return Err(RankError::InvalidInput(format!(
            "damping factor must be in [0,1], got {}",
            damping_factor
        )));
    }
    Ok(())
}
