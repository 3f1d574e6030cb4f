//! Error types for the ranking engine

use thiserror::Error;

/// Errors raised by the graph model and both estimators
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankError {
    /// Damping factor, tolerance, pass cap, or graph shape rejected
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested page is not a key of the graph
    #[error("Page {0:?} not found in graph")]
    PageNotFound(String),

    /// Sampler asked for fewer than one sample
    #[error("Sample count must be at least 1, got {0}")]
    DegenerateSampleCount(usize),

    /// Iteration hit its pass cap without meeting the tolerance
    #[error("PageRank did not converge after {passes} passes (max delta {max_delta:.6})")]
    NonConvergence { passes: usize, max_delta: f64 },
}

impl RankError {
    /// True for every caller-side input violation (bad parameter, empty graph, unknown page)
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RankError::InvalidInput(_) | RankError::PageNotFound(_))
    }
}

pub type RankResult<T> = Result<T, RankError>;
