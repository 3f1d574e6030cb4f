//! linkrank
//!
//! Ranks the pages of a static HTML corpus by their link structure.
//!
//! The ranking engine lives in `linkrank-algorithms`; this crate adds the collaborators
//! around it:
//! - [`corpus`]: crawl a directory of `.html` pages into a link graph
//! - [`config`]: load [`RankConfig`] from YAML and apply overrides
//! - [`report`]: label, render and compare the two estimators' results
//!
//! ## Example Usage
//!
//! ```rust
//! use linkrank::{rank_graph, LinkGraph, RankConfig};
//!
//! let graph = LinkGraph::from_links(vec![("a.html", vec!["b.html"]), ("b.html", vec!["a.html"])]);
//! let config = RankConfig { seed: Some(7), ..RankConfig::default() };
//!
//! let comparison = rank_graph(&graph, &config).unwrap();
//! assert!((comparison.iteration.ranks["a.html"] - 0.5).abs() < 1e-9);
//! println!("{}", comparison);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod corpus;
pub mod error;
pub mod report;

pub use config::{load_config, parse_config, ConfigOverrides};
pub use corpus::{crawl, extract_links, load_graph};
pub use error::{
    ConfigError, ConfigResult, CorpusError, CorpusResult, LinkRankError, LinkRankResult,
};
pub use report::{max_divergence, Comparison, RankReport, DEFAULT_PRECISION};

// Re-export the ranking engine
pub use linkrank_algorithms::{
    distribution, iterate_rank, iterate_rank_run, sample_rank, sample_rank_run,
    sample_rank_with_rng, update_pass, Distribution, IterationRun, LinkGraph, LinkMap,
    RankConfig, RankError, RankMap, RankResult, SamplingRun,
};

use std::path::Path;
use tracing::info;

/// Run both estimators over `graph`, sampling first
pub fn rank_graph(graph: &LinkGraph, config: &RankConfig) -> RankResult<Comparison> {
    let sampled = sample_rank_run(graph, config)?;
    let iterated = iterate_rank_run(graph, config)?;

    let comparison = Comparison::new(
        RankReport::sampling(sampled.ranks, sampled.sample_count),
        RankReport::iteration(iterated.ranks),
        iterated.passes,
    );
    info!(
        pages = graph.page_count(),
        passes = comparison.passes,
        max_divergence = comparison.max_divergence,
        "Ranked graph"
    );
    Ok(comparison)
}

/// Crawl `dir` and run both estimators over it
pub fn rank_corpus<P: AsRef<Path>>(dir: P, config: &RankConfig) -> LinkRankResult<Comparison> {
    let graph = load_graph(dir)?;
    Ok(rank_graph(&graph, config)?)
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
