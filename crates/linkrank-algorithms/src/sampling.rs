//! Monte-Carlo PageRank estimator
//!
//! A random surfer walks the transition model for `sample_count` steps; a page's rank is
//! the fraction of steps spent on it.
//!
//! Sample accounting: the uniformly chosen starting page counts as the first sample, and
//! `sample_count - 1` transitions follow. With `sample_count = 1` the starting page gets
//! rank 1.0 and every other page 0.0.
//!
//! Each step draws from the transition model without materializing its dense row: with
//! probability `1 - damping_factor` (or always, on a page without links) the surfer jumps to a
//! uniformly chosen page, otherwise it follows a uniformly chosen link. Working state stays
//! at one visit counter per page.

use crate::common::{LinkGraph, RankMap};
use crate::config::RankConfig;
use crate::error::RankResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Result of a sampling run
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingRun {
    /// Visit frequency per page; sums to 1.0
    pub ranks: RankMap,
    /// Raw visit counts per page; sums to `sample_count`
    pub visits: BTreeMap<String, usize>,
    /// Page the walk started from (tallied as the first sample)
    pub initial_page: String,
    pub sample_count: usize,
}

/// Estimate PageRank by sampling, using `config.seed` when set
pub fn sample_rank(graph: &LinkGraph, config: &RankConfig) -> RankResult<RankMap> {
    Ok(sample_rank_run(graph, config)?.ranks)
}

/// Sampling with visit counts, using `config.seed` when set
pub fn sample_rank_run(graph: &LinkGraph, config: &RankConfig) -> RankResult<SamplingRun> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    sample_rank_with_rng(graph, config, &mut rng)
}

/// Sampling driven by a caller-supplied random source; `config.seed` is ignored.
pub fn sample_rank_with_rng<R: Rng + ?Sized>(
    graph: &LinkGraph,
    config: &RankConfig,
    rng: &mut R,
) -> RankResult<SamplingRun> {
    config.validate_sampling()?;
    let n = graph.require_pages()?;
    let d = config.damping_factor;

    debug!(
        pages = n,
        samples = config.sample_count,
        damping = d,
        "Sampling PageRank"
    );

    let mut visits = vec![0usize; n];

    let start = rng.gen_range(0..n);
    let mut current = start;
    visits[current] += 1;
    trace!(page = graph.page(start), "Initial page");

    for _ in 1..config.sample_count {
        current = next_page(graph, current, d, rng);
        visits[current] += 1;
    }

    let total = config.sample_count as f64;
    let scores: Vec<f64> = visits.iter().map(|&count| count as f64 / total).collect();

    Ok(SamplingRun {
        ranks: graph.to_rank_map(&scores),
        visits: graph
            .pages()
            .map(str::to_string)
            .zip(visits.iter().copied())
            .collect(),
        initial_page: graph.page(start).to_string(),
        sample_count: config.sample_count,
    })
}

/// Draw the surfer's next page from `current`.
///
/// Same law as the transition model's row for `current`, drawn in O(1) extra space.
fn next_page<R: Rng + ?Sized>(
    graph: &LinkGraph,
    current: usize,
    damping_factor: f64,
    rng: &mut R,
) -> usize {
    let links = graph.successors(current);
    if links.is_empty() || !rng.gen_bool(damping_factor) {
        rng.gen_range(0..graph.page_count())
    } else {
        links[rng.gen_range(0..links.len())]
    }
}
