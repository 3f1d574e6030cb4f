//! Fixed-point PageRank iteration
//!
//! Starts every page at `1/N` and substitutes the PageRank equation until no page moves by
//! more than `config.tolerance` in a single pass. Pages without links spread their rank over
//! every page, matching the transition model.
//!
//! The tolerance is absolute, so very small damping factors or very large graphs (where
//! `1/N` approaches the tolerance) may stop earlier than a relative test would.

use crate::common::{LinkGraph, RankMap};
use crate::config::{validate_damping, RankConfig};
use crate::error::{RankError, RankResult};
use tracing::{debug, trace, warn};

/// Result of an iteration run
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRun {
    /// Converged ranks; sums to 1.0
    pub ranks: RankMap,
    /// Number of update passes performed
    pub passes: usize,
    /// Largest per-page change in the final pass
    pub max_delta: f64,
}

/// Calculate PageRank by iterating to convergence
pub fn iterate_rank(graph: &LinkGraph, config: &RankConfig) -> RankResult<RankMap> {
    Ok(iterate_rank_run(graph, config)?.ranks)
}

/// PageRank with convergence reporting.
///
/// Fails with `NonConvergence` once `config.max_passes` passes have run without every page
/// settling within the tolerance.
pub fn iterate_rank_run(graph: &LinkGraph, config: &RankConfig) -> RankResult<IterationRun> {
    config.validate_iteration()?;
    let n = graph.require_pages()?;
    let d = config.damping_factor;

    debug!(
        pages = n,
        damping = d,
        tolerance = config.tolerance,
        "Iterating PageRank"
    );

    let mut scores = vec![1.0 / n as f64; n];
    let mut max_delta = f64::INFINITY;

    for pass in 1..=config.max_passes {
        let next_scores = rank_pass(graph, &scores, d);
        max_delta = scores
            .iter()
            .zip(next_scores.iter())
            .map(|(old, new)| (new - old).abs())
            .fold(0.0, f64::max);

        if max_delta <= config.tolerance {
            debug!(passes = pass, max_delta, "PageRank converged");
            return Ok(IterationRun {
                ranks: graph.to_rank_map(&next_scores),
                passes: pass,
                max_delta,
            });
        }

        trace!(pass, max_delta, "PageRank pass");
        scores = next_scores;
    }

    warn!(
        passes = config.max_passes,
        max_delta, "PageRank hit its pass cap"
    );
    Err(RankError::NonConvergence {
        passes: config.max_passes,
        max_delta,
    })
}

/// Apply one update pass to an existing rank mapping.
///
/// `ranks` must have an entry for every page of `graph`; extra entries are ignored.
pub fn update_pass(graph: &LinkGraph, ranks: &RankMap, damping_factor: f64) -> RankResult<RankMap> {
    validate_damping(damping_factor)?;
    graph.require_pages()?;

    let scores = graph
        .pages()
        .map(|page| {
            ranks.get(page).copied().ok_or_else(|| {
                RankError::InvalidInput(format!("rank mapping has no entry for {:?}", page))
            })
        })
        .collect::<RankResult<Vec<f64>>>()?;

    Ok(graph.to_rank_map(&rank_pass(graph, &scores, damping_factor)))
}

/// One substitution of the PageRank equation; builds a fresh vector from `scores`.
fn rank_pass(graph: &LinkGraph, scores: &[f64], damping_factor: f64) -> Vec<f64> {
    let n = graph.page_count();
    let n_f64 = n as f64;

    // Pages without links act as linking to every page with weight 1/N
    let dangling_sum: f64 = (0..n)
        .filter(|&idx| graph.out_degree(idx) == 0)
        .map(|idx| scores[idx])
        .sum();
    let base_score = (1.0 - damping_factor) / n_f64 + damping_factor * dangling_sum / n_f64;

    (0..n)
        .map(|idx| {
            let sum_incoming: f64 = graph
                .predecessors(idx)
                .iter()
                .map(|&source| scores[source] / graph.out_degree(source) as f64)
                .sum();
            base_score + damping_factor * sum_incoming
        })
        .collect()
}
