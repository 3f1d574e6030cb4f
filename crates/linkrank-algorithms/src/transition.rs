//! Random-surfer transition model
//!
//! With probability `damping_factor` the surfer follows one of the current page's links,
//! chosen uniformly; otherwise it jumps to any page in the graph. A page without links
//! sends the surfer to every page with equal probability.

use crate::common::{Distribution, LinkGraph};
use crate::config::validate_damping;
use crate::error::RankResult;

/// Probability distribution over the next page, given the current page.
///
/// The result has an entry for every page of `graph` and sums to 1.0.
pub fn distribution(
    graph: &LinkGraph,
    page: &str,
    damping_factor: f64,
) -> RankResult<Distribution> {
    validate_damping(damping_factor)?;
    graph.require_pages()?;
    let idx = graph.require_index(page)?;
    Ok(graph.to_rank_map(&transition_row(graph, idx, damping_factor)))
}

/// Dense transition probabilities out of page `idx`, indexed like `graph`.
///
/// Caller guarantees a non-empty graph, a valid index and a damping factor in [0,1].
pub(crate) fn transition_row(graph: &LinkGraph, idx: usize, damping_factor: f64) -> Vec<f64> {
    let n = graph.page_count() as f64;
    let links = graph.successors(idx);

    if links.is_empty() {
        return vec![1.0 / n; graph.page_count()];
    }

    let mut row = vec![(1.0 - damping_factor) / n; graph.page_count()];
    let share = damping_factor / links.len() as f64;
    for &target in links {
        row[target] += share;
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RankError;
    use proptest::prelude::*;

    fn corpus() -> LinkGraph {
        LinkGraph::from_links(vec![
            ("1.html", vec!["2.html", "3.html"]),
            ("2.html", vec!["3.html"]),
            ("3.html", vec!["2.html"]),
        ])
    }

    #[test]
    fn test_general_case() {
        let dist = distribution(&corpus(), "1.html", 0.85).unwrap();
        assert!((dist["1.html"] - 0.05).abs() < 1e-12);
        assert!((dist["2.html"] - 0.475).abs() < 1e-12);
        assert!((dist["3.html"] - 0.475).abs() < 1e-12);
    }

    #[test]
    fn test_output_is_total() {
        // 2.html never links to itself or to 1.html, both still get teleport mass
        let dist = distribution(&corpus(), "2.html", 0.85).unwrap();
        assert_eq!(dist.len(), 3);
        assert!((dist["1.html"] - 0.05).abs() < 1e-12);
        assert!((dist["2.html"] - 0.05).abs() < 1e-12);
        assert!((dist["3.html"] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_no_outlinks_is_uniform() {
        let graph = LinkGraph::from_links(vec![("A", vec![]), ("B", vec!["A"]), ("C", vec!["A"])]);
        let dist = distribution(&graph, "A", 0.85).unwrap();
        for p in dist.values() {
            assert_eq!(*p, 1.0 / 3.0);
        }
    }

    #[test]
    fn test_extreme_damping() {
        let graph = corpus();
        let all_teleport = distribution(&graph, "1.html", 0.0).unwrap();
        assert!(all_teleport.values().all(|p| (p - 1.0 / 3.0).abs() < 1e-12));

        let all_links = distribution(&graph, "2.html", 1.0).unwrap();
        assert_eq!(all_links["3.html"], 1.0);
        assert_eq!(all_links["1.html"], 0.0);
    }

    #[test]
    fn test_invalid_input() {
        let graph = corpus();
        assert_eq!(
            distribution(&graph, "missing.html", 0.85),
            Err(RankError::PageNotFound("missing.html".to_string()))
        );
        assert!(distribution(&graph, "1.html", 1.01).unwrap_err().is_invalid_input());

        let empty = LinkGraph::from_links(Vec::<(String, Vec<String>)>::new());
        assert!(distribution(&empty, "1.html", 0.85).unwrap_err().is_invalid_input());
    }

    proptest! {
        #[test]
        fn prop_distribution_sums_to_one(
            n in 1usize..12,
            edges in proptest::collection::vec((0usize..12, 0usize..12), 0..60),
            damping in 0.0f64..=1.0,
            from in 0usize..12,
        ) {
            let mut links: Vec<(String, Vec<String>)> =
                (0..n).map(|i| (format!("p{}", i), Vec::new())).collect();
            for (u, v) in edges {
                if u < n && v < n {
                    links[u].1.push(format!("p{}", v));
                }
            }
            let graph = LinkGraph::from_links(links);
            let page = format!("p{}", from % n);
            let dist = distribution(&graph, &page, damping).unwrap();

            prop_assert_eq!(dist.len(), n);
            prop_assert!(dist.values().all(|p| *p >= 0.0));
            let sum: f64 = dist.values().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9, "sum={}", sum);
        }
    }
}
