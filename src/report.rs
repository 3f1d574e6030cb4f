//! Result reporting and estimator comparison

use linkrank_algorithms::RankMap;
use serde::Serialize;
use std::fmt;

/// Decimal places used when none are requested
pub const DEFAULT_PRECISION: usize = 4;

/// One estimator's ranks with a heading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankReport {
    pub title: String,
    pub ranks: RankMap,
}

impl RankReport {
    pub fn new(title: impl Into<String>, ranks: RankMap) -> Self {
        Self {
            title: title.into(),
            ranks,
        }
    }

    pub fn sampling(ranks: RankMap, sample_count: usize) -> Self {
        Self::new(
            format!("PageRank Results from Sampling (n = {})", sample_count),
            ranks,
        )
    }

    pub fn iteration(ranks: RankMap) -> Self {
        Self::new("PageRank Results from Iteration", ranks)
    }

    /// Sum of all ranks (1.0 for a well-formed report)
    pub fn total(&self) -> f64 {
        self.ranks.values().sum()
    }

    /// Heading followed by one indented `page: rank` line per page, in page order
    pub fn render(&self, precision: usize) -> String {
        let mut out = self.title.clone();
        for (page, rank) in &self.ranks {
            out.push_str(&format!("\n  {}: {:.*}", page, precision, rank));
        }
        out
    }
}

impl fmt::Display for RankReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_PRECISION))
    }
}

/// Both estimators over the same graph, sampling first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub sampling: RankReport,
    pub iteration: RankReport,
    /// Update passes the iteration needed
    pub passes: usize,
    /// Largest per-page gap between the two estimates
    pub max_divergence: f64,
}

impl Comparison {
    pub fn new(sampling: RankReport, iteration: RankReport, passes: usize) -> Self {
        let max_divergence = max_divergence(&sampling.ranks, &iteration.ranks);
        Self {
            sampling,
            iteration,
            passes,
            max_divergence,
        }
    }

    pub fn render(&self, precision: usize) -> String {
        format!(
            "{}\n{}",
            self.sampling.render(precision),
            self.iteration.render(precision)
        )
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_PRECISION))
    }
}

/// Largest absolute per-page difference; a page missing from one side counts as 0.0
pub fn max_divergence(a: &RankMap, b: &RankMap) -> f64 {
    a.keys()
        .chain(b.keys())
        .map(|page| {
            let left = a.get(page).copied().unwrap_or(0.0);
            let right = b.get(page).copied().unwrap_or(0.0);
            (left - right).abs()
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks(values: &[(&str, f64)]) -> RankMap {
        values.iter().map(|(p, r)| (p.to_string(), *r)).collect()
    }

    #[test]
    fn test_render_matches_classic_layout() {
        let report = RankReport::sampling(
            ranks(&[("2.html", 0.4289), ("1.html", 0.22017), ("3.html", 0.35093)]),
            10_000,
        );
        assert_eq!(
            report.to_string(),
            "PageRank Results from Sampling (n = 10000)\n  1.html: 0.2202\n  2.html: 0.4289\n  3.html: 0.3509"
        );
        assert_eq!(report.render(1), "PageRank Results from Sampling (n = 10000)\n  1.html: 0.2\n  2.html: 0.4\n  3.html: 0.4");
    }

    #[test]
    fn test_max_divergence() {
        let a = ranks(&[("A", 0.5), ("B", 0.5)]);
        let b = ranks(&[("A", 0.45), ("B", 0.55)]);
        assert!((max_divergence(&a, &b) - 0.05).abs() < 1e-12);

        let c = ranks(&[("A", 1.0)]);
        assert_eq!(max_divergence(&a, &c), 0.5);
        assert_eq!(max_divergence(&RankMap::new(), &RankMap::new()), 0.0);
    }

    #[test]
    fn test_comparison_order() {
        let cmp = Comparison::new(
            RankReport::sampling(ranks(&[("A", 0.5)]), 2),
            RankReport::iteration(ranks(&[("A", 0.5)])),
            1,
        );
        let text = cmp.to_string();
        assert!(text.find("Sampling").unwrap() < text.find("Iteration").unwrap());
        assert_eq!(cmp.max_divergence, 0.0);
    }
}
