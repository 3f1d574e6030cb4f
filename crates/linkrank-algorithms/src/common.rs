//! Shared graph model for the ranking algorithms
//!
//! Provides a read-only, dense view of the link graph for algorithm execution.

use crate::error::{RankError, RankResult};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Page identifier -> set of linked page identifiers, as produced by a corpus crawler
pub type LinkMap = BTreeMap<String, BTreeSet<String>>;

/// Probability of the surfer moving to each page next
pub type Distribution = BTreeMap<String, f64>;

/// Page identifier -> rank, iterated in identifier order
pub type RankMap = BTreeMap<String, f64>;

/// A dense, integer-indexed view of the link graph using Compressed Sparse Row (CSR) format.
///
/// Pages are indexed in sorted identifier order. Self-links and links to pages that are not
/// keys of the input are dropped on construction, so every stored edge stays inside the corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkGraph {
    /// Mapping from dense index (0..N) back to page identifier
    index_to_page: Vec<String>,
    /// Mapping from page identifier to dense index
    page_to_index: HashMap<String, usize>,

    /// Offsets into `out_targets`. Size = page_count + 1
    out_offsets: Vec<usize>,
    /// Contiguous array of linked page indices
    out_targets: Vec<usize>,

    /// Offsets into `in_sources`. Size = page_count + 1
    in_offsets: Vec<usize>,
    /// Contiguous array of linking page indices
    in_sources: Vec<usize>,
}

impl LinkGraph {
    /// Build the graph from any page -> links mapping.
    ///
    /// Repeated keys merge their link sets; duplicate links collapse.
    pub fn from_links<I, K, L, T>(links: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut merged = LinkMap::new();
        for (page, targets) in links {
            merged
                .entry(page.into())
                .or_default()
                .extend(targets.into_iter().map(Into::into));
        }
        Self::from_link_map(&merged)
    }

    /// Build the graph from an already-merged link map
    pub fn from_link_map(links: &LinkMap) -> Self {
        let index_to_page: Vec<String> = links.keys().cloned().collect();
        let page_to_index: HashMap<String, usize> = index_to_page
            .iter()
            .enumerate()
            .map(|(idx, page)| (page.clone(), idx))
            .collect();

        let n = index_to_page.len();
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut dropped = 0usize;

        for (u, targets) in links.values().enumerate() {
            for target in targets {
                match page_to_index.get(target.as_str()) {
                    Some(&v) if v != u => {
                        outgoing[u].push(v);
                        incoming[v].push(u);
                    }
                    _ => dropped += 1,
                }
            }
        }

        if dropped > 0 {
            debug!(dropped, "Dropped self-links and links leaving the corpus");
        }

        Self::from_adjacency_list(index_to_page, page_to_index, outgoing, incoming)
    }

    fn from_adjacency_list(
        index_to_page: Vec<String>,
        page_to_index: HashMap<String, usize>,
        outgoing: Vec<Vec<usize>>,
        incoming: Vec<Vec<usize>>,
    ) -> Self {
        let n = index_to_page.len();
        let mut out_offsets = Vec::with_capacity(n + 1);
        let mut out_targets = Vec::new();
        let mut in_offsets = Vec::with_capacity(n + 1);
        let mut in_sources = Vec::new();

        out_offsets.push(0);
        for neighbors in outgoing {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());
        }

        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        LinkGraph {
            index_to_page,
            page_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.index_to_page.len()
    }

    /// Number of intra-corpus links
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_to_page.is_empty()
    }

    /// Page identifiers in index (sorted) order
    pub fn pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.index_to_page.iter().map(String::as_str)
    }

    /// Identifier of the page at `idx`
    pub fn page(&self, idx: usize) -> &str {
        &self.index_to_page[idx]
    }

    pub fn index_of(&self, page: &str) -> Option<usize> {
        self.page_to_index.get(page).copied()
    }

    pub fn contains(&self, page: &str) -> bool {
        self.page_to_index.contains_key(page)
    }

    /// Index of `page`, or `PageNotFound`
    pub fn require_index(&self, page: &str) -> RankResult<usize> {
        self.index_of(page)
            .ok_or_else(|| RankError::PageNotFound(page.to_string()))
    }

    /// Get the out-degree of a page (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a page (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Pages linked from `idx`
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Pages linking to `idx`
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Identifiers linked from `page`
    pub fn links(&self, page: &str) -> RankResult<impl Iterator<Item = &str> + '_> {
        let idx = self.require_index(page)?;
        Ok(self.successors(idx).iter().map(move |&v| self.page(v)))
    }

    /// Pages with no outgoing links, in index order
    pub fn dangling_pages(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.page_count())
            .filter(move |&idx| self.out_degree(idx) == 0)
            .map(move |idx| self.page(idx))
    }

    /// The filtered graph as a page -> links mapping
    pub fn to_link_map(&self) -> LinkMap {
        (0..self.page_count())
            .map(|idx| {
                let targets = self
                    .successors(idx)
                    .iter()
                    .map(|&v| self.index_to_page[v].clone())
                    .collect();
                (self.index_to_page[idx].clone(), targets)
            })
            .collect()
    }

    /// Fails with `InvalidInput` when the graph has no pages
    pub(crate) fn require_pages(&self) -> RankResult<usize> {
        match self.page_count() {
            0 => Err(RankError::InvalidInput("graph has no pages".to_string())),
            n => Ok(n),
        }
    }

    /// Label a dense score vector with page identifiers
    pub(crate) fn to_rank_map(&self, scores: &[f64]) -> RankMap {
        self.index_to_page
            .iter()
            .cloned()
            .zip(scores.iter().copied())
            .collect()
    }
}
