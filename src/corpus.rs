//! Corpus crawler
//!
//! Reads a flat directory of `.html` pages and extracts the anchor links between them.
//! Only links to other pages of the same directory survive; the result feeds
//! [`LinkGraph::from_link_map`].

use crate::error::{CorpusError, CorpusResult};
use lazy_static::lazy_static;
use linkrank_algorithms::{LinkGraph, LinkMap};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

lazy_static! {
    static ref ANCHOR_HREF: Regex = Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).unwrap();
}

/// Every `href` target of an anchor tag in `html`, deduplicated
pub fn extract_links(html: &str) -> BTreeSet<String> {
    ANCHOR_HREF
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Crawl `dir` into a page -> links mapping.
///
/// Pages are keyed by file name. Self-links and links to files outside the corpus are removed.
pub fn crawl<P: AsRef<Path>>(dir: P) -> CorpusResult<LinkMap> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(CorpusError::NotADirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| CorpusError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut pages = LinkMap::new();
    for entry in entries {
        let entry = entry.map_err(|source| CorpusError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let filename = match entry.file_name().to_str() {
            Some(name) if name.ends_with(".html") && path.is_file() => name.to_string(),
            _ => continue,
        };

        let contents = fs::read_to_string(&path).map_err(|source| CorpusError::Io {
            path: path.clone(),
            source,
        })?;
        let mut links = extract_links(&contents);
        links.remove(&filename);

        debug!(page = %filename, links = links.len(), "Parsed page");
        pages.insert(filename, links);
    }

    if pages.is_empty() {
        return Err(CorpusError::NoPages(dir.to_path_buf()));
    }

    // Only include links to other pages in the corpus
    let known: BTreeSet<String> = pages.keys().cloned().collect();
    for links in pages.values_mut() {
        links.retain(|link| known.contains(link));
    }

    info!(pages = pages.len(), dir = %dir.display(), "Crawled corpus");
    Ok(pages)
}

/// Crawl `dir` and build the ranking graph
pub fn load_graph<P: AsRef<Path>>(dir: P) -> CorpusResult<LinkGraph> {
    Ok(LinkGraph::from_link_map(&crawl(dir)?))
}
