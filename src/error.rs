//! Error types for the corpus, config and ranking layers

use linkrank_algorithms::RankError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while crawling a corpus directory
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Corpus path {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("Corpus {0} contains no .html pages")]
    NoPages(PathBuf),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type CorpusResult<T> = Result<T, CorpusError>;

/// Errors that can occur while loading a ranking config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(#[from] RankError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Any error surfaced by the `linkrank` crate
#[derive(Error, Debug)]
pub enum LinkRankError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rank(#[from] RankError),
}

pub type LinkRankResult<T> = Result<T, LinkRankError>;
