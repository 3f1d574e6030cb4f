//! Ranking engine for directed link graphs.
//!
//! Two independent estimators share one transition model:
//! - [`sample_rank`]: Monte-Carlo random surfer, visit counts normalized by sample count
//! - [`iterate_rank`]: fixed-point PageRank iteration under an absolute tolerance
//!
//! Both read an immutable [`LinkGraph`] and return a [`RankMap`] summing to 1.0.

pub mod common;
pub mod config;
pub mod error;
pub mod pagerank;
pub mod sampling;
pub mod transition;

pub use common::{Distribution, LinkGraph, LinkMap, RankMap};
pub use config::RankConfig;
pub use error::{RankError, RankResult};
pub use pagerank::{iterate_rank, iterate_rank_run, update_pass, IterationRun};
pub use sampling::{sample_rank, sample_rank_run, sample_rank_with_rng, SamplingRun};
pub use transition::distribution;
