//! # umls-closure
//!
//! Descendant closure and synonym table builder over the UMLS Terminology
//! Services (UTS) REST API.
//!
//! Starting from a list of seed CUIs, the [`ClosureWalker`] collects every
//! concept listed behind the descendant links of the seeds' atoms. The
//! [`TableEmitter`] then writes a name table (`cui,name`) and a synonym table
//! (`cui,synonym`) for the sorted closure.
//!
//! Atom and descendant listings are memoized per run with single-flight
//! caches, so every CUI and every descendant URL costs at most one remote
//! fetch no matter how many seeds share it.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use umls_closure::{build_tables, BuildConfig, ClientConfig, UtsClient};
//!
//! let client = UtsClient::new(ClientConfig::with_api_key(api_key))?;
//! let stats = build_tables(Arc::new(client), &BuildConfig::default(), CancellationToken::new()).await?;
//! println!("{} concepts, {} synonyms", stats.name_rows, stats.synonym_rows);
//! ```

#![warn(missing_docs)]

mod cache;
mod classifier;
mod client;
mod emitter;
mod pagination;
mod pipeline;
mod seeds;
mod service;
mod types;
mod walker;

#[cfg(test)]
mod test_support;

pub use cache::{AtomCache, DescendantCache, SingleFlightCache};
pub use classifier::{classify, synonym_set};
pub use client::UtsClient;
pub use emitter::{EmitStats, TableEmitter};
pub use pagination::collect_pages;
pub use pipeline::{build_tables, BuildConfig};
pub use seeds::{parse_seed_line, read_seed_file, read_seeds};
pub use service::{Page, TerminologyService};
pub use types::{
    ClientConfig, ClosureError, ClosureResult, EmitConfig, PageMode, RunStats, TableFormat,
    TablePaths, WalkConfig, DEFAULT_BASE_URL, DEFAULT_CONCURRENCY, DEFAULT_PAGE_SIZE,
    DEFAULT_TIMEOUT_SECS,
};
pub use walker::ClosureWalker;

// Re-export umls-types for convenience
pub use umls_types;
