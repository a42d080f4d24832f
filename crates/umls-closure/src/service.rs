//! The remote terminology service seam.
//!
//! The walker and emitter only talk to [`TerminologyService`]; the UTS HTTP
//! client is one implementation, tests use an in-memory one.

use async_trait::async_trait;
use umls_types::{AtomRecord, Cui};

use crate::types::ClosureResult;

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based number of this page.
    pub page_number: u32,
    /// Total pages reported by the service (at least 1).
    pub page_count: u32,
}

impl<T> Page<T> {
    /// Creates a page, clamping the page count to at least one.
    pub fn new(items: Vec<T>, page_number: u32, page_count: u32) -> Self {
        Self {
            items,
            page_number,
            page_count: page_count.max(1),
        }
    }

    /// A listing that fits on one page.
    pub fn single(items: Vec<T>) -> Self {
        Self::new(items, 1, 1)
    }

    /// Returns true if the service reports pages after this one.
    pub fn has_more(&self) -> bool {
        self.page_number < self.page_count
    }
}

/// Operations the closure engine needs from the terminology service.
#[async_trait]
pub trait TerminologyService: Send + Sync {
    /// Fetches one page of a concept's atoms.
    async fn atoms_page(&self, cui: &Cui, page_number: u32) -> ClosureResult<Page<AtomRecord>>;

    /// Fetches one page of a descendant listing.
    ///
    /// `url` is the exact locator found on an atom.
    async fn descendants_page(&self, url: &str, page_number: u32) -> ClosureResult<Page<Cui>>;

    /// Looks up a concept's canonical name.
    async fn concept_name(&self, cui: &Cui) -> ClosureResult<String>;
}
