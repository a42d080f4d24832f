//! Run-scoped memoization of remote listings.
//!
//! Both caches are built on [`SingleFlightCache`]: concurrent first requests
//! for the same key share one fetch, later requests get the stored value. A
//! failed fetch stores nothing.

use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::debug;
use umls_types::{ConceptAtomSet, Cui};

use crate::pagination::collect_pages;
use crate::service::TerminologyService;
use crate::types::{ClosureResult, PageMode};

/// Key-to-value memo with at most one fetch in flight per key.
pub struct SingleFlightCache<K, V> {
    cells: Mutex<HashMap<K, Arc<OnceCell<Arc<V>>>>>,
    fetches: AtomicUsize,
}

impl<K, V> Default for SingleFlightCache<K, V> {
    fn default() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
            fetches: AtomicUsize::new(0),
        }
    }
}

impl<K, V> std::fmt::Debug for SingleFlightCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleFlightCache")
            .field("fetches", &self.fetch_count())
            .finish()
    }
}

impl<K: Eq + Hash + Clone, V> SingleFlightCache<K, V> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, running `fetch` if there is none.
    ///
    /// If another task is already fetching `key`, waits for it instead.
    pub async fn get_or_fetch<F, Fut>(&self, key: &K, fetch: F) -> ClosureResult<Arc<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClosureResult<V>>,
    {
        let cell = {
            let mut cells = self.cells.lock().await;
            Arc::clone(cells.entry(key.clone()).or_default())
        };

        let value = cell
            .get_or_try_init(|| async move {
                self.fetches.fetch_add(1, Ordering::Relaxed);
                fetch().await.map(Arc::new)
            })
            .await?;

        Ok(Arc::clone(value))
    }
}

impl<K, V> SingleFlightCache<K, V> {
    /// Number of fetches started.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

/// Memoized atom listings, keyed by concept.
pub struct AtomCache<S> {
    service: Arc<S>,
    page_mode: PageMode,
    entries: SingleFlightCache<Cui, ConceptAtomSet>,
}

impl<S: TerminologyService> AtomCache<S> {
    /// Creates an empty cache over `service`.
    pub fn new(service: Arc<S>, page_mode: PageMode) -> Self {
        Self {
            service,
            page_mode,
            entries: SingleFlightCache::new(),
        }
    }

    /// Returns all atoms of `cui`, fetching them on first use.
    pub async fn get_atoms(&self, cui: &Cui) -> ClosureResult<Arc<ConceptAtomSet>> {
        self.entries
            .get_or_fetch(cui, || async {
                let atoms = collect_pages(self.page_mode, cui.as_str(), |page| {
                    self.service.atoms_page(cui, page)
                })
                .await?;
                debug!(cui = %cui, atoms = atoms.len(), "Fetched atoms");
                Ok(ConceptAtomSet::new(cui.clone(), atoms))
            })
            .await
    }

    /// Number of atom listings fetched so far.
    pub fn fetch_count(&self) -> usize {
        self.entries.fetch_count()
    }
}

/// Memoized descendant listings, keyed by the exact descendant URL.
pub struct DescendantCache<S> {
    service: Arc<S>,
    page_mode: PageMode,
    entries: SingleFlightCache<String, BTreeSet<Cui>>,
}

impl<S: TerminologyService> DescendantCache<S> {
    /// Creates an empty cache over `service`.
    pub fn new(service: Arc<S>, page_mode: PageMode) -> Self {
        Self {
            service,
            page_mode,
            entries: SingleFlightCache::new(),
        }
    }

    /// Returns the descendants listed at `url`, fetching them on first use.
    pub async fn get_descendants(&self, url: &str) -> ClosureResult<Arc<BTreeSet<Cui>>> {
        let key = url.to_string();
        self.entries
            .get_or_fetch(&key, || async {
                let cuis = collect_pages(self.page_mode, url, |page| {
                    self.service.descendants_page(url, page)
                })
                .await?;
                let descendants: BTreeSet<Cui> = cuis.into_iter().collect();
                debug!(url, descendants = descendants.len(), "Fetched descendants");
                Ok(descendants)
            })
            .await
    }

    /// Number of descendant listings fetched so far.
    pub fn fetch_count(&self) -> usize {
        self.entries.fetch_count()
    }
}
