//! Descendant closure computation.
//!
//! The closure of a seed list is the seeds plus every CUI listed behind any
//! descendant link on a seed's atoms. Expansion is one level deep: the
//! service's descendant listings are already transitive for their source
//! hierarchy, so discovered descendants are not expanded again.
//!
//! ```ignore
//! let walker = ClosureWalker::new(Arc::new(client), WalkConfig::default());
//! let closure = walker.compute_closure(&seeds).await?;
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use umls_types::Cui;

use crate::cache::{AtomCache, DescendantCache};
use crate::service::TerminologyService;
use crate::types::{ClosureError, ClosureResult, WalkConfig};

/// Computes descendant closures over a terminology service.
///
/// Owns the atom and descendant caches for one run; reuse the same walker
/// for the emitter so atoms fetched during the walk are not fetched again.
pub struct ClosureWalker<S> {
    atoms: AtomCache<S>,
    descendants: DescendantCache<S>,
    config: WalkConfig,
    cancel: CancellationToken,
}

impl<S: TerminologyService> ClosureWalker<S> {
    /// Creates a walker with fresh caches.
    pub fn new(service: Arc<S>, config: WalkConfig) -> Self {
        Self::with_cancellation(service, config, CancellationToken::new())
    }

    /// Creates a walker that stops with [`ClosureError::Cancelled`] once
    /// `cancel` fires.
    pub fn with_cancellation(service: Arc<S>, config: WalkConfig, cancel: CancellationToken) -> Self {
        Self {
            atoms: AtomCache::new(Arc::clone(&service), config.page_mode),
            descendants: DescendantCache::new(service, config.page_mode),
            config,
            cancel,
        }
    }

    /// Returns the atom cache shared with the emitter.
    pub fn atom_cache(&self) -> &AtomCache<S> {
        &self.atoms
    }

    /// Returns the descendant cache.
    pub fn descendant_cache(&self) -> &DescendantCache<S> {
        &self.descendants
    }

    /// Computes the closure of `seeds` as a sorted, duplicate-free list.
    ///
    /// Every seed is part of the result. Seeds are expanded concurrently up
    /// to the configured limit; the result does not depend on fetch order.
    ///
    /// # Errors
    /// The first remote or schema error aborts the walk. Cancellation yields
    /// [`ClosureError::Cancelled`].
    pub async fn compute_closure(&self, seeds: &[Cui]) -> ClosureResult<Vec<Cui>> {
        if self.config.concurrency == 0 {
            return Err(ClosureError::InvalidConfig {
                message: "concurrency must be at least 1".to_string(),
            });
        }

        info!(seeds = seeds.len(), "Computing descendant closure");

        let closure = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(ClosureError::Cancelled),
            result = self.walk(seeds) => result?,
        };

        info!(
            closure = closure.len(),
            atom_fetches = self.atoms.fetch_count(),
            descendant_fetches = self.descendants.fetch_count(),
            "Closure complete"
        );

        Ok(closure.into_iter().collect())
    }

    async fn walk(&self, seeds: &[Cui]) -> ClosureResult<BTreeSet<Cui>> {
        stream::iter(seeds)
            .map(|seed| self.expand(seed))
            .buffer_unordered(self.config.concurrency)
            .try_fold(BTreeSet::new(), |mut closure, reached| async move {
                closure.extend(reached);
                Ok(closure)
            })
            .await
    }

    /// Returns `seed` plus every CUI listed behind its atoms' descendant links.
    pub async fn expand(&self, seed: &Cui) -> ClosureResult<BTreeSet<Cui>> {
        let mut reached = BTreeSet::new();
        reached.insert(seed.clone());

        let atoms = self.atoms.get_atoms(seed).await?;
        for url in atoms.descendant_urls() {
            let descendants = self.descendants.get_descendants(url).await?;
            reached.extend(descendants.iter().cloned());
        }

        debug!(seed = %seed, reached = reached.len(), "Expanded seed");
        Ok(reached)
    }
}
