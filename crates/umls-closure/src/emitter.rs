//! Name and synonym table writer.
//!
//! For every CUI of a closure, in order, writes one `cui,name` row to the
//! name table and one `cui,synonym` row per synonym to the synonym table.
//! Existing tables are erased first; a run never appends to a previous one.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::pin::pin;

use csv::{Writer, WriterBuilder};
use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use umls_types::Cui;

use crate::cache::AtomCache;
use crate::classifier::synonym_set;
use crate::service::TerminologyService;
use crate::types::{ClosureError, ClosureResult, EmitConfig};

/// Rows written by one emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    /// Rows in the name table.
    pub name_rows: usize,
    /// Rows in the synonym table.
    pub synonym_rows: usize,
}

/// Everything written for one concept.
#[derive(Debug)]
struct ConceptEntry {
    cui: Cui,
    name: String,
    synonyms: BTreeSet<String>,
}

/// Writes the name and synonym tables for a closure.
#[derive(Debug, Clone)]
pub struct TableEmitter {
    config: EmitConfig,
    cancel: CancellationToken,
}

impl TableEmitter {
    /// Creates an emitter.
    pub fn new(config: EmitConfig) -> Self {
        Self::with_cancellation(config, CancellationToken::new())
    }

    /// Creates an emitter that stops with [`ClosureError::Cancelled`] once
    /// `cancel` fires. Tables written so far are removed in that case.
    pub fn with_cancellation(config: EmitConfig, cancel: CancellationToken) -> Self {
        Self { config, cancel }
    }

    /// Returns the emitter configuration.
    pub fn config(&self) -> &EmitConfig {
        &self.config
    }

    /// Writes both tables for `closure`.
    ///
    /// Names come from a live concept lookup per CUI; synonyms come from
    /// `atoms`, so atoms already fetched by the walker are reused. Lookups
    /// run concurrently up to the configured limit, but rows are written in
    /// `closure` order, and a CUI's rows are only written once both of its
    /// lookups succeeded. Each CUI's rows are flushed before the next CUI.
    pub async fn emit<S: TerminologyService>(
        &self,
        closure: &[Cui],
        service: &S,
        atoms: &AtomCache<S>,
        name_path: &Path,
        synonym_path: &Path,
    ) -> ClosureResult<EmitStats> {
        if self.config.concurrency == 0 {
            return Err(ClosureError::InvalidConfig {
                message: "concurrency must be at least 1".to_string(),
            });
        }

        clear_tables(name_path, synonym_path)?;

        let result = self
            .write_tables(closure, service, atoms, name_path, synonym_path)
            .await;

        if matches!(result, Err(ClosureError::Cancelled)) {
            info!("Emission cancelled, removing partial tables");
            remove_if_exists(name_path)?;
            remove_if_exists(synonym_path)?;
        }

        result
    }

    async fn write_tables<S: TerminologyService>(
        &self,
        closure: &[Cui],
        service: &S,
        atoms: &AtomCache<S>,
        name_path: &Path,
        synonym_path: &Path,
    ) -> ClosureResult<EmitStats> {
        let mut names = self.writer(name_path)?;
        let mut synonyms = self.writer(synonym_path)?;
        let mut stats = EmitStats::default();

        info!(
            concepts = closure.len(),
            names = %name_path.display(),
            synonyms = %synonym_path.display(),
            "Writing tables"
        );

        let mut entries = pin!(stream::iter(closure)
            .map(|cui| self.lookup(cui, service, atoms))
            .buffered(self.config.concurrency));

        loop {
            let next = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(ClosureError::Cancelled),
                next = entries.next() => next,
            };
            let Some(entry) = next else { break };
            let entry = entry?;

            names.write_record([entry.cui.as_str(), entry.name.as_str()])?;
            for synonym in &entry.synonyms {
                synonyms.write_record([entry.cui.as_str(), synonym.as_str()])?;
            }
            names.flush()?;
            synonyms.flush()?;

            stats.name_rows += 1;
            stats.synonym_rows += entry.synonyms.len();
            debug!(cui = %entry.cui, synonyms = entry.synonyms.len(), "Wrote concept");
        }

        Ok(stats)
    }

    async fn lookup<S: TerminologyService>(
        &self,
        cui: &Cui,
        service: &S,
        atoms: &AtomCache<S>,
    ) -> ClosureResult<ConceptEntry> {
        let (name, atom_set) = tokio::try_join!(service.concept_name(cui), atoms.get_atoms(cui))?;
        let synonyms = synonym_set(&atom_set.atoms, self.config.lowercase_synonyms);

        Ok(ConceptEntry {
            cui: cui.clone(),
            name,
            synonyms,
        })
    }

    fn writer(&self, path: &Path) -> ClosureResult<Writer<fs::File>> {
        Ok(WriterBuilder::new()
            .has_headers(false)
            .delimiter(self.config.format.delimiter())
            .from_path(path)?)
    }
}

/// Erases both tables of a previous run and makes sure their directories
/// exist.
pub(crate) fn clear_tables(name_path: &Path, synonym_path: &Path) -> ClosureResult<()> {
    prepare_output(name_path, "CUI name")?;
    prepare_output(synonym_path, "CUI synonym")
}

fn prepare_output(path: &Path, label: &str) -> ClosureResult<()> {
    if path.exists() {
        info!("Erasing {} file: {}", label, path.display());
        fs::remove_file(path)?;
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn remove_if_exists(path: &Path) -> ClosureResult<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}
