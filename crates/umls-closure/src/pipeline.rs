//! End-to-end table build: seed file in, name and synonym tables out.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::emitter::{clear_tables, TableEmitter};
use crate::seeds::read_seed_file;
use crate::service::TerminologyService;
use crate::types::{ClosureResult, EmitConfig, RunStats, TablePaths, WalkConfig};
use crate::walker::ClosureWalker;

/// Everything a run needs besides the service.
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    /// Input and output locations.
    pub paths: TablePaths,
    /// Closure walk settings.
    pub walk: WalkConfig,
    /// Table writing settings.
    pub emit: EmitConfig,
}

/// Reads the seed file, computes the closure and writes both tables.
///
/// Tables left by a previous run are erased before the seed file is read,
/// so a failed run never leaves stale output behind. The atom cache filled
/// during the walk is reused while writing synonyms.
///
/// # Errors
/// Fails on the first input, remote, schema or output error, or with
/// [`ClosureError::Cancelled`](crate::ClosureError::Cancelled) once `cancel`
/// fires.
pub async fn build_tables<S: TerminologyService>(
    service: Arc<S>,
    config: &BuildConfig,
    cancel: CancellationToken,
) -> ClosureResult<RunStats> {
    let start = Instant::now();
    let paths = &config.paths;

    info!("Working directory: {}", paths.source_dir.display());
    clear_tables(&paths.cui_name_path(), &paths.cui_synonym_path())?;

    info!("Reading root CUIs from: {}", paths.root_cui_path().display());
    let seeds = read_seed_file(paths.root_cui_path())?;
    info!("Read {} root CUIs", seeds.len());

    let walker = ClosureWalker::with_cancellation(
        Arc::clone(&service),
        config.walk.clone(),
        cancel.clone(),
    );
    let closure = walker.compute_closure(&seeds).await?;

    let emitter = TableEmitter::with_cancellation(config.emit.clone(), cancel);
    let emitted = emitter
        .emit(
            &closure,
            service.as_ref(),
            walker.atom_cache(),
            &paths.cui_name_path(),
            &paths.cui_synonym_path(),
        )
        .await?;

    let stats = RunStats {
        seed_count: seeds.len(),
        closure_size: closure.len(),
        name_rows: emitted.name_rows,
        synonym_rows: emitted.synonym_rows,
        atom_fetches: walker.atom_cache().fetch_count(),
        descendant_fetches: walker.descendant_cache().fetch_count(),
        elapsed_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        seeds = stats.seed_count,
        closure = stats.closure_size,
        name_rows = stats.name_rows,
        synonym_rows = stats.synonym_rows,
        atom_fetches = stats.atom_fetches,
        descendant_fetches = stats.descendant_fetches,
        elapsed_ms = stats.elapsed_ms,
        "Tables built"
    );

    Ok(stats)
}
