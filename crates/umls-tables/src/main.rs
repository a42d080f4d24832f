//! UMLS closure table builder binary.

mod cli;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use umls_closure::{build_tables, UtsClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = cli::Cli::parse();

    tracing::info!(
        source_dir = %cli.source_dir.display(),
        target_dir = %cli.target_dir.display(),
        page_size = cli.page_size,
        pages = ?cli.pages,
        concurrency = cli.concurrency,
        lowercase_synonyms = cli.lowercase_synonyms,
        "umls-tables starting"
    );

    let client = UtsClient::new(cli.client_config())?;
    let config = cli.build_config();

    // Ctrl-C and the optional deadline both cancel the run
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, cancelling run");
                cancel.cancel();
            }
        });
    }
    if let Some(deadline) = cli.deadline() {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            tracing::warn!("Deadline of {:?} reached, cancelling run", deadline);
            cancel.cancel();
        });
    }

    match build_tables(Arc::new(client), &config, cancel).await {
        Ok(stats) => {
            tracing::info!(
                "Wrote {} names and {} synonyms ({:.1} per concept) in {} ms",
                stats.name_rows,
                stats.synonym_rows,
                stats.synonyms_per_concept(),
                stats.elapsed_ms
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Table build failed: {}", e);
            Err(e.into())
        }
    }
}
