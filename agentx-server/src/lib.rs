//! # agentx-server
//!
//! HTTP serving layer for the `agentx-rag` document QA pipeline: axum
//! routes for querying (text and voice), document upload, and corpus
//! listing, plus startup seeding and environment-derived settings.

pub mod routes;
pub mod settings;
pub mod state;

pub use routes::app;
pub use settings::Settings;
pub use state::AppState;

use anyhow::Result;
use tracing::{info, warn};

/// Ingest the configured seed document when the index is empty.
///
/// Missing seed files are tolerated with a warning so a fresh deployment
/// can come up before any corpus exists.
pub async fn seed_if_empty(state: &AppState, settings: &Settings) -> Result<()> {
    let Some(path) = &settings.seed_data_path else {
        return Ok(());
    };
    let count = state.pipeline.vector_store().count().await?;
    if count > 0 {
        info!(records = count, "index already populated; skipping seed");
        return Ok(());
    }
    match tokio::fs::read_to_string(path).await {
        Ok(text) => {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "seed.txt".to_string());
            let document = agentx_rag::Document::new(filename.clone(), text);
            let report = state.pipeline.ingest(&document).await?;
            info!(document = %filename, chunks = report.chunks_added, "seed data loaded");
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "seed data file not readable; skipping");
        }
    }
    Ok(())
}
