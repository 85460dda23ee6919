use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use medterm_analyzer::Analyzer;
use medterm_types::{AppEvent, UiEvent};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod submit_term;

use submit_term::handle_submission;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    analyzer: Arc<dyn Analyzer>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let metadata = analyzer.metadata();
    tracing::info!(
        "[EVENT_LOOP] Starting with {} ({})",
        metadata.name,
        metadata.model
    );

    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    // In-flight analyses, at most one at a time
    let mut analyses = JoinSet::new();

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                discard_analyses(&mut analyses).await;
                return Ok(());
            }
            Some(joined) = analyses.join_next(), if !analyses.is_empty() => {
                if let Err(e) = joined {
                    tracing::error!("[EVENT_LOOP] Analysis task failed: {}", e);
                }
                continue;
            }
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );

        match event {
            AppEvent::UiEvent(UiEvent::SubmitTerm(text)) => {
                handle_submission(
                    state.clone(),
                    analyzer.clone(),
                    &app_to_ui_tx,
                    &mut analyses,
                    text,
                )
                .await?;
            }
            AppEvent::UiEvent(UiEvent::Close) => {
                tracing::info!("[EVENT_LOOP] Close requested");
                discard_analyses(&mut analyses).await;
                return Ok(());
            }
            AppEvent::StatusChanged(_)
            | AppEvent::SubmissionRejected { .. }
            | AppEvent::BackendReady => {
                // UI-only events, ignore in backend
            }
        }
    }
}

/// Abort whatever is still running. The UI only closes mid-analysis on an
/// explicit quit.
async fn discard_analyses(analyses: &mut JoinSet<()>) {
    if !analyses.is_empty() {
        tracing::info!(
            "[EVENT_LOOP] Discarding {} in-flight analysis",
            analyses.len()
        );
    }
    analyses.shutdown().await;
}
