use std::sync::Arc;

use kanal::AsyncSender;
use medterm_analyzer::Analyzer;
use medterm_core::error::StatusError;
use medterm_types::{AnalysisState, AppEvent};
use tokio::task::JoinSet;

use crate::state::AppState;

/// Move to `Loading`, then run the analysis in `analyses` and report the
/// settled state. Blank or concurrent submissions are dropped here and
/// acknowledged with `SubmissionRejected`.
pub async fn handle_submission(
    state: Arc<AppState>,
    analyzer: Arc<dyn Analyzer>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    analyses: &mut JoinSet<()>,
    text: String,
) -> anyhow::Result<()> {
    let begun = state.status.lock().await.begin(&text);
    let term = match begun {
        Ok(term) => term,
        Err(e) => {
            match e {
                StatusError::BlankInput => tracing::debug!("Ignoring blank submission"),
                e => tracing::warn!("Submission '{}' rejected: {}", text, e),
            }
            app_to_ui_tx
                .send(AppEvent::SubmissionRejected { term: text })
                .await?;
            return Ok(());
        }
    };

    app_to_ui_tx
        .send(AppEvent::StatusChanged(AnalysisState::Loading {
            term: term.clone(),
        }))
        .await?;

    let tx = app_to_ui_tx.clone();
    analyses.spawn(async move {
        let outcome = analyzer.analyze(&term).await;

        let next = {
            let mut status = state.status.lock().await;
            match outcome {
                Ok(result) => {
                    tracing::info!(
                        "Analyzed '{}' -> {} ({} parts, {} examples)",
                        term,
                        result.english_term,
                        result.parts.len(),
                        result.examples.len()
                    );
                    status.succeed(result)
                }
                Err(e) => {
                    tracing::error!(
                        schema_violation = e.is_schema_violation(),
                        "Analysis of '{}' failed: {}",
                        term,
                        e
                    );
                    status.fail()
                }
            }
        };

        match next {
            Ok(settled) => {
                if let Err(e) = tx.send(AppEvent::StatusChanged(settled)).await {
                    tracing::error!("Failed to send analysis status to UI: {}", e);
                }
            }
            Err(e) => tracing::error!("Status transition failed: {}", e),
        }
    });

    Ok(())
}
