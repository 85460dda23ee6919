use medterm_types::{AnalysisState, AppEvent};

use crate::state::UiState;
use crate::view::{Palette, help_text, render_result, render_status};

/// Apply a backend event to the UI state; returns what to print, if anything
pub fn handle_event(event: AppEvent, ui: &mut UiState, palette: &Palette) -> Option<String> {
    match event {
        AppEvent::StatusChanged(state) => {
            tracing::debug!("[UI] status: {:?}", state.status());
            ui.apply(state);

            match (&ui.status, &ui.panel) {
                (AnalysisState::Success(_), Some(panel)) => Some(render_result(panel, palette)),
                (status, _) => render_status(status, palette),
            }
        }
        AppEvent::SubmissionRejected { term } => {
            tracing::debug!("[UI] submission '{}' rejected", term);
            ui.submission_rejected();
            None
        }
        AppEvent::BackendReady => {
            tracing::debug!("[UI] Backend ready");
            Some(help_text().to_string())
        }
        AppEvent::UiEvent(_) => None,
    }
}
