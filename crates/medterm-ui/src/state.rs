use std::sync::Arc;

use medterm_types::{AnalysisResult, AnalysisState};

/// A rendered result and its collapsible academic sub-panel
#[derive(Debug, Clone)]
pub struct ResultPanel {
    pub result: Arc<AnalysisResult>,
    pub show_academic: bool,
}

impl ResultPanel {
    pub fn new(result: Arc<AnalysisResult>, show_academic: bool) -> Self {
        Self {
            result,
            show_academic,
        }
    }

    pub fn toggle_academic(&mut self) -> bool {
        self.show_academic = !self.show_academic;
        self.show_academic
    }
}

/// UI-specific state (separate from the backend's status controller)
pub struct UiState {
    pub status: AnalysisState,
    pub panel: Option<ResultPanel>,
    academic_by_default: bool,
    /// Set when a term is sent, before the backend's `Loading` comes back
    pending: bool,
}

impl UiState {
    pub fn new(academic_by_default: bool) -> Self {
        Self {
            status: AnalysisState::Idle,
            panel: None,
            academic_by_default,
            pending: false,
        }
    }

    /// Mirror a backend transition. Any state other than `Success` drops
    /// the visible result.
    pub fn apply(&mut self, state: AnalysisState) {
        self.panel = state
            .result()
            .map(|result| ResultPanel::new(Arc::clone(result), self.academic_by_default));
        if !state.is_loading() {
            self.pending = false;
        }
        self.status = state;
    }

    pub fn mark_submitted(&mut self) {
        self.pending = true;
    }

    /// The backend dropped the last submission without a transition
    pub fn submission_rejected(&mut self) {
        self.pending = false;
    }

    /// Submissions are disabled from send until the request settles
    pub fn accepts_submissions(&self) -> bool {
        !self.pending && !self.status.is_loading()
    }

    pub fn toggle_academic(&mut self) -> Option<&ResultPanel> {
        let panel = self.panel.as_mut()?;
        panel.toggle_academic();
        Some(panel)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(false)
    }
}
