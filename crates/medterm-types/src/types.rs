use std::sync::Arc;

use crate::analysis::AnalysisResult;

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// Backend -> UI, carries the full state after a transition
    StatusChanged(AnalysisState),
    /// Backend -> UI, a submission was dropped without a transition
    SubmissionRejected { term: String },
    BackendReady,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    SubmitTerm(String),
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Current status together with its payload.
///
/// Transitions replace the whole value, so an error never sits next to a
/// result from a previous query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnalysisState {
    #[default]
    Idle,
    Loading {
        term: String,
    },
    Success(Arc<AnalysisResult>),
    Error {
        message: String,
    },
}

impl AnalysisState {
    pub fn status(&self) -> AnalysisStatus {
        match self {
            AnalysisState::Idle => AnalysisStatus::Idle,
            AnalysisState::Loading { .. } => AnalysisStatus::Loading,
            AnalysisState::Success(_) => AnalysisStatus::Success,
            AnalysisState::Error { .. } => AnalysisStatus::Error,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AnalysisState::Loading { .. })
    }

    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        match self {
            AnalysisState::Success(result) => Some(result),
            _ => None,
        }
    }
}
