use std::sync::Arc;

use medterm_types::{AnalysisResult, AnalysisState, AnalysisStatus};

use crate::error::StatusError;
use crate::preprocess::{DefaultPreprocessor, Preprocessor};

/// Message shown for every failed analysis, whatever the cause
pub const ANALYSIS_ERROR_MESSAGE: &str = "حدث خطأ أثناء تحليل المصطلح. يرجى المحاولة مرة أخرى.";

/// Owner of the current analysis state.
///
/// `Idle -> Loading -> {Success, Error}`; a new submission moves any
/// settled state back to `Loading`. At most one analysis is in flight.
#[derive(Debug, Default)]
pub struct StatusController {
    state: AnalysisState,
}

impl StatusController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn status(&self) -> AnalysisStatus {
        self.state.status()
    }

    /// Accept a submission. Returns the normalized term to analyze.
    pub fn begin(&mut self, input: &str) -> Result<String, StatusError> {
        if self.state.is_loading() {
            return Err(StatusError::Busy);
        }

        let term = DefaultPreprocessor.process(input);
        if term.is_empty() {
            return Err(StatusError::BlankInput);
        }

        tracing::debug!(from = ?self.state.status(), "status -> Loading");
        self.state = AnalysisState::Loading { term: term.clone() };

        Ok(term)
    }

    pub fn succeed(&mut self, result: AnalysisResult) -> Result<AnalysisState, StatusError> {
        self.settle(AnalysisState::Success(Arc::new(result)))
    }

    pub fn fail(&mut self) -> Result<AnalysisState, StatusError> {
        self.settle(AnalysisState::Error {
            message: ANALYSIS_ERROR_MESSAGE.to_string(),
        })
    }

    fn settle(&mut self, next: AnalysisState) -> Result<AnalysisState, StatusError> {
        if !self.state.is_loading() {
            return Err(StatusError::NotLoading(self.state.status()));
        }

        tracing::debug!(to = ?next.status(), "status settled");
        self.state = next;

        Ok(self.state.clone())
    }
}
