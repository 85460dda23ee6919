pub mod analysis;
pub mod types;

pub use analysis::{
    AcademicExplanation, AnalysisResult, TermPart, TermPartType, UsageExample, ValidationError,
};
pub use types::{AnalysisState, AnalysisStatus, AppEvent, UiEvent};
