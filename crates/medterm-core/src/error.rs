use medterm_types::AnalysisStatus;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("input is blank")]
    BlankInput,

    #[error("an analysis is already in progress")]
    Busy,

    #[error("no analysis in progress (status: {0:?})")]
    NotLoading(AnalysisStatus),
}
