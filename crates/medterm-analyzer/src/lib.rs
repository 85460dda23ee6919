use medterm_types::{AnalysisResult, ValidationError};

pub mod gemini;
pub mod prompt;
pub mod validate;

pub use gemini::GeminiAnalyzer;
pub use validate::parse_analysis;

/// Term analysis provider interface
#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyze a single medical term. One request per call, no retries.
    async fn analyze(&self, term: &str) -> Result<AnalysisResult, AnalysisError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Missing API key")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Authentication error")]
    Authentication,

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Prompt blocked: {0}")]
    Blocked(String),

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Schema violation: {0}")]
    SchemaViolation(String),
}

impl AnalysisError {
    /// The model answered, but not in the agreed shape
    pub fn is_schema_violation(&self) -> bool {
        matches!(self, AnalysisError::SchemaViolation(_))
    }
}

impl From<ValidationError> for AnalysisError {
    fn from(e: ValidationError) -> Self {
        AnalysisError::SchemaViolation(e.to_string())
    }
}
