use std::env;

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Gemini API key. Left empty when unset; each analysis then fails with
    /// a missing-key error instead of aborting startup.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL, without the `/models/...` suffix
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout. `None` keeps the HTTP client's default.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            api_url: default_api_url(),
            timeout_seconds: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_vars(var);
        config
    }

    /// Override fields that are present in the variable source
    pub fn apply_vars<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = var("API_KEY")
            .or_else(|| var("GEMINI_API_KEY"))
            .filter(|v| !v.trim().is_empty())
        {
            self.api_key = api_key.trim().to_string();
        }

        if let Some(model) = var("GEMINI_MODEL").filter(|v| !v.trim().is_empty()) {
            self.model = model;
        }

        if let Some(api_url) = var("GEMINI_API_URL").filter(|v| !v.trim().is_empty()) {
            self.api_url = api_url;
        }

        if let Some(timeout) = var("REQUEST_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            self.timeout_seconds = Some(timeout).filter(|t| *t > 0);
        }
    }

    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}
