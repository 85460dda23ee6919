use std::env;

use serde::{Deserialize, Serialize};

use self::analyzer::AnalyzerConfig;
use self::ui::UiConfig;

pub mod analyzer;
pub mod ui;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub analyzer: AnalyzerConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Defaults overlaid with the process environment
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Environment wins over values loaded from a profile file
    pub fn apply_env(&mut self) {
        self.analyzer.apply_vars(|key| env::var(key).ok());

        if env::var_os("NO_COLOR").is_some() {
            self.ui.color = false;
        }
    }
}
