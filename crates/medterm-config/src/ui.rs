use serde::{Deserialize, Serialize};

fn default_color() -> bool {
    true
}

fn default_prompt() -> String {
    "مصطلح > ".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Colour morphemes by type. Ignored when stdout is not a terminal.
    #[serde(default = "default_color")]
    pub color: bool,
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Expand the academic panel on every new result
    #[serde(default)]
    pub show_academic: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            prompt: default_prompt(),
            show_academic: false,
        }
    }
}
