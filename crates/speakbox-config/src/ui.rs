use serde::{Deserialize, Serialize};

fn default_always_on_top() -> bool {
    true
}

fn default_text_size() -> u32 {
    12
}

fn default_panel_opacity() -> f32 {
    1.0
}

/// Panel appearance, consumed only by the front end
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_always_on_top")]
    pub always_on_top: bool,
    pub compact_mode: bool,
    pub high_contrast: bool,
    #[serde(default = "default_text_size")]
    pub text_size: u32,
    #[serde(default = "default_panel_opacity")]
    pub panel_opacity: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            always_on_top: default_always_on_top(),
            compact_mode: false,
            high_contrast: false,
            text_size: default_text_size(),
            panel_opacity: default_panel_opacity(),
        }
    }
}
