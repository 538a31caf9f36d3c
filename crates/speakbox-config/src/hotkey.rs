use serde::{Deserialize, Serialize};
use speakbox_types::HotkeyAction;

fn default_capture() -> String {
    "ctrl+shift+c".to_string()
}

fn default_read_box() -> String {
    "ctrl+shift+r".to_string()
}

fn default_stop() -> String {
    "ctrl+shift+s".to_string()
}

fn default_toggle_visibility() -> String {
    "ctrl+shift+h".to_string()
}

fn default_copy_to_main() -> String {
    "ctrl+shift+g".to_string()
}

fn default_read_text() -> String {
    "F1".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HotkeyConfig {
    pub enabled: bool,
    #[serde(default = "default_capture")]
    pub capture: String,
    #[serde(default = "default_read_box")]
    pub read_box: String,
    #[serde(default = "default_stop")]
    pub stop: String,
    #[serde(default = "default_toggle_visibility")]
    pub toggle_visibility: String,
    #[serde(default = "default_copy_to_main")]
    pub copy_to_main: String,
    /// The only chord that can be rebound at runtime
    #[serde(default = "default_read_text")]
    pub read_text: String,
}

impl HotkeyConfig {
    pub fn bindings(&self) -> Vec<(HotkeyAction, &str)> {
        vec![
            (HotkeyAction::CaptureRegion, self.capture.as_str()),
            (HotkeyAction::ReadBox, self.read_box.as_str()),
            (HotkeyAction::StopReading, self.stop.as_str()),
            (HotkeyAction::ToggleVisibility, self.toggle_visibility.as_str()),
            (HotkeyAction::CopyToMain, self.copy_to_main.as_str()),
            (HotkeyAction::ReadText, self.read_text.as_str()),
        ]
    }
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capture: default_capture(),
            read_box: default_read_box(),
            stop: default_stop(),
            toggle_visibility: default_toggle_visibility(),
            copy_to_main: default_copy_to_main(),
            read_text: default_read_text(),
        }
    }
}
