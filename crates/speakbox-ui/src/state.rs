use speakbox_config::ui::UiConfig;
use speakbox_types::{BoxView, Notification, SelectionView};

/// How many notifications the panel keeps around
const NOTIFICATION_HISTORY: usize = 20;

/// What the panel currently shows, mirrored from backend events
#[derive(Debug, Clone)]
pub struct UiState {
    pub ready: bool,
    pub status: String,
    pub reading: bool,
    pub text: String,
    pub box_view: Option<BoxView>,
    pub selection: Option<SelectionView>,
    pub panel_visible: bool,
    pub voice: String,
    pub voices: Vec<String>,
    pub config: UiConfig,
    pub notifications: Vec<Notification>,
}

impl UiState {
    pub fn new(config: UiConfig, voice: String, voices: Vec<String>) -> Self {
        Self {
            ready: false,
            status: "Starting...".to_string(),
            reading: false,
            text: String::new(),
            box_view: None,
            selection: None,
            panel_visible: true,
            voice,
            voices,
            config,
            notifications: Vec::new(),
        }
    }

    pub fn push_notification(&mut self, notification: Notification) {
        if self.notifications.len() == NOTIFICATION_HISTORY {
            self.notifications.remove(0);
        }
        self.notifications.push(notification);
    }

    pub fn is_selecting(&self) -> bool {
        self.selection.is_some()
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(UiConfig::default(), String::new(), Vec::new())
    }
}
