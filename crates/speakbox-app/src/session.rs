use std::time::Duration;

use speakbox_config::Config;
use speakbox_core::overlay::{BoxLimits, BoxVisibility, OverlayBox};
use speakbox_core::selection::SelectionMachine;
use speakbox_types::BoxView;

/// Everything the event loop owns exclusively
pub struct Session {
    pub selection: SelectionMachine,
    pub overlay: Option<OverlayBox>,
    pub visibility: BoxVisibility,
    pub limits: BoxLimits,
    pub box_opacity: f32,
    pub selection_timeout: Duration,
    pub text: String,
    pub voice: String,
    pub panel_visible: bool,
    /// Panel visibility to restore once the selection overlay closes
    pub panel_before_selection: bool,
    pub capturing: bool,
    pub stop_requested: bool,
}

impl Session {
    pub fn from_config(config: &Config) -> Self {
        let overlay = &config.overlay;
        Self {
            selection: SelectionMachine::new(overlay.min_drag),
            overlay: None,
            visibility: BoxVisibility::new(overlay.show_box, overlay.auto_hide),
            limits: BoxLimits {
                border: overlay.resize_border,
                min_width: overlay.min_box_width,
                min_height: overlay.min_box_height,
            },
            box_opacity: overlay.box_opacity,
            selection_timeout: Duration::from_millis(overlay.selection_timeout_ms),
            text: String::new(),
            voice: config.speech.voice.clone(),
            panel_visible: true,
            panel_before_selection: true,
            capturing: false,
            stop_requested: false,
        }
    }

    pub fn box_view(&self) -> Option<BoxView> {
        self.overlay
            .as_ref()
            .map(|overlay| overlay.view(self.visibility.is_visible()))
    }
}
