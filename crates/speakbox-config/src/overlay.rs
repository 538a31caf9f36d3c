use serde::{Deserialize, Serialize};

fn default_box_opacity() -> f32 {
    0.5
}

fn default_show_box() -> bool {
    true
}

fn default_selection_timeout_ms() -> u64 {
    10_000
}

fn default_min_drag() -> u32 {
    5
}

fn default_resize_border() -> i32 {
    8
}

fn default_min_box_width() -> u32 {
    40
}

fn default_min_box_height() -> u32 {
    30
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OverlayConfig {
    #[serde(default = "default_box_opacity")]
    pub box_opacity: f32,
    #[serde(default = "default_show_box")]
    pub show_box: bool,
    pub auto_hide: bool,
    /// Failsafe for an abandoned crosshair overlay
    #[serde(default = "default_selection_timeout_ms")]
    pub selection_timeout_ms: u64,
    /// Drags must be strictly larger than this on both axes
    #[serde(default = "default_min_drag")]
    pub min_drag: u32,
    #[serde(default = "default_resize_border")]
    pub resize_border: i32,
    #[serde(default = "default_min_box_width")]
    pub min_box_width: u32,
    #[serde(default = "default_min_box_height")]
    pub min_box_height: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            box_opacity: default_box_opacity(),
            show_box: default_show_box(),
            auto_hide: false,
            selection_timeout_ms: default_selection_timeout_ms(),
            min_drag: default_min_drag(),
            resize_border: default_resize_border(),
            min_box_width: default_min_box_width(),
            min_box_height: default_min_box_height(),
        }
    }
}
