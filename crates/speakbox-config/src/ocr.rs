use serde::{Deserialize, Serialize};
use speakbox_types::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Tesseract,
    Windows,
}

fn default_engines() -> Vec<EngineKind> {
    vec![EngineKind::Tesseract, EngineKind::Windows]
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_windows_language() -> String {
    "en".to_string()
}

fn default_page_segmentation() -> u32 {
    6
}

fn default_engine_mode() -> u32 {
    3
}

fn default_whitelist() -> Option<String> {
    Some(
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789.,!?@#$%^&*()[]{}<>-_=+;:'\" "
            .to_string(),
    )
}

fn default_scale_factor() -> f32 {
    2.0
}

fn default_threshold_block() -> u32 {
    11
}

fn default_threshold_c() -> f32 {
    2.0
}

fn default_debug_images() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// Tried in order, first non-empty result wins
    #[serde(default = "default_engines")]
    pub engines: Vec<EngineKind>,
    /// Tesseract language pack
    #[serde(default = "default_language")]
    pub language: String,
    /// BCP-47 tag for the Windows engine
    #[serde(default = "default_windows_language")]
    pub windows_language: String,
    /// Explicit tesseract binary; auto-detected when unset
    pub tesseract_path: Option<String>,
    #[serde(default = "default_page_segmentation")]
    pub page_segmentation: u32,
    #[serde(default = "default_engine_mode")]
    pub engine_mode: u32,
    #[serde(default = "default_whitelist")]
    pub char_whitelist: Option<String>,
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f32,
    /// Adaptive threshold neighbourhood, must be odd
    #[serde(default = "default_threshold_block")]
    pub threshold_block: u32,
    #[serde(default = "default_threshold_c")]
    pub threshold_c: f32,
    #[serde(default = "default_debug_images")]
    pub debug_images: bool,
    /// Where debug_original.png / debug_processed.png land, working dir when unset
    pub debug_dir: Option<String>,
    /// Box created at startup
    pub capture_region: Option<Region>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engines: default_engines(),
            language: default_language(),
            windows_language: default_windows_language(),
            tesseract_path: None,
            page_segmentation: default_page_segmentation(),
            engine_mode: default_engine_mode(),
            char_whitelist: default_whitelist(),
            scale_factor: default_scale_factor(),
            threshold_block: default_threshold_block(),
            threshold_c: default_threshold_c(),
            debug_images: default_debug_images(),
            debug_dir: None,
            capture_region: None,
        }
    }
}
