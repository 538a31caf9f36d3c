use std::env;

use serde::{Deserialize, Serialize};

use self::hotkey::HotkeyConfig;
use self::ocr::OcrConfig;
use self::overlay::OverlayConfig;
use self::speech::SpeechConfig;
use self::ui::UiConfig;

pub mod hotkey;
pub mod ocr;
pub mod overlay;
pub mod speech;
pub mod ui;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("box opacity {0} is outside 0.0..=1.0")]
    Opacity(f32),

    #[error("threshold block size must be odd and at least 3, got {0}")]
    ThresholdBlock(u32),

    #[error("scale factor must be positive, got {0}")]
    ScaleFactor(f32),

    #[error("default voice '{0}' is not in the voice list")]
    UnknownVoice(String),

    #[error("no OCR engine configured")]
    NoEngines,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub overlay: OverlayConfig,
    pub ocr: OcrConfig,
    pub speech: SpeechConfig,
    pub hotkeys: HotkeyConfig,

    /// Hotkey poll interval
    pub delta_time: u64,
}

impl Config {
    /// Built-in defaults only, the environment is applied separately
    pub fn new() -> Self {
        Config {
            ui: UiConfig::default(),
            overlay: OverlayConfig::default(),
            ocr: OcrConfig::default(),
            speech: SpeechConfig::default(),
            hotkeys: HotkeyConfig::default(),
            delta_time: 50,
        }
    }

    /// Environment variables win over profile values
    pub fn apply_env(&mut self) {
        if let Some(delta_time) = env::var("DELTA_TIME_MS").ok().and_then(|v| v.parse().ok()) {
            self.delta_time = delta_time;
        }

        if let Some(timeout) = env::var("SELECTION_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.overlay.selection_timeout_ms = timeout;
        }

        if let Ok(path) = env::var("TESSERACT_PATH") {
            self.ocr.tesseract_path = Some(path);
        }

        if let Ok(dir) = env::var("SPEAKBOX_DEBUG_DIR") {
            self.ocr.debug_dir = Some(dir);
        }

        if let Ok(voice) = env::var("SPEAKBOX_VOICE") {
            self.speech.voice = voice;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.overlay.box_opacity) {
            return Err(ConfigError::Opacity(self.overlay.box_opacity));
        }
        if self.ocr.threshold_block < 3 || self.ocr.threshold_block % 2 == 0 {
            return Err(ConfigError::ThresholdBlock(self.ocr.threshold_block));
        }
        if self.ocr.scale_factor <= 0.0 {
            return Err(ConfigError::ScaleFactor(self.ocr.scale_factor));
        }
        if !self.speech.knows_voice(&self.speech.voice) {
            return Err(ConfigError::UnknownVoice(self.speech.voice.clone()));
        }
        if self.ocr.engines.is_empty() {
            return Err(ConfigError::NoEngines);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
