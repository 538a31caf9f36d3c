use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use speakbox_config::Config;
use speakbox_config::ocr::{EngineKind, OcrConfig};
use speakbox_core::pipeline::Pipeline;
use speakbox_core::preprocess::Preprocessor;
use speakbox_core::reading::ReadingSession;
use speakbox_core::recognize::{Recognizer, RecognizerChain};
use speakbox_io::{ClipboardSink, SystemClipboard};
use speakbox_ocr::{TesseractEngine, TesseractOptions, XcapCapture, locate_tesseract};
use speakbox_speech::{CommandSpeech, SpeechService};
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub pipeline: Arc<Pipeline>,
    pub speech: Arc<dyn SpeechService>,
    pub clipboard: Arc<dyn ClipboardSink>,
    pub reading: Arc<ReadingSession>,
}

impl AppState {
    /// Wire the real screen, OCR, speech and clipboard services
    pub fn new(config: Config) -> Self {
        let mut pipeline = Pipeline::new(
            Arc::new(XcapCapture::new()),
            preprocessor(&config.ocr),
            RecognizerChain::new(build_engines(&config.ocr)),
        );
        if let Some(dir) = debug_dir(&config.ocr) {
            tracing::info!("Debug images go to {}", dir.display());
            pipeline = pipeline.with_debug_dir(dir);
        }
        tracing::info!("OCR engines: {:?}", pipeline.engines());

        let speech = CommandSpeech::new(
            config.speech.player.clone(),
            config.speech.player_args.clone(),
            Duration::from_millis(config.speech.poll_interval_ms),
        );
        let metadata = speech.metadata();
        tracing::info!(
            "Speech player: {} (external process: {})",
            metadata.name,
            metadata.external_process
        );

        Self::with_services(config, pipeline, Arc::new(speech), Arc::new(SystemClipboard))
    }

    pub fn with_services(
        config: Config,
        pipeline: Pipeline,
        speech: Arc<dyn SpeechService>,
        clipboard: Arc<dyn ClipboardSink>,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            pipeline: Arc::new(pipeline),
            speech,
            clipboard,
            reading: Arc::new(ReadingSession::new()),
        }
    }
}

pub fn preprocessor(ocr: &OcrConfig) -> Preprocessor {
    Preprocessor {
        scale_factor: ocr.scale_factor,
        threshold_block: ocr.threshold_block,
        threshold_c: ocr.threshold_c,
    }
}

fn build_engines(ocr: &OcrConfig) -> Vec<Box<dyn Recognizer>> {
    let mut engines: Vec<Box<dyn Recognizer>> = Vec::new();
    for kind in &ocr.engines {
        match kind {
            EngineKind::Tesseract => {
                let program = locate_tesseract(ocr.tesseract_path.as_deref());
                engines.push(Box::new(TesseractEngine::new(TesseractOptions {
                    program,
                    language: ocr.language.clone(),
                    page_segmentation: ocr.page_segmentation,
                    engine_mode: ocr.engine_mode,
                    char_whitelist: ocr.char_whitelist.clone(),
                })));
            }
            #[cfg(windows)]
            EngineKind::Windows => {
                engines.push(Box::new(speakbox_ocr::WindowsOcrEngine::new(
                    ocr.windows_language.clone(),
                )));
            }
            #[cfg(not(windows))]
            EngineKind::Windows => {
                tracing::warn!("Windows OCR engine is not available on this platform, skipping");
            }
        }
    }
    engines
}

fn debug_dir(ocr: &OcrConfig) -> Option<PathBuf> {
    if !ocr.debug_images {
        return None;
    }
    match &ocr.debug_dir {
        Some(dir) => Some(PathBuf::from(dir)),
        None => std::env::current_dir().ok(),
    }
}
