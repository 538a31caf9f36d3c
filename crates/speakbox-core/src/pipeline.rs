use std::path::{Path, PathBuf};
use std::sync::Arc;

use speakbox_types::Region;

use crate::capture::ScreenCapture;
use crate::error::CaptureError;
use crate::preprocess::{Prepared, Preprocessor};
use crate::recognize::{Recognized, RecognizerChain};

pub const DEBUG_ORIGINAL: &str = "debug_original.png";
pub const DEBUG_PROCESSED: &str = "debug_processed.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Text(Recognized),
    NoText,
}

/// Capture -> preprocess -> recognize, synchronous
pub struct Pipeline {
    capture: Arc<dyn ScreenCapture>,
    preprocessor: Preprocessor,
    chain: RecognizerChain,
    debug_dir: Option<PathBuf>,
}

impl Pipeline {
    pub fn new(
        capture: Arc<dyn ScreenCapture>,
        preprocessor: Preprocessor,
        chain: RecognizerChain,
    ) -> Self {
        Self {
            capture,
            preprocessor,
            chain,
            debug_dir: None,
        }
    }

    /// Persist the raw and processed images of every attempt into `dir`
    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = Some(dir.into());
        self
    }

    pub fn capture(&self) -> &Arc<dyn ScreenCapture> {
        &self.capture
    }

    pub fn engines(&self) -> Vec<&str> {
        self.chain.names()
    }

    pub fn run(&self, region: Region) -> Result<PipelineOutcome, CaptureError> {
        tracing::debug!("Capturing {region}");
        let image = self.capture.capture(region)?;
        tracing::debug!("Captured {}x{}", image.width(), image.height());

        let prepared = self.preprocessor.prepare(image);
        if let Some(dir) = &self.debug_dir {
            save_debug_images(dir, &prepared);
        }

        Ok(match self.chain.recognize(&prepared) {
            Some(recognized) => PipelineOutcome::Text(recognized),
            None => {
                tracing::info!("No text found in OCR result");
                PipelineOutcome::NoText
            }
        })
    }
}

/// Overwrites both artifacts; failures only cost the diagnostics
fn save_debug_images(dir: &Path, prepared: &Prepared) {
    let original = dir.join(DEBUG_ORIGINAL);
    if let Err(e) = prepared.original.save(&original) {
        tracing::warn!("Failed to save {}: {}", original.display(), e);
    }

    let processed = dir.join(DEBUG_PROCESSED);
    if let Err(e) = prepared.processed.save(&processed) {
        tracing::warn!("Failed to save {}: {}", processed.display(), e);
    }
}
