use image::DynamicImage;

use crate::error::RecognizeError;
use crate::preprocess::Prepared;

/// Which preprocessed variant an engine reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Processed,
    Scaled,
}

/// Text recognition engine
pub trait Recognizer: Send + Sync {
    /// Engine name for logs and status
    fn name(&self) -> &str;

    fn input(&self) -> InputKind {
        InputKind::Processed
    }

    /// Extract text. Blank or unreadable images yield an empty string.
    fn recognize(&self, image: &DynamicImage) -> Result<String, RecognizeError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognized {
    pub text: String,
    pub engine: String,
}

/// Engines tried in order until one returns non-blank text
#[derive(Default)]
pub struct RecognizerChain {
    engines: Vec<Box<dyn Recognizer>>,
}

impl RecognizerChain {
    pub fn new(engines: Vec<Box<dyn Recognizer>>) -> Self {
        Self { engines }
    }

    pub fn names(&self) -> Vec<&str> {
        self.engines.iter().map(|e| e.name()).collect()
    }

    /// Engine failures are logged and treated as an empty result
    pub fn recognize(&self, prepared: &Prepared) -> Option<Recognized> {
        for engine in &self.engines {
            let image = match engine.input() {
                InputKind::Processed => &prepared.processed,
                InputKind::Scaled => &prepared.scaled,
            };

            match engine.recognize(image) {
                Ok(text) if !text.trim().is_empty() => {
                    tracing::info!("OCR completed with {}: {} chars", engine.name(), text.len());
                    return Some(Recognized {
                        text,
                        engine: engine.name().to_string(),
                    });
                }
                Ok(_) => {
                    tracing::debug!("{} returned no text, trying next engine", engine.name());
                }
                Err(e) => {
                    tracing::warn!("Error during {} OCR: {}", engine.name(), e);
                }
            }
        }
        None
    }
}
