//! Capture + OCR smoke test - run with: cargo run -p speakbox-ocr --bin test_ocr -- [x,y,w,h]

use std::sync::Arc;

use anyhow::{Context, Result};
use speakbox_core::capture::ScreenCapture;
use speakbox_core::pipeline::{Pipeline, PipelineOutcome};
use speakbox_core::preprocess::Preprocessor;
use speakbox_core::recognize::{Recognizer, RecognizerChain};
use speakbox_ocr::{TesseractEngine, TesseractOptions, XcapCapture, locate_tesseract};
use speakbox_types::Region;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let capture = Arc::new(XcapCapture::new());
    let screen = capture.virtual_screen()?;
    tracing::info!("Virtual screen: {screen}");

    let region = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<Region>()
            .map_err(anyhow::Error::msg)
            .context("Expected x,y,w,h")?,
        None => Region::new(screen.x, screen.y, screen.width.min(800), screen.height.min(200)),
    };

    #[allow(unused_mut)]
    let mut engines: Vec<Box<dyn Recognizer>> = vec![Box::new(TesseractEngine::new(TesseractOptions {
        program: locate_tesseract(std::env::var("TESSERACT_PATH").ok().as_deref()),
        ..Default::default()
    }))];
    #[cfg(windows)]
    engines.push(Box::new(speakbox_ocr::WindowsOcrEngine::new("en")));

    let debug_dir = std::env::current_dir()?;
    let pipeline = Pipeline::new(capture, Preprocessor::default(), RecognizerChain::new(engines))
        .with_debug_dir(&debug_dir);

    let start = std::time::Instant::now();
    match pipeline.run(region)? {
        PipelineOutcome::Text(recognized) => {
            tracing::info!("{} in {:?}", recognized.engine, start.elapsed());
            for line in recognized.text.lines().take(10) {
                tracing::info!("> {line}");
            }
        }
        PipelineOutcome::NoText => tracing::info!("No text in {region} ({:?})", start.elapsed()),
    }
    tracing::info!("Debug images in {}", debug_dir.display());

    Ok(())
}
