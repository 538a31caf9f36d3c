use std::io::{Cursor, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use image::{DynamicImage, ImageFormat};
use speakbox_core::error::RecognizeError;
use speakbox_core::recognize::{InputKind, Recognizer};

#[cfg(windows)]
const TESSERACT_BIN: &str = "tesseract.exe";
#[cfg(not(windows))]
const TESSERACT_BIN: &str = "tesseract";

/// Bundled installs live next to the executable in this folder
const BUNDLED_DIR: &str = "Tesseract-OCR";

/// Find the tesseract binary: explicit path, then a bundled copy next to the
/// executable, then one in the working directory, then whatever `PATH` has.
pub fn locate_tesseract(configured: Option<&str>) -> PathBuf {
    if let Some(path) = configured.filter(|p| !p.trim().is_empty()) {
        let path = PathBuf::from(path);
        if path.exists() {
            return path;
        }
        tracing::warn!("Tesseract not found at {}", path.display());
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir().ok();

    for base in exe_dir.into_iter().chain(cwd) {
        let candidate = base.join(BUNDLED_DIR).join(TESSERACT_BIN);
        if candidate.exists() {
            tracing::info!("Tesseract found at: {}", candidate.display());
            return candidate;
        }
    }

    PathBuf::from(TESSERACT_BIN)
}

#[derive(Debug, Clone)]
pub struct TesseractOptions {
    pub program: PathBuf,
    pub language: String,
    pub page_segmentation: u32,
    pub engine_mode: u32,
    pub char_whitelist: Option<String>,
}

impl Default for TesseractOptions {
    fn default() -> Self {
        Self {
            program: PathBuf::from(TESSERACT_BIN),
            language: "eng".to_string(),
            page_segmentation: 6,
            engine_mode: 3,
            char_whitelist: None,
        }
    }
}

impl TesseractOptions {
    fn args(&self) -> Vec<String> {
        let mut args = vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "--oem".to_string(),
            self.engine_mode.to_string(),
            "--psm".to_string(),
            self.page_segmentation.to_string(),
            "-l".to_string(),
            self.language.clone(),
        ];
        if let Some(whitelist) = self.char_whitelist.as_deref().filter(|w| !w.is_empty()) {
            args.push("-c".to_string());
            args.push(format!("tessedit_char_whitelist={whitelist}"));
        }
        args
    }
}

/// Tesseract driven through its command line, image piped in as PNG
pub struct TesseractEngine {
    options: TesseractOptions,
}

impl TesseractEngine {
    pub fn new(options: TesseractOptions) -> Self {
        Self { options }
    }
}

impl Recognizer for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn input(&self) -> InputKind {
        InputKind::Processed
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String, RecognizeError> {
        let png = encode_png(image)?;

        let mut child = Command::new(&self.options.program)
            .args(self.options.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => RecognizeError::EngineUnavailable(
                    self.name().to_string(),
                    format!("{} not found", self.options.program.display()),
                ),
                _ => RecognizeError::IoError(e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&png)?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(RecognizeError::EngineFailed {
                engine: self.name().to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

pub(crate) fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, RecognizeError> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(windows)]
pub use windows_engine::WindowsOcrEngine;

#[cfg(windows)]
mod windows_engine {
    use image::DynamicImage;
    use speakbox_core::error::RecognizeError;
    use speakbox_core::recognize::{InputKind, Recognizer};
    use windows::{
        Globalization::Language,
        Graphics::Imaging::BitmapDecoder,
        Media::Ocr::OcrEngine as WinOcrEngine,
        Storage::Streams::{DataWriter, InMemoryRandomAccessStream},
        core::HSTRING,
    };

    use crate::com::ComGuard;

    /// Windows.Media.Ocr, fed the scaled color image
    pub struct WindowsOcrEngine {
        language: String,
    }

    impl WindowsOcrEngine {
        /// `language` is a BCP-47 tag such as "en"
        pub fn new(language: impl Into<String>) -> Self {
            Self {
                language: language.into(),
            }
        }

        fn failed(&self, e: windows::core::Error) -> RecognizeError {
            RecognizeError::EngineFailed {
                engine: "windows".to_string(),
                message: e.message().to_string(),
            }
        }

        fn run(&self, png: &[u8]) -> windows::core::Result<String> {
            let language = Language::CreateLanguage(&HSTRING::from(self.language.as_str()))?;
            let engine = WinOcrEngine::TryCreateFromLanguage(&language)?;

            let stream = InMemoryRandomAccessStream::new()?;
            let writer = DataWriter::CreateDataWriter(&stream)?;
            writer.WriteBytes(png)?;
            writer.StoreAsync()?.get()?;
            writer.FlushAsync()?.get()?;
            stream.Seek(0)?;

            let decoder = BitmapDecoder::CreateAsync(&stream)?.get()?;
            let bitmap = decoder.GetSoftwareBitmapAsync()?.get()?;
            let result = engine.RecognizeAsync(&bitmap)?.get()?;

            Ok(result.Text()?.to_string())
        }
    }

    impl Recognizer for WindowsOcrEngine {
        fn name(&self) -> &str {
            "windows"
        }

        fn input(&self) -> InputKind {
            InputKind::Scaled
        }

        fn recognize(&self, image: &DynamicImage) -> Result<String, RecognizeError> {
            let _com = ComGuard::initialize().map_err(|e| {
                RecognizeError::EngineUnavailable(self.name().to_string(), e.to_string())
            })?;
            let png = super::encode_png(image)?;
            self.run(&png).map_err(|e| self.failed(e))
        }
    }
}
