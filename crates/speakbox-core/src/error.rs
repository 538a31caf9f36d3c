#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no monitor found")]
    NoMonitor,

    #[error("region {0} lies outside every monitor")]
    OutOfBounds(speakbox_types::Region),

    #[error("capture device error: {0}")]
    Device(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RecognizeError {
    #[error("OCR engine '{0}' is not available: {1}")]
    EngineUnavailable(String, String),

    #[error("OCR engine '{engine}' failed: {message}")]
    EngineFailed { engine: String, message: String },

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
