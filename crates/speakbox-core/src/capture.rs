use image::RgbaImage;
use speakbox_types::Region;

use crate::error::CaptureError;

/// Screen grabbing backend
pub trait ScreenCapture: Send + Sync {
    /// Bounding box of all connected monitors
    fn virtual_screen(&self) -> Result<Region, CaptureError>;

    /// Pixels of exactly `region`, in absolute screen coordinates
    fn capture(&self, region: Region) -> Result<RgbaImage, CaptureError>;
}
