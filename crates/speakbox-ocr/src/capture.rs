use image::{RgbaImage, imageops};
use speakbox_core::capture::ScreenCapture;
use speakbox_core::error::CaptureError;
use speakbox_types::Region;
use xcap::Monitor;

/// Screen capture through xcap, spanning every monitor
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapCapture;

impl XcapCapture {
    pub fn new() -> Self {
        Self
    }
}

fn monitors() -> Result<Vec<Monitor>, CaptureError> {
    let monitors = Monitor::all().map_err(|e| CaptureError::Device(e.to_string()))?;
    if monitors.is_empty() {
        return Err(CaptureError::NoMonitor);
    }
    Ok(monitors)
}

fn bounds(monitor: &Monitor) -> Region {
    Region::new(monitor.x(), monitor.y(), monitor.width(), monitor.height())
}

impl ScreenCapture for XcapCapture {
    fn virtual_screen(&self) -> Result<Region, CaptureError> {
        monitors()?
            .iter()
            .map(bounds)
            .reduce(|a, b| a.union(&b))
            .ok_or(CaptureError::NoMonitor)
    }

    fn capture(&self, region: Region) -> Result<RgbaImage, CaptureError> {
        let mut shots = Vec::new();
        for monitor in monitors()? {
            let monitor_bounds = bounds(&monitor);
            if monitor_bounds.intersection(&region).is_none() {
                continue;
            }

            let image = monitor
                .capture_image()
                .map_err(|e| CaptureError::Device(e.to_string()))?;
            // Rebuild on our own image version
            let (w, h) = (image.width(), image.height());
            let image = RgbaImage::from_raw(w, h, image.into_raw())
                .ok_or_else(|| CaptureError::Device("monitor returned a short buffer".to_string()))?;
            shots.push((monitor_bounds, image));
        }

        compose(region, &shots).ok_or(CaptureError::OutOfBounds(region))
    }
}

/// Cut `region` out of per-monitor screenshots. Parts of the region not
/// covered by any monitor stay transparent. `None` when nothing overlaps.
pub fn compose(region: Region, shots: &[(Region, RgbaImage)]) -> Option<RgbaImage> {
    let mut canvas = RgbaImage::new(region.width, region.height);
    let mut covered = false;

    for (monitor, image) in shots {
        let Some(part) = monitor.intersection(&region) else {
            continue;
        };
        let cropped = imageops::crop_imm(
            image,
            (part.x - monitor.x) as u32,
            (part.y - monitor.y) as u32,
            part.width,
            part.height,
        )
        .to_image();
        imageops::replace(
            &mut canvas,
            &cropped,
            i64::from(part.x - region.x),
            i64::from(part.y - region.y),
        );
        covered = true;
    }

    covered.then_some(canvas)
}
