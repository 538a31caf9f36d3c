use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, RgbaImage};

/// Image variants handed to the recognizers
pub struct Prepared {
    pub original: RgbaImage,
    /// Upscaled color image
    pub scaled: DynamicImage,
    /// Upscaled, binarized and smoothed
    pub processed: DynamicImage,
}

#[derive(Debug, Clone, Copy)]
pub struct Preprocessor {
    pub scale_factor: f32,
    pub threshold_block: u32,
    pub threshold_c: f32,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self {
            scale_factor: 2.0,
            threshold_block: 11,
            threshold_c: 2.0,
        }
    }
}

impl Preprocessor {
    pub fn prepare(&self, original: RgbaImage) -> Prepared {
        let (w, h) = original.dimensions();
        if w == 0 || h == 0 {
            let empty = DynamicImage::ImageRgba8(original.clone());
            return Prepared {
                original,
                scaled: empty.clone(),
                processed: empty,
            };
        }

        let sw = ((w as f32 * self.scale_factor).round() as u32).max(1);
        let sh = ((h as f32 * self.scale_factor).round() as u32).max(1);
        let scaled = imageops::resize(&original, sw, sh, FilterType::CatmullRom);

        let gray = imageops::grayscale(&scaled);
        let binary = adaptive_threshold(&gray, self.threshold_block, self.threshold_c);
        let smoothed = imageops::blur(&binary, kernel_sigma(3));

        Prepared {
            original,
            scaled: DynamicImage::ImageRgba8(scaled),
            processed: DynamicImage::ImageLuma8(smoothed),
        }
    }
}

/// Sigma for a Gaussian kernel of `ksize` when none is given explicitly
fn kernel_sigma(ksize: u32) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Gaussian-weighted adaptive threshold: a pixel is white when it is brighter
/// than its neighbourhood mean minus `c`
pub fn adaptive_threshold(gray: &GrayImage, block: u32, c: f32) -> GrayImage {
    let mean = imageops::blur(gray, kernel_sigma(block));
    let mut out = GrayImage::new(gray.width(), gray.height());
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let src = f32::from(gray.get_pixel(x, y)[0]);
        let local = f32::from(mean.get_pixel(x, y)[0]);
        *pixel = if src > local - c { Luma([255]) } else { Luma([0]) };
    }
    out
}
