use std::sync::Mutex;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::consts::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, DEFAULT_JPEG_QUALITY};
use crate::error::Result;

/// Live video frame accessor owned by the camera layer.
pub trait FrameSource: Send + Sync {
    /// The current frame, or `None` while the source has no decodable frame
    /// (camera still starting, stream stalled, ...).
    fn current_frame(&self) -> Option<DynamicImage>;
}

/// Frame source holding a single, replaceable still image.
#[derive(Debug, Default)]
pub struct StillFrameSource {
    frame: Mutex<Option<DynamicImage>>,
}

impl StillFrameSource {
    pub fn new(frame: DynamicImage) -> Self {
        Self {
            frame: Mutex::new(Some(frame)),
        }
    }

    /// A source that is not ready yet.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn set(&self, frame: Option<DynamicImage>) {
        if let Ok(mut slot) = self.frame.lock() {
            *slot = frame;
        }
    }
}

impl FrameSource for StillFrameSource {
    fn current_frame(&self) -> Option<DynamicImage> {
        let slot = self.frame.lock().ok()?;
        slot.as_ref()
            .filter(|f| f.width() > 0 && f.height() > 0)
            .cloned()
    }
}

/// Downscales frames to a fixed size and encodes them as JPEG, bounding the
/// payload handed to the classifier.
#[derive(Clone, Copy, Debug)]
pub struct FrameEncoder {
    pub width: u32,
    pub height: u32,
    pub quality: u8,
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self {
            width: DEFAULT_FRAME_WIDTH,
            height: DEFAULT_FRAME_HEIGHT,
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl FrameEncoder {
    pub fn new(width: u32, height: u32, quality: u8) -> Self {
        Self {
            width,
            height,
            quality,
        }
    }

    /// Resize to exactly `width`x`height` (aspect is not preserved, matching a
    /// fixed-size canvas draw).
    pub fn downscale(&self, frame: &DynamicImage) -> image::RgbImage {
        frame
            .resize_exact(self.width, self.height, FilterType::Triangle)
            .to_rgb8()
    }

    pub fn encode(&self, frame: &DynamicImage) -> Result<Vec<u8>> {
        let small = self.downscale(frame);
        let mut bytes = Vec::new();
        {
            let mut encoder =
                JpegEncoder::new_with_quality(&mut bytes, self.quality.clamp(1, 100));
            encoder.encode_image(&small)?;
        }
        Ok(bytes)
    }
}
