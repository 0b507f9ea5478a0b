use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbImage};

use crate::consts::RENDER_JPEG_QUALITY;
use crate::error::Result;

/// Extensions recognised as still images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff"];

pub fn load_image(path: &Path) -> Result<DynamicImage> {
    Ok(image::open(path)?)
}

/// Save an RGB image, choosing the format from the file extension (PNG when
/// the extension is missing or unknown).
pub fn save_image(img: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    match extension(path).as_deref() {
        Some("jpg" | "jpeg") => {
            let writer = BufWriter::new(File::create(path)?);
            JpegEncoder::new_with_quality(writer, RENDER_JPEG_QUALITY).encode_image(img)?;
        }
        Some("tif" | "tiff") => img.save_with_format(path, ImageFormat::Tiff)?,
        _ => img.save_with_format(path, ImageFormat::Png)?,
    }
    Ok(())
}

pub fn is_image_path(path: &Path) -> bool {
    extension(path).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Image files directly inside `dir`, sorted by path.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_path(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}
