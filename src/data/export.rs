//! PNG export of a captured chart frame at a fixed output size.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Output size of exported images.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Default file name offered in the save dialog.
pub fn default_export_name(tab_name: Option<&str>) -> String {
    let stamp = chrono::Local::now().timestamp_millis();
    match tab_name {
        Some(name) => {
            let stem = Path::new(name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("chart");
            format!("{}_{}.png", stem, stamp)
        }
        None => format!("chart_{}.png", stamp),
    }
}

/// Wrap an RGBA8 buffer (row-major, 4 bytes per pixel) as an image.
pub fn rgba_from_pixels(width: u32, height: u32, rgba: Vec<u8>) -> Result<RgbaImage, ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyCapture);
    }
    RgbaImage::from_raw(width, height, rgba).ok_or(ExportError::SizeMismatch { width, height })
}

/// Resize `capture` to the configured export size.
pub fn scale_to_export(capture: &RgbaImage, settings: &ExportSettings) -> RgbaImage {
    if capture.dimensions() == (settings.width, settings.height) {
        return capture.clone();
    }
    imageops::resize(capture, settings.width, settings.height, FilterType::Triangle)
}

/// Scale and write `capture` as PNG.
pub fn save_png<P: AsRef<Path>>(
    path: P,
    capture: &RgbaImage,
    settings: &ExportSettings,
) -> Result<(), ExportError> {
    let out = scale_to_export(capture, settings);
    out.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
    tracing::info!(path = %path.as_ref().display(), width = settings.width, height = settings.height, "exported PNG");
    Ok(())
}
