//! Clear and export.
//!
//! Export always goes through a scratch image that starts out opaque background,
//! so the PNG never carries transparency even if the raster somehow did.

use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use tracing::{info, warn};

use crate::error::Error;
use crate::raster::RasterBuffer;
use crate::types::Color;

/// Every export is offered under this name.
pub const EXPORT_FILE_NAME: &str = "drawing.png";

/// Host side of a "download": gets the finished file and puts it somewhere.
pub trait DownloadSink {
    fn offer(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), Error>;
}

/// Saves downloads into a directory, replacing an older file of the same name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn offer(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), Error> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "export written");
        Ok(())
    }
}

/// Fill the whole raster with `background`. False if there is nothing to clear yet.
pub fn clear(raster: &mut RasterBuffer, background: Color) -> bool {
    if raster.is_empty() {
        return false;
    }
    raster.fill(background);
    true
}

/// Source-over one channel: src*a + dst*(1-a), a in 0..=255.
#[inline]
fn over(src: u8, dst: u8, a: u16) -> u8 {
    ((src as u16 * a + dst as u16 * (255 - a) + 127) / 255) as u8
}

/// Same-size scratch image: opaque background, then the raster composited on top.
/// None while the raster has no area.
pub fn flatten(raster: &RasterBuffer, background: Color) -> Option<RgbaImage> {
    if raster.is_empty() {
        return None;
    }
    let bg = Rgba([background.r, background.g, background.b, 0xFF]);
    let mut scratch = RgbaImage::from_pixel(raster.width as u32, raster.height as u32, bg);

    for (i, px) in scratch.pixels_mut().enumerate() {
        let src = Color::from_argb(raster.pixels[i]);
        let a = src.a as u16;
        let Rgba([r, g, b, _]) = *px;
        *px = Rgba([over(src.r, r, a), over(src.g, g, a), over(src.b, b, a), 0xFF]);
    }
    Some(scratch)
}

/// Lossless PNG bytes. Deterministic for identical input.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Flatten + encode. None when the raster is not ready or encoding failed.
pub fn export_png(raster: &RasterBuffer, background: Color) -> Option<Vec<u8>> {
    let flat = flatten(raster, background)?;
    match encode_png(&flat) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!("export skipped: {e}");
            None
        }
    }
}
