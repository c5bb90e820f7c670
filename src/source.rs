//! Decoding input images into the RGBA buffer the pipeline consumes.

use crate::{PiicsaError, Result};
use image::RgbaImage;
use std::path::Path;

/// Decoded source image: row-major RGBA8 samples.
pub type SourceImage = RgbaImage;

/// Decode an encoded image, guessing the format from its contents.
pub fn decode(bytes: &[u8]) -> Result<SourceImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Open and decode an image file.
pub fn open(path: impl AsRef<Path>) -> Result<SourceImage> {
    Ok(image::open(path)?.to_rgba8())
}

/// Wrap a raw RGBA buffer, e.g. canvas pixel data.
pub fn from_raw(width: u32, height: u32, rgba: Vec<u8>) -> Result<SourceImage> {
    let len = rgba.len();
    RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
        PiicsaError::InvalidDimensions(format!(
            "{len} bytes cannot hold a {width}x{height} RGBA image"
        ))
    })
}
