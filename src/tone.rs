//! Luminance extraction and brightness/contrast adjustment.

use crate::{PiicsaError, Result, WorkingGrid};
use image::RgbaImage;
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How RGB collapses to a single luminance value. Alpha is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LumaMode {
    /// 0.299 R + 0.587 G + 0.114 B
    #[default]
    Perceptual,
    /// (R + G + B) / 3
    Average,
}

impl LumaMode {
    pub fn luma(self, [r, g, b, _]: [u8; 4]) -> f64 {
        let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
        match self {
            LumaMode::Perceptual => 0.299 * r + 0.587 * g + 0.114 * b,
            LumaMode::Average => (r + g + b) / 3.0,
        }
    }
}

/// Adjust one luminance value.
///
/// Brightness is applied as `255 * (luma / 255)^(1 / brightness)`, so values
/// above 1 lift the midtones. Contrast then scales the distance from 128.
/// The result is clamped to `[0, 255]`.
pub fn adjust(luma: f64, brightness: f64, contrast: f64) -> f64 {
    let toned = 255.0 * (luma / 255.0).powf(1.0 / brightness);
    let contrasted = (toned - 128.0) * contrast + 128.0;
    contrasted.clamp(0.0, 255.0)
}

/// Map every pixel of `image` to an adjusted intensity.
pub fn tone_map(
    image: &RgbaImage,
    brightness: f64,
    contrast: f64,
    luma: LumaMode,
) -> Result<WorkingGrid> {
    if !brightness.is_finite() || brightness <= 0.0 {
        return Err(PiicsaError::InvalidParameter(format!(
            "brightness must be a positive number, got {brightness}"
        )));
    }
    if !contrast.is_finite() {
        return Err(PiicsaError::InvalidParameter(format!(
            "contrast must be finite, got {contrast}"
        )));
    }

    let tone = |px: &[u8]| {
        adjust(luma.luma([px[0], px[1], px[2], px[3]]), brightness, contrast)
    };

    #[cfg(not(target_arch = "wasm32"))]
    let values: Vec<f64> = image.as_raw().par_chunks_exact(4).map(tone).collect();
    #[cfg(target_arch = "wasm32")]
    let values: Vec<f64> = image.as_raw().chunks_exact(4).map(tone).collect();

    WorkingGrid::from_values(image.width(), image.height(), values)
}
