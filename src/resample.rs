//! Downsampling the source image to one pixel per character cell.

use crate::{ConversionParameters, PiicsaError, Result, SourceImage};
use image::imageops::{self, FilterType};
use image::RgbaImage;
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    /// Average of every source pixel under the cell
    #[default]
    Area,
    Nearest,
    Triangle,
    CatmullRom,
    Lanczos3,
}

impl ResampleFilter {
    fn filter_type(self) -> Option<FilterType> {
        match self {
            ResampleFilter::Area => None,
            ResampleFilter::Nearest => Some(FilterType::Nearest),
            ResampleFilter::Triangle => Some(FilterType::Triangle),
            ResampleFilter::CatmullRom => Some(FilterType::CatmullRom),
            ResampleFilter::Lanczos3 => Some(FilterType::Lanczos3),
        }
    }
}

/// Resolve the character grid size for a source of `src_w`x`src_h`.
pub fn target_dimensions(
    params: &ConversionParameters,
    src_w: u32,
    src_h: u32,
) -> Result<(u32, u32)> {
    if params.target_width == 0 {
        return Err(PiicsaError::InvalidDimensions("target width must be > 0".into()));
    }

    let height = if params.preserve_aspect_ratio {
        if src_w == 0 || src_h == 0 {
            return Err(PiicsaError::InvalidDimensions(format!(
                "cannot preserve the aspect ratio of a {src_w}x{src_h} image"
            )));
        }
        let aspect = src_w as f64 / src_h as f64;
        let height = (params.target_width as f64 / aspect).round().max(1.0);
        if height > f64::from(u32::MAX) {
            return Err(PiicsaError::InvalidDimensions(format!(
                "a {src_w}x{src_h} image at width {} needs {height} rows",
                params.target_width
            )));
        }
        height as u32
    } else {
        params.target_height
    };

    if height == 0 {
        return Err(PiicsaError::InvalidDimensions("target height must be > 0".into()));
    }

    let bytes = (params.target_width as usize)
        .checked_mul(height as usize)
        .and_then(|cells| cells.checked_mul(4));
    if bytes.is_none() {
        return Err(PiicsaError::InvalidDimensions(format!(
            "a {}x{height} grid does not fit in memory",
            params.target_width
        )));
    }
    Ok((params.target_width, height))
}

/// Resample `image` to the grid size the parameters call for.
pub fn resample(image: &SourceImage, params: &ConversionParameters) -> Result<RgbaImage> {
    let (width, height) = target_dimensions(params, image.width(), image.height())?;
    if image.width() == 0 || image.height() == 0 {
        return Err(PiicsaError::InvalidDimensions(format!(
            "source image is empty ({}x{})",
            image.width(),
            image.height()
        )));
    }

    Ok(match params.filter.filter_type() {
        Some(filter) => imageops::resize(image, width, height, filter),
        None => resize_area(image, width, height),
    })
}

/// Box filter: each output pixel is the rounded mean of the source pixels
/// its cell covers. Cells smaller than a source pixel cover exactly one.
pub fn resize_area(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut output = RgbaImage::new(width, height);
    if width == 0 || height == 0 || image.width() == 0 || image.height() == 0 {
        return output;
    }

    let row_len = width as usize * 4;
    let buf: &mut [u8] = &mut output;

    #[cfg(not(target_arch = "wasm32"))]
    buf.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| fill_row(image, width, height, y as u32, row));

    #[cfg(target_arch = "wasm32")]
    buf.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| fill_row(image, width, height, y as u32, row));

    output
}

fn fill_row(image: &RgbaImage, width: u32, height: u32, y: u32, row: &mut [u8]) {
    let (y0, y1) = span(y, height, image.height());
    for x in 0..width {
        let (x0, x1) = span(x, width, image.width());

        let mut sum = [0u64; 4];
        for sy in y0..y1 {
            for sx in x0..x1 {
                let px = image.get_pixel(sx, sy);
                for (acc, &c) in sum.iter_mut().zip(px.0.iter()) {
                    *acc += u64::from(c);
                }
            }
        }

        let count = u64::from(x1 - x0) * u64::from(y1 - y0);
        let out = &mut row[x as usize * 4..x as usize * 4 + 4];
        for (dst, acc) in out.iter_mut().zip(sum) {
            *dst = ((acc + count / 2) / count) as u8;
        }
    }
}

/// Source range `[start, end)` covered by output cell `i` of `cells`,
/// clamped to `[0, len)` and never empty.
fn span(i: u32, cells: u32, len: u32) -> (u32, u32) {
    let (i, cells, len) = (u64::from(i), u64::from(cells), u64::from(len));
    let start = (i * len / cells).min(len - 1);
    let end = ((i + 1) * len).div_ceil(cells).clamp(start + 1, len);
    (start as u32, end as u32)
}
