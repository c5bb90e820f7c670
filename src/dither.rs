//! Ramp quantization with Floyd-Steinberg error diffusion.

use crate::{Ramp, RenderedArt, WorkingGrid};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DitherMode {
    #[default]
    FloydSteinberg,
    /// Plain nearest-below quantization, errors are discarded
    None,
}

/// Floyd-Steinberg neighbours as `(dx, dy, weight)`. Weights sum to 1.
pub const FLOYD_STEINBERG: [(i64, i64, f64); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Ramp index for intensity `v` in `[0, 255]`: `floor(v / 255 * max_index)`,
/// clamped, so diffused values outside the range still land on a symbol.
pub fn ramp_index(v: f64, max_index: usize) -> usize {
    if max_index == 0 {
        return 0;
    }
    let max = max_index as f64;
    (v / 255.0 * max).floor().clamp(0.0, max) as usize
}

/// Intensity the symbol at `index` stands for.
pub fn quantized_value(index: usize, max_index: usize) -> f64 {
    if max_index == 0 {
        return 0.0;
    }
    index as f64 / max_index as f64 * 255.0
}

/// Quantize `grid` onto `ramp`, one line per grid row.
///
/// Cells are visited in raster order. Each cell is read once, and its
/// quantization error is added to east, south-west, south and south-east
/// neighbours, all of which come later in the scan. Shares that would fall
/// outside the grid are dropped.
pub fn quantize(mut grid: WorkingGrid, ramp: &Ramp, mode: DitherMode) -> RenderedArt {
    let (width, height) = (grid.width(), grid.height());
    let max_index = ramp.max_index();
    let mut lines = Vec::with_capacity(height as usize);

    for y in 0..height {
        let mut line = String::with_capacity(width as usize);
        for x in 0..width {
            let idx = y as usize * width as usize + x as usize;
            let v = grid.values()[idx];

            let index = ramp_index(v, max_index);
            line.push(ramp.symbol(index));

            if mode == DitherMode::FloydSteinberg {
                let err = v - quantized_value(index, max_index);
                diffuse(&mut grid, x, y, err);
            }
        }
        lines.push(line);
    }

    RenderedArt::from_lines(lines)
}

/// Spread `err` from `(x, y)` to its unvisited neighbours.
fn diffuse(grid: &mut WorkingGrid, x: u32, y: u32, err: f64) {
    if err == 0.0 {
        return;
    }
    for (dx, dy, weight) in FLOYD_STEINBERG {
        if let Some(i) = grid.index(i64::from(x) + dx, i64::from(y) + dy) {
            grid.values_mut()[i] += err * weight;
        }
    }
}
