//! Intensity grid shared by the tone and dither stages.

use crate::{PiicsaError, Result};

/// Row-major buffer of intensity values, one per character cell.
///
/// The tone stage creates it; the dither stage takes ownership and
/// accumulates diffused error into cells it has not visited yet.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingGrid {
    width: u32,
    height: u32,
    values: Vec<f64>,
}

impl WorkingGrid {
    pub fn from_values(width: u32, height: u32, values: Vec<f64>) -> Result<Self> {
        if values.len() != width as usize * height as usize {
            return Err(PiicsaError::InvalidDimensions(format!(
                "{} values do not fill a {width}x{height} grid",
                values.len()
            )));
        }
        Ok(Self { width, height, values })
    }

    /// Build a grid from rows of equal length.
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != width) {
            return Err(PiicsaError::InvalidDimensions("ragged grid rows".into()));
        }
        let values = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::from_values(width as u32, rows.len() as u32, values)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        self.index(x as i64, y as i64).map(|i| self.values[i])
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Flat index of `(x, y)`, or `None` when outside the grid.
    pub(crate) fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}
