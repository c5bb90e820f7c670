use crate::dither::DitherMode;
use crate::resample::ResampleFilter;
use crate::tone::LumaMode;
use crate::{PiicsaError, Ramp, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionParameters {
    /// Output width in character cells
    pub target_width: u32,
    /// Derive the height from the source aspect ratio
    pub preserve_aspect_ratio: bool,
    /// Output height, used only when `preserve_aspect_ratio` is false
    pub target_height: u32,
    /// Gamma-style exponent, 1.0 = identity
    pub brightness: f64,
    /// Slope around mid-gray, 1.0 = identity
    pub contrast: f64,
    pub luma: LumaMode,
    pub dither: DitherMode,
    pub filter: ResampleFilter,
}

impl ConversionParameters {
    /// Size slider convention: `scale` of 1.0 gives 200x100 cells.
    ///
    /// The fixed height is half the width because character cells are
    /// roughly twice as tall as they are wide.
    pub fn from_scale(scale: f64) -> Self {
        let (target_width, target_height) = Self::scaled_size(scale);
        Self {
            target_width,
            target_height,
            ..Self::base()
        }
    }

    pub fn scaled_size(scale: f64) -> (u32, u32) {
        let width = (200.0 * scale).round().max(0.0) as u32;
        let height = (100.0 * scale).round().max(0.0) as u32;
        (width, height)
    }

    /// Reduced configuration: plain channel average, no error diffusion.
    ///
    /// Pair it with [`Ramp::simple`].
    pub fn reduced() -> Self {
        Self {
            luma: LumaMode::Average,
            dither: DitherMode::None,
            ..Self::default()
        }
    }

    fn base() -> Self {
        Self {
            target_width: 0,
            preserve_aspect_ratio: false,
            target_height: 0,
            brightness: 1.0,
            contrast: 1.0,
            luma: LumaMode::default(),
            dither: DitherMode::default(),
            filter: ResampleFilter::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_width == 0 {
            return Err(PiicsaError::InvalidDimensions("target width must be > 0".into()));
        }
        if !self.preserve_aspect_ratio && self.target_height == 0 {
            return Err(PiicsaError::InvalidDimensions("target height must be > 0".into()));
        }
        if !self.brightness.is_finite() || self.brightness <= 0.0 {
            return Err(PiicsaError::InvalidParameter(format!(
                "brightness must be a positive number, got {}",
                self.brightness
            )));
        }
        if !self.contrast.is_finite() {
            return Err(PiicsaError::InvalidParameter(format!(
                "contrast must be finite, got {}",
                self.contrast
            )));
        }
        Ok(())
    }
}

impl Default for ConversionParameters {
    fn default() -> Self {
        Self::from_scale(0.5)
    }
}

/// Parameters plus ramp, as stored in a JSON settings file.
///
/// ```json
/// { "target_width": 120, "preserve_aspect_ratio": true, "ramp": "@#. " }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(flatten)]
    pub params: ConversionParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ramp: Option<Ramp>,
}

impl Profile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn ramp_or_default(&self) -> Ramp {
        self.ramp.clone().unwrap_or_default()
    }
}
