//! Image to ASCII art converter with error-diffusion dithering.
//!
//! The pipeline has three stages, each in its own module:
//!
//! 1. [`resample`] shrinks the source to one pixel per character cell.
//! 2. [`tone`] turns every cell into a luminance value with brightness and
//!    contrast applied, producing a [`WorkingGrid`].
//! 3. [`dither`] quantizes the grid onto a [`Ramp`] in raster order and
//!    spreads the rounding error to cells that have not been visited yet.
//!
//! # Example
//! ```no_run
//! use piicsa::{Converter, Ramp};
//!
//! let image = piicsa::source::open("photo.jpg").unwrap();
//! let art = Converter::new()
//!     .with_width(80)
//!     .preserve_aspect_ratio(true)
//!     .with_ramp(Ramp::standard())
//!     .convert(&image)
//!     .unwrap();
//! print!("{art}");
//! ```

pub mod art;
pub mod dither;
pub mod grid;
pub mod params;
pub mod ramp;
pub mod resample;
pub mod source;
pub mod tone;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use art::RenderedArt;
pub use dither::DitherMode;
pub use grid::WorkingGrid;
pub use params::{ConversionParameters, Profile};
pub use ramp::Ramp;
pub use resample::ResampleFilter;
pub use source::SourceImage;
pub use tone::LumaMode;

use log::debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PiicsaError {
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PiicsaError>;

/// Run the full pipeline on `image`.
///
/// This is a pure function of its inputs: the same image, parameters and
/// ramp always produce the same text.
pub fn convert(
    image: &SourceImage,
    params: &ConversionParameters,
    ramp: &Ramp,
) -> Result<RenderedArt> {
    params.validate()?;

    let resampled = resample::resample(image, params)?;
    debug!(
        "resampled {}x{} -> {}x{} ({:?})",
        image.width(),
        image.height(),
        resampled.width(),
        resampled.height(),
        params.filter
    );

    let grid = tone::tone_map(&resampled, params.brightness, params.contrast, params.luma)?;
    let art = dither::quantize(grid, ramp, params.dither);
    debug!("rendered {} lines over a {}-symbol ramp", art.height(), ramp.len());

    Ok(art)
}

/// Builder-style front end over [`convert`].
#[derive(Debug, Clone, Default)]
pub struct Converter {
    params: ConversionParameters,
    ramp: Ramp,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(params: ConversionParameters, ramp: Ramp) -> Self {
        Self { params, ramp }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.params.target_width = width;
        self
    }

    /// Fixed output height, used only while aspect preservation is off.
    pub fn with_height(mut self, height: u32) -> Self {
        self.params.target_height = height;
        self
    }

    pub fn preserve_aspect_ratio(mut self, enabled: bool) -> Self {
        self.params.preserve_aspect_ratio = enabled;
        self
    }

    pub fn with_brightness(mut self, brightness: f64) -> Self {
        self.params.brightness = brightness;
        self
    }

    pub fn with_contrast(mut self, contrast: f64) -> Self {
        self.params.contrast = contrast;
        self
    }

    pub fn with_ramp(mut self, ramp: Ramp) -> Self {
        self.ramp = ramp;
        self
    }

    pub fn with_dither(mut self, mode: DitherMode) -> Self {
        self.params.dither = mode;
        self
    }

    pub fn with_luma(mut self, mode: LumaMode) -> Self {
        self.params.luma = mode;
        self
    }

    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.params.filter = filter;
        self
    }

    pub fn params(&self) -> &ConversionParameters {
        &self.params
    }

    pub fn ramp(&self) -> &Ramp {
        &self.ramp
    }

    pub fn convert(&self, image: &SourceImage) -> Result<RenderedArt> {
        convert(image, &self.params, &self.ramp)
    }

    /// Decode an encoded image (PNG, JPEG, ...) and convert it.
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<RenderedArt> {
        let image = source::decode(bytes)?;
        self.convert(&image)
    }

    /// Run the conversion on a background thread.
    ///
    /// Dropping the handle detaches the thread and discards its result.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn(self, image: SourceImage) -> std::thread::JoinHandle<Result<RenderedArt>> {
        std::thread::spawn(move || self.convert(&image))
    }
}
