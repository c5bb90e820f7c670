//! piicsa CLI - Convert images to ASCII art

use clap::{Parser, ValueEnum};
use log::{debug, info};
use piicsa::{
    source, ConversionParameters, DitherMode, LumaMode, PiicsaError, Profile, Ramp, ResampleFilter,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "piicsa", about = "Convert images to ASCII art")]
struct Args {
    /// Input image file
    input: PathBuf,
    /// Output width in characters
    #[arg(short, long, conflicts_with = "scale")]
    width: Option<u32>,
    /// Output height in characters (ignored with --preserve-aspect)
    #[arg(short = 'H', long)]
    height: Option<u32>,
    /// Size factor: 1.0 = 200x100 characters
    #[arg(short, long)]
    scale: Option<f64>,
    /// Derive the height from the image aspect ratio
    #[arg(short, long)]
    preserve_aspect: bool,
    /// Brightness exponent (1.0 = unchanged)
    #[arg(short, long)]
    brightness: Option<f64>,
    /// Contrast around mid-gray (1.0 = unchanged)
    #[arg(short, long)]
    contrast: Option<f64>,
    /// Custom ramp, darkest symbol first
    #[arg(short, long, conflicts_with = "preset")]
    ramp: Option<String>,
    /// Built-in ramp
    #[arg(long, value_enum)]
    preset: Option<Preset>,
    /// Invert the image
    #[arg(short, long)]
    invert: bool,
    /// Disable Floyd-Steinberg error diffusion
    #[arg(long)]
    no_dither: bool,
    /// Average RGB channels instead of perceptual luminance
    #[arg(long)]
    average_luma: bool,
    /// Resampling filter
    #[arg(short, long, value_enum)]
    filter: Option<Filter>,
    /// JSON settings file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Standard,
    Simple,
    Binary,
}

#[derive(Clone, Copy, ValueEnum)]
enum Filter {
    Area,
    Nearest,
    Triangle,
    CatmullRom,
    Lanczos3,
}

impl From<Filter> for ResampleFilter {
    fn from(f: Filter) -> Self {
        match f {
            Filter::Area => ResampleFilter::Area,
            Filter::Nearest => ResampleFilter::Nearest,
            Filter::Triangle => ResampleFilter::Triangle,
            Filter::CatmullRom => ResampleFilter::CatmullRom,
            Filter::Lanczos3 => ResampleFilter::Lanczos3,
        }
    }
}

fn main() -> Result<(), PiicsaError> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let profile = match &args.config {
        Some(path) => {
            debug!("loading settings from {}", path.display());
            Profile::load(path)?
        }
        None => Profile::default(),
    };
    let ramp = select_ramp(&args, &profile)?;
    let params = apply_overrides(&args, profile.params);
    debug!("parameters: {params:?}");

    let mut image = source::open(&args.input)?;
    if args.invert {
        image::imageops::invert(&mut image);
    }

    let art = piicsa::convert(&image, &params, &ramp)?;
    info!("{}: {}x{} characters", args.input.display(), art.width(), art.height());

    match &args.output {
        Some(path) => std::fs::write(path, art.to_text())?,
        None => print!("{art}"),
    }
    Ok(())
}

fn select_ramp(args: &Args, profile: &Profile) -> Result<Ramp, PiicsaError> {
    if let Some(symbols) = &args.ramp {
        return Ramp::new(symbols);
    }
    Ok(match args.preset {
        Some(Preset::Standard) => Ramp::standard(),
        Some(Preset::Simple) => Ramp::simple(),
        Some(Preset::Binary) => Ramp::binary(),
        None => profile.ramp_or_default(),
    })
}

fn apply_overrides(args: &Args, mut params: ConversionParameters) -> ConversionParameters {
    if let Some(scale) = args.scale {
        let (w, h) = ConversionParameters::scaled_size(scale);
        params.target_width = w;
        params.target_height = h;
    }
    if let Some(width) = args.width {
        params.target_width = width;
    }
    if let Some(height) = args.height {
        params.target_height = height;
    }
    if args.preserve_aspect {
        params.preserve_aspect_ratio = true;
    }
    if let Some(brightness) = args.brightness {
        params.brightness = brightness;
    }
    if let Some(contrast) = args.contrast {
        params.contrast = contrast;
    }
    if args.no_dither {
        params.dither = DitherMode::None;
    }
    if args.average_luma {
        params.luma = LumaMode::Average;
    }
    if let Some(filter) = args.filter {
        params.filter = filter.into();
    }
    params
}
