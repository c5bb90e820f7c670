//! End-to-end tests for the conversion pipeline and CLI.

use image::{ImageFormat, Rgba, RgbaImage};
use piicsa::{
    convert, source, ConversionParameters, Converter, DitherMode, LumaMode, PiicsaError, Ramp,
    ResampleFilter,
};
use std::io::Cursor;
use std::process::Command;

fn gray(v: u8) -> Rgba<u8> {
    Rgba([v, v, v, 255])
}

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128, 255])
    })
}

fn fixed(width: u32, height: u32) -> ConversionParameters {
    ConversionParameters {
        target_width: width,
        target_height: height,
        ..Default::default()
    }
}

fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
    bytes
}

#[test]
fn test_two_by_two_scenario() {
    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(0, 0, gray(0));
    img.put_pixel(1, 0, gray(255));
    img.put_pixel(0, 1, gray(128));
    img.put_pixel(1, 1, gray(128));

    let art = convert(&img, &fixed(2, 2), &Ramp::new(" #").unwrap()).unwrap();
    assert_eq!(art.lines(), [" #", "  "]);
    assert_eq!(art.to_text(), " #\n  \n");
}

#[test]
fn test_output_dimensions_fixed_height() {
    let img = gradient(300, 200);
    for (w, h) in [(1, 1), (13, 7), (80, 40), (400, 250)] {
        let art = convert(&img, &fixed(w, h), &Ramp::standard()).unwrap();
        assert_eq!(art.height(), h as usize);
        assert!(art.lines().iter().all(|l| l.chars().count() == w as usize));
    }
}

#[test]
fn test_output_dimensions_preserve_aspect() {
    let img = gradient(640, 480);
    let art = Converter::new()
        .with_width(40)
        .preserve_aspect_ratio(true)
        .convert(&img)
        .unwrap();
    assert_eq!((art.width(), art.height()), (40, 30));
}

#[test]
fn test_single_pixel_source() {
    let img = RgbaImage::from_pixel(1, 1, gray(200));
    let params = ConversionParameters {
        target_width: 1,
        preserve_aspect_ratio: true,
        ..Default::default()
    };
    let art = convert(&img, &params, &Ramp::standard()).unwrap();
    // floor(200 / 255 * 9) = 7
    assert_eq!(art.lines(), [":"]);
}

#[test]
fn test_repeatable() {
    let img = gradient(123, 77);
    let converter = Converter::new()
        .with_width(50)
        .with_contrast(1.3)
        .with_brightness(0.8);
    let a = converter.convert(&img).unwrap();
    let b = converter.convert(&img).unwrap();
    assert_eq!(a.to_text(), b.to_text());
}

#[test]
fn test_zero_contrast_collapses_to_mid_ramp() {
    let img = gradient(64, 64);
    let art = Converter::new()
        .with_width(8)
        .with_height(4)
        .with_contrast(0.0)
        .with_dither(DitherMode::None)
        .convert(&img)
        .unwrap();
    // every cell is 128: floor(128 / 255 * 9) = 4
    assert_eq!(art.height(), 4);
    assert!(art.lines().iter().all(|l| l == "++++++++"));
}

#[test]
fn test_black_and_white_extremes() {
    let black = RgbaImage::from_pixel(10, 10, gray(0));
    let white = RgbaImage::from_pixel(10, 10, gray(255));
    let converter = Converter::new().with_width(5).with_height(2);

    assert_eq!(converter.convert(&black).unwrap().to_text(), "@@@@@\n@@@@@\n");
    assert_eq!(converter.convert(&white).unwrap().to_text(), "     \n     \n");
}

#[test]
fn test_reduced_configuration() {
    let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
    let art = Converter::from_parts(
        ConversionParameters {
            target_width: 2,
            target_height: 1,
            ..ConversionParameters::reduced()
        },
        Ramp::simple(),
    )
    .convert(&img)
    .unwrap();
    // average luma 85: floor(85 / 255 * 5) = 1
    assert_eq!(art.lines(), ["##"]);

    let perceptual = Converter::new()
        .with_width(2)
        .with_height(1)
        .with_luma(LumaMode::Perceptual)
        .with_dither(DitherMode::None)
        .with_ramp(Ramp::simple())
        .convert(&img)
        .unwrap();
    // 76.245: floor(76.245 / 255 * 5) = 1
    assert_eq!(perceptual.lines(), ["##"]);
}

#[test]
fn test_every_filter_converts() {
    let img = gradient(90, 60);
    for filter in [
        ResampleFilter::Area,
        ResampleFilter::Nearest,
        ResampleFilter::Triangle,
        ResampleFilter::CatmullRom,
        ResampleFilter::Lanczos3,
    ] {
        let art = Converter::new()
            .with_width(30)
            .with_height(10)
            .with_filter(filter)
            .convert(&img)
            .unwrap();
        assert_eq!((art.width(), art.height()), (30, 10));
    }
}

#[test]
fn test_invalid_width() {
    let err = convert(&gradient(4, 4), &fixed(0, 4), &Ramp::standard()).unwrap_err();
    assert!(matches!(err, PiicsaError::InvalidDimensions(_)));
}

#[test]
fn test_invalid_brightness() {
    let params = ConversionParameters { brightness: 0.0, ..fixed(4, 4) };
    let err = convert(&gradient(4, 4), &params, &Ramp::standard()).unwrap_err();
    assert!(matches!(err, PiicsaError::InvalidParameter(_)));
}

#[test]
fn test_empty_source() {
    let params = ConversionParameters { preserve_aspect_ratio: true, ..fixed(4, 4) };
    let err = convert(&RgbaImage::new(0, 0), &params, &Ramp::standard()).unwrap_err();
    assert!(matches!(err, PiicsaError::InvalidDimensions(_)));
}

#[test]
fn test_tall_source_fails_instead_of_allocating() {
    let img = RgbaImage::new(1, 4_000_000);
    let params = ConversionParameters { preserve_aspect_ratio: true, ..fixed(2000, 0) };
    let err = convert(&img, &params, &Ramp::standard()).unwrap_err();
    assert!(matches!(err, PiicsaError::InvalidDimensions(_)));
}

#[test]
fn test_convert_bytes_decodes() {
    let img = RgbaImage::from_pixel(6, 6, gray(0));
    let art = Converter::new()
        .with_width(3)
        .with_height(2)
        .convert_bytes(&png_bytes(&img))
        .unwrap();
    assert_eq!(art.to_text(), "@@@\n@@@\n");

    let err = Converter::new().convert_bytes(b"\x89PNG garbage").unwrap_err();
    assert!(matches!(err, PiicsaError::Decode(_)));
}

#[test]
fn test_spawn_matches_inline() {
    let img = gradient(50, 50);
    let converter = Converter::new().with_width(20).with_height(10);
    let inline = converter.convert(&img).unwrap();
    let background = converter.spawn(img).join().unwrap().unwrap();
    assert_eq!(inline, background);
}

#[test]
fn test_from_raw_round_trip_through_pipeline() {
    let rgba = [gray(0).0, gray(255).0].concat();
    let img = source::from_raw(2, 1, rgba).unwrap();
    let art = convert(&img, &fixed(2, 1), &Ramp::binary()).unwrap();
    assert_eq!(art.lines(), ["# "]);
}

#[test]
fn test_cli_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.txt");
    RgbaImage::from_pixel(8, 8, gray(255)).save(&input).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_piicsa"))
        .arg(&input)
        .args(["--width", "4", "--height", "2", "--preset", "binary", "--invert"])
        .arg("--output")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "####\n####\n");
}

#[test]
fn test_cli_reads_config() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let config = dir.path().join("settings.json");
    RgbaImage::from_pixel(8, 4, gray(0)).save(&input).unwrap();
    std::fs::write(
        &config,
        r#"{ "target_width": 6, "preserve_aspect_ratio": true, "ramp": "x." }"#,
    )
    .unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_piicsa"))
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "xxxxxx\nxxxxxx\nxxxxxx\n");
}

#[test]
fn test_cli_rejects_zero_width() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    RgbaImage::from_pixel(2, 2, gray(0)).save(&input).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_piicsa"))
        .arg(&input)
        .args(["--width", "0"])
        .status()
        .unwrap();
    assert!(!status.success());
}
