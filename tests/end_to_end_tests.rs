//! Full pipeline tests: content → render → exports → reconstruction

use image::{Rgba, RgbaImage};
use rust_qr_gen::export::{self, ExportFormat};
use rust_qr_gen::models::{BorderStyle, ECLevel, Logo, OptionChange, QrOptions, Rgb};
use rust_qr_gen::render::raster::rasterize;
use rust_qr_gen::utils::binarization::dark_mask;
use rust_qr_gen::vector::{classify_modules, infer_module_size};
use rust_qr_gen::{BitMatrix, Controller, PreviewState, render};
use tempfile::tempdir;

fn logo_png() -> Vec<u8> {
    let img = RgbaImage::from_pixel(32, 32, Rgba([30, 120, 220, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageOutputFormat::Png,
        )
        .unwrap();
    bytes
}

fn svg_of(options: &QrOptions, content: &str) -> String {
    let r = render(content, options).unwrap();
    String::from_utf8(export::encode(&r, ExportFormat::Svg).unwrap()).unwrap()
}

fn decode_mask(bytes: &[u8]) -> BitMatrix {
    let bitmap = image::load_from_memory(bytes).unwrap().to_rgba8();
    dark_mask(&bitmap, false)
}

#[test]
fn url_svg_has_one_rect_per_dark_module_plus_background() {
    let options = QrOptions::default();
    let r = render("https://example.com", &options).unwrap();
    let rec = r.to_vector();
    let svg = rec.to_svg_string();

    assert!(svg.contains(r#"width="200" height="200" viewBox="0 0 200 200""#));
    assert_eq!(svg.matches("<rect").count(), 1 + rec.dark_modules);
    assert_eq!(svg.matches("<image").count(), 0);
    assert_eq!(rec.dark_modules, r.grid().count_set());
}

#[test]
fn zero_margin_svg_matches_the_encoded_grid() {
    for size in [200, 210, 333] {
        let options = QrOptions::default()
            .apply(OptionChange::EcLevel(ECLevel::L))
            .apply(OptionChange::Margin(0))
            .apply(OptionChange::Size(size));
        let r = render("hello", &options).unwrap();
        let svg = String::from_utf8(export::encode(&r, ExportFormat::Svg).unwrap()).unwrap();
        assert_eq!(svg.matches("<rect").count(), 1 + r.grid().count_set(), "{size}px");
    }
}

#[test]
fn pixel_reconstruction_tiles_evenly_or_per_pixel() {
    // Whatever the scale, the inferred size divides the canvas and the
    // classified area equals the dark pixel count of the symbol
    for (size, margin) in [(200, 0), (210, 0), (200, 1), (250, 2)] {
        let options = QrOptions::default()
            .apply(OptionChange::EcLevel(ECLevel::L))
            .apply(OptionChange::Margin(margin))
            .apply(OptionChange::Size(size));
        let r = render("hello", &options).unwrap();
        let rec = r.reconstruct();
        let pitch = rec.module_size as u32;
        assert_eq!(size % pitch, 0, "{size}px margin {margin}");

        let dark_pixels = dark_mask(r.symbol(), false).count_set();
        assert_eq!(
            rec.dark_modules * (pitch * pitch) as usize,
            dark_pixels,
            "{size}px margin {margin}"
        );
    }
}

#[test]
fn logo_svg_has_backing_and_single_image() {
    let options = QrOptions::default()
        .apply(OptionChange::Logo(Some(Logo::from_bytes(logo_png()))))
        .apply(OptionChange::LogoSize(25));
    let svg = svg_of(&options, "https://example.com");

    assert_eq!(svg.matches("<image").count(), 1);
    assert_eq!(
        svg.matches(r##"<rect x="70" y="70" width="60" height="60" fill="#ffffff"/>"##)
            .count(),
        1
    );
    assert!(svg.contains(r#"<image x="75" y="75" width="50" height="50" href="data:image/png;base64,"#));
}

#[test]
fn logo_forces_high_correction() {
    for level in ECLevel::ALL {
        let options = QrOptions::default()
            .apply(OptionChange::EcLevel(level))
            .apply(OptionChange::Logo(Some(Logo::from_bytes(logo_png()))));
        let r = render("forced", &options).unwrap();
        assert_eq!(r.ec_level(), ECLevel::H);
        assert_eq!(r.info().ec_level, ECLevel::H);
        assert!(options.ec_level_lock().is_some());
    }
}

#[test]
fn border_is_last_in_svg() {
    let options = QrOptions::default()
        .apply(OptionChange::BorderStyle(BorderStyle::Dashed))
        .apply(OptionChange::BorderColor(Rgb::new(255, 0, 0)))
        .apply(OptionChange::BorderWidth(4));
    let svg = svg_of(&options, "border");
    let last = svg.lines().rev().nth(1).unwrap();
    assert_eq!(
        last.trim(),
        r##"<rect x="2" y="2" width="196" height="196" fill="none" stroke="#ff0000" stroke-width="4" stroke-dasharray="5,5"/>"##
    );
}

#[test]
fn png_and_jpeg_exports_classify_identically() {
    // Version 1 with no quiet zone: 21 modules over 210px, 10px per module
    let options = QrOptions::default()
        .apply(OptionChange::EcLevel(ECLevel::L))
        .apply(OptionChange::Margin(0))
        .apply(OptionChange::Size(210));
    let r = render("hello", &options).unwrap();
    assert_eq!(r.grid().width(), 21);

    let png = decode_mask(&export::encode(&r, ExportFormat::Png).unwrap());
    let jpeg = decode_mask(&export::encode(&r, ExportFormat::Jpeg).unwrap());
    let from_png = classify_modules(&png, 10);
    let from_jpeg = classify_modules(&jpeg, 10);
    assert_eq!(from_png, from_jpeg);

    // And both match the encoder's grid
    let expected = (0..21)
        .flat_map(|y| (0..21).map(move |x| (x, y)))
        .filter(|&(x, y)| r.grid().get(x, y))
        .count();
    assert_eq!(from_png.len(), expected);
}

#[test]
fn jpeg_round_trip_preserves_inferred_module_size() {
    let mut grid = BitMatrix::new(21, 21);
    for y in 0..21 {
        for x in 0..21 {
            grid.set(x, y, (x + y) % 2 == 0);
        }
    }
    let bitmap = rasterize(&grid, 0, 210, Rgb::BLACK, Rgb::WHITE);
    let png = decode_mask(&export::encode_png(&bitmap).unwrap());
    let jpeg = decode_mask(&export::encode_jpeg(&bitmap, 90).unwrap());

    assert_eq!(infer_module_size(&png), 10);
    assert_eq!(infer_module_size(&jpeg), 10);
    assert_eq!(classify_modules(&png, 10), classify_modules(&jpeg, 10));
}

#[test]
fn raster_exports_include_logo_but_vector_modules_do_not() {
    let plain = render("https://example.com", &QrOptions::default()).unwrap();
    let with_logo = render(
        "https://example.com",
        &QrOptions::default().apply(OptionChange::Logo(Some(Logo::from_bytes(logo_png())))),
    )
    .unwrap();

    // Only the composite carries the logo
    assert_ne!(with_logo.composite(), with_logo.symbol());
    assert_eq!(plain.composite(), plain.symbol());
    assert_eq!(with_logo.to_vector().document.image_count(), 1);
}

#[test]
fn controller_applies_only_the_latest_result() {
    let mut controller = Controller::default();
    let old = controller.set_content("https://old.example").unwrap();
    let new = controller.set_content("https://new.example").unwrap();

    let old_outcome = std::thread::spawn(move || old.run()).join().unwrap();
    let new_outcome = std::thread::spawn(move || new.run()).join().unwrap();

    assert!(controller.complete(new_outcome));
    assert!(!controller.complete(old_outcome));
    match controller.preview() {
        PreviewState::Ready(r) => assert_eq!(r.content(), "https://new.example"),
        other => panic!("expected a render, got {other:?}"),
    }
}

#[test]
fn saved_file_names_follow_the_download_pattern() {
    let dir = tempdir().unwrap();
    let r = render("download", &QrOptions::default()).unwrap();
    for format in [ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::Svg] {
        let path = export::save(&r, format, dir.path()).unwrap();
        assert_eq!(path.parent(), Some(dir.path()));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("qr-code-"));
        assert!(name.ends_with(&format!(".{}", format.extension())));
    }
}
