//! Logo and border decoration
//!
//! [`LogoLayout`] and [`BorderLayout`] hold the geometry shared by the raster
//! compositor below and the vector emitter in `crate::vector::svg`.

use crate::error::Result;
use crate::models::{BorderStyle, QrOptions, Rgb};
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Hard ceiling on the logo side as a fraction of the canvas side.
/// Larger logos eat more modules than level H can recover.
pub const MAX_LOGO_FRACTION: f64 = 0.25;

/// Minimum white margin around the logo, in pixels
pub const MIN_LOGO_MARGIN: f64 = 2.0;

/// Centred logo geometry in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoLayout {
    /// Logo side
    pub side: f64,
    /// Top-left corner of the logo (same on both axes)
    pub origin: f64,
    /// White margin between the logo and the modules
    pub margin: f64,
}

impl LogoLayout {
    /// Layout for a logo of `percent` of a `canvas`-pixel square
    pub fn new(canvas: u32, percent: u32) -> Self {
        let canvas = canvas as f64;
        let side = (canvas * percent as f64 / 100.0).min(canvas * MAX_LOGO_FRACTION);
        let margin = MIN_LOGO_MARGIN.max(side * 0.1);
        Self {
            side,
            origin: (canvas - side) / 2.0,
            margin,
        }
    }

    /// Top-left corner of the white backing square
    pub fn backing_origin(&self) -> f64 {
        self.origin - self.margin
    }

    /// Side of the white backing square
    pub fn backing_side(&self) -> f64 {
        self.side + 2.0 * self.margin
    }
}

/// Border rectangle geometry: the stroke sits fully inside the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderLayout {
    /// Stroke centre-line offset from each canvas edge
    pub inset: f64,
    /// Side of the stroke centre-line square
    pub side: f64,
    /// Stroke width
    pub width: f64,
}

impl BorderLayout {
    /// Layout for a `width`-pixel stroke on a `canvas`-pixel square
    pub fn new(canvas: u32, width: u32) -> Self {
        let width = width.min(canvas / 2) as f64;
        Self {
            inset: width / 2.0,
            side: canvas as f64 - width,
            width,
        }
    }
}

/// Draw the logo (with its white backing) and the border onto a copy of `symbol`
pub fn compose(symbol: &RgbaImage, options: &QrOptions) -> Result<RgbaImage> {
    let mut canvas = symbol.clone();
    let side = canvas.width();

    if let Some(logo) = &options.logo {
        let decoded = logo.decode()?;
        let layout = LogoLayout::new(side, options.logo_size);
        draw_logo(&mut canvas, &decoded, &layout);
    }

    if options.border_style.is_visible() {
        draw_border(
            &mut canvas,
            options.border_style,
            options.border_color,
            options.border_width,
        );
    }

    Ok(canvas)
}

fn draw_logo(canvas: &mut RgbaImage, logo: &RgbaImage, layout: &LogoLayout) {
    let backing_start = layout.backing_origin().round().max(0.0) as u32;
    let backing_end = (layout.backing_origin() + layout.backing_side()).round() as u32;
    fill_square(canvas, backing_start, backing_end, Rgb::WHITE);

    let logo_side = layout.side.round().max(1.0) as u32;
    let scaled = imageops::resize(logo, logo_side, logo_side, FilterType::Triangle);
    let origin = layout.origin.round() as i64;
    imageops::overlay(canvas, &scaled, origin, origin);
}

fn fill_square(canvas: &mut RgbaImage, start: u32, end: u32, color: Rgb) {
    let end_x = end.min(canvas.width());
    let end_y = end.min(canvas.height());
    let pixel = color.to_rgba();
    for y in start..end_y {
        for x in start..end_x {
            canvas.put_pixel(x, y, pixel);
        }
    }
}

/// Paint a square border stroke inside the canvas edges.
///
/// Dash phase runs clockwise along the stroke centre line from the top-left
/// corner, the same path an SVG `<rect>` stroke follows, so dashes land in
/// the same places as in the vector border.
pub fn draw_border(canvas: &mut RgbaImage, style: BorderStyle, color: Rgb, width: u32) {
    if !style.is_visible() {
        return;
    }
    let side = canvas.width().min(canvas.height());
    let width = width.min(side / 2);
    let pixel = color.to_rgba();
    let pattern = style.dash_pattern();

    let half = width as f64 / 2.0;
    let edge = (side - width) as f64;
    let far = side as f64 - half;
    let is_on = |t: f64| match pattern {
        Some((on, off)) => t.rem_euclid((on + off) as f64) < on as f64,
        None => true,
    };

    for y in 0..side {
        for x in 0..side {
            let (cx, cy) = (x as f64 + 0.5, y as f64 + 0.5);
            // top, right, bottom, left
            let painted = (y < width && is_on(cx - half))
                || (x >= side - width && is_on(edge + cy - half))
                || (y >= side - width && is_on(2.0 * edge + far - cx))
                || (x < width && is_on(3.0 * edge + far - cy));
            if painted {
                canvas.put_pixel(x, y, pixel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Logo, OptionChange};
    use image::{ImageOutputFormat, Rgba};
    use std::io::Cursor;

    fn red_logo() -> Logo {
        let img = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageOutputFormat::Png)
            .unwrap();
        Logo::from_bytes(out.into_inner())
    }

    #[test]
    fn logo_layout_caps_at_quarter_of_canvas() {
        let layout = LogoLayout::new(300, 90);
        assert_eq!(layout.side, 75.0);
        assert_eq!(layout.origin, 112.5);
        assert_eq!(layout.margin, 7.5);
    }

    #[test]
    fn logo_layout_for_25_percent_on_200px() {
        let layout = LogoLayout::new(200, 25);
        assert_eq!(layout.side, 50.0);
        assert_eq!(layout.margin, 5.0);
        assert_eq!(layout.backing_origin(), 70.0);
        assert_eq!(layout.backing_side(), 60.0);
    }

    #[test]
    fn logo_margin_never_below_two_pixels() {
        let layout = LogoLayout::new(100, 15);
        assert_eq!(layout.side, 15.0);
        assert_eq!(layout.margin, 2.0);
    }

    #[test]
    fn compose_draws_backing_and_logo() {
        let symbol = RgbaImage::from_pixel(200, 200, Rgba([0, 0, 0, 255]));
        let options = QrOptions::default()
            .apply(OptionChange::Logo(Some(red_logo())))
            .apply(OptionChange::LogoSize(25));
        let out = compose(&symbol, &options).unwrap();

        // Backing spans 70..130, logo 75..125
        assert_eq!(out.get_pixel(69, 69), &Rgba([0, 0, 0, 255]));
        assert_eq!(out.get_pixel(71, 71), &Rgba([255, 255, 255, 255]));
        let centre = out.get_pixel(100, 100);
        assert!(centre[0] > 240 && centre[1] < 16 && centre[2] < 16);
        assert_eq!(out.get_pixel(129, 129), &Rgba([255, 255, 255, 255]));
        assert_eq!(out.get_pixel(130, 130), &Rgba([0, 0, 0, 255]));
        // Input is untouched
        assert_eq!(symbol.get_pixel(100, 100), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn compose_rejects_undecodable_logo() {
        let symbol = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
        let options = QrOptions::default()
            .apply(OptionChange::Logo(Some(Logo::from_bytes(vec![9u8; 16]))));
        assert!(compose(&symbol, &options).is_err());
    }

    #[test]
    fn solid_border_covers_edges_only() {
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        draw_border(&mut canvas, BorderStyle::Solid, Rgb::new(0, 0, 255), 2);
        let blue = Rgba([0, 0, 255, 255]);
        assert_eq!(canvas.get_pixel(0, 10), &blue);
        assert_eq!(canvas.get_pixel(1, 10), &blue);
        assert_eq!(canvas.get_pixel(19, 5), &blue);
        assert_eq!(canvas.get_pixel(10, 18), &blue);
        assert_eq!(canvas.get_pixel(2, 10), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn dashed_border_alternates_five_pixels() {
        let mut canvas = RgbaImage::from_pixel(40, 40, Rgba([255, 255, 255, 255]));
        draw_border(&mut canvas, BorderStyle::Dashed, Rgb::BLACK, 1);
        let black = Rgba([0, 0, 0, 255]);
        let white = Rgba([255, 255, 255, 255]);
        // Top edge: on for x in 0..5, off for 5..10
        assert_eq!(canvas.get_pixel(12, 0), &black);
        assert_eq!(canvas.get_pixel(17, 0), &white);
        assert_eq!(canvas.get_pixel(20, 0), &black);
    }

    #[test]
    fn dotted_border_uses_one_on_three_off() {
        let mut canvas = RgbaImage::from_pixel(40, 40, Rgba([255, 255, 255, 255]));
        draw_border(&mut canvas, BorderStyle::Dotted, Rgb::BLACK, 1);
        let painted: Vec<u32> = (4..12)
            .filter(|&x| canvas.get_pixel(x, 0)[0] == 0)
            .collect();
        assert_eq!(painted, vec![4, 8]);
    }

    #[test]
    fn dash_phase_continues_clockwise_around_corners() {
        let mut canvas = RgbaImage::from_pixel(40, 40, Rgba([255, 255, 255, 255]));
        draw_border(&mut canvas, BorderStyle::Dashed, Rgb::BLACK, 1);
        let black = Rgba([0, 0, 0, 255]);
        let white = Rgba([255, 255, 255, 255]);
        // Right edge starts 39px into the path: off at y=0, on for y in 1..6
        assert_eq!(canvas.get_pixel(39, 0), &white);
        assert_eq!(canvas.get_pixel(39, 1), &black);
        assert_eq!(canvas.get_pixel(39, 5), &black);
        assert_eq!(canvas.get_pixel(39, 6), &white);
        // Bottom edge runs right to left from 78px
        assert_eq!(canvas.get_pixel(37, 39), &black);
        assert_eq!(canvas.get_pixel(32, 39), &white);
    }
}
